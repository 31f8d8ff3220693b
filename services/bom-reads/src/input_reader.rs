//! Input Descriptor Reader
//!
//! Reads the SDC (service data container) JSON file that names the Bill of
//! Material to look up and the aspects to fetch.

use sap_bom_models::{AspectSelection, BillOfMaterialQuery};
use sap_bom_utils::{BomError, BomResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Input descriptor file contents
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct InputSdc {
    pub connection_key: String,
    pub result: bool,
    pub redis_key: String,
    pub filepath: String,
    #[serde(rename = "BillOfMaterial")]
    pub bill_of_material: BillOfMaterialInput,
    pub api_schema: String,
    pub accepter: Vec<String>,
    pub material_code: String,
    pub deleted: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BillOfMaterialInput {
    pub bill_of_material: String,
    pub bill_of_material_category: String,
    pub bill_of_material_variant: String,
    pub material: String,
    pub plant: String,
    pub product_description: String,
    pub bill_of_material_item: BillOfMaterialItemInput,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct BillOfMaterialItemInput {
    pub bill_of_material_item_node_number: String,
    pub bill_of_material_component: String,
    pub component_description: String,
}

impl InputSdc {
    /// Filter values for the run.
    pub fn query(&self) -> BillOfMaterialQuery {
        let bom = &self.bill_of_material;
        BillOfMaterialQuery::new(
            bom.material.as_str(),
            bom.plant.as_str(),
            bom.product_description.as_str(),
            bom.bill_of_material_item.bill_of_material_component.as_str(),
            bom.bill_of_material_item.component_description.as_str(),
        )
    }

    /// Aspects named by `accepter`, expanded.
    pub fn aspects(&self) -> AspectSelection {
        AspectSelection::expand(&self.accepter)
    }
}

pub fn parse_sdc(contents: &[u8]) -> BomResult<InputSdc> {
    serde_json::from_slice(contents).map_err(|e| BomError::input_descriptor(e.to_string()))
}

/// Read an input descriptor from `path`
pub fn read_sdc(path: impl AsRef<Path>) -> BomResult<InputSdc> {
    let path = path.as_ref();
    let contents = std::fs::read(path).map_err(|e| {
        BomError::input_descriptor(format!("failed to read {}: {}", path.display(), e))
    })?;
    parse_sdc(&contents)
}
