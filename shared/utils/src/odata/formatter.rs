//! Response formatting for the Bill of Material service.
//!
//! Payloads use the OData v2 JSON envelope `{"d":{"results":[...]}}`. Each
//! wire row is mapped field by field onto [`Header`] or [`Item`]; `null`
//! fields become empty strings and date literals are reformatted.

use sap_bom_models::{Header, Item};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::date::reformat_odata_date;
use crate::error::BomResult;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    d: ResultSet<T>,
}

#[derive(Debug, Deserialize)]
struct ResultSet<T> {
    results: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
struct Deferred {
    #[serde(rename = "__deferred", default)]
    deferred: Option<DeferredUri>,
}

#[derive(Debug, Default, Deserialize)]
struct DeferredUri {
    #[serde(default)]
    uri: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct HeaderRow {
    bill_of_material: Option<String>,
    bill_of_material_category: Option<String>,
    bill_of_material_variant: Option<String>,
    bill_of_material_version: Option<String>,
    engineering_change_document: Option<String>,
    material: Option<String>,
    plant: Option<String>,
    #[serde(rename = "BillOfMaterialHeaderUUID")]
    bill_of_material_header_uuid: Option<String>,
    validity_start_date: Option<String>,
    validity_end_date: Option<String>,
    #[serde(rename = "IsMultipleBOMAlt")]
    is_multiple_bom_alt: Option<bool>,
    #[serde(rename = "BOMHeaderBaseUnit")]
    bom_header_base_unit: Option<String>,
    #[serde(rename = "BOMHeaderQuantityInBaseUnit")]
    bom_header_quantity_in_base_unit: Option<String>,
    record_creation_date: Option<String>,
    last_change_date: Option<String>,
    #[serde(rename = "BOMIsToBeDeleted")]
    bom_is_to_be_deleted: Option<String>,
    product_description: Option<String>,
    plant_name: Option<String>,
    bill_of_material_status: Option<String>,
    #[serde(rename = "to_BillOfMaterialItem")]
    to_item: Option<Deferred>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct ItemRow {
    bill_of_material: Option<String>,
    bill_of_material_category: Option<String>,
    bill_of_material_variant: Option<String>,
    bill_of_material_version: Option<String>,
    bill_of_material_item_node_number: Option<String>,
    header_change_document: Option<String>,
    material: Option<String>,
    plant: Option<String>,
    validity_start_date: Option<String>,
    validity_end_date: Option<String>,
    bill_of_material_component: Option<String>,
    component_description: Option<String>,
    bill_of_material_item_category: Option<String>,
    bill_of_material_item_number: Option<String>,
    bill_of_material_item_unit: Option<String>,
    bill_of_material_item_quantity: Option<String>,
    is_assembly: Option<String>,
    is_sub_item: Option<String>,
    component_scrap_in_percent: Option<String>,
    storage_location: Option<String>,
    #[serde(rename = "BOMItemDescription")]
    bom_item_description: Option<String>,
    component_material_group: Option<String>,
}

fn decode_results<T: DeserializeOwned>(payload: &[u8]) -> BomResult<Vec<T>> {
    let envelope: Envelope<T> = serde_json::from_slice(payload)?;
    Ok(envelope.d.results)
}

fn date(value: Option<String>) -> String {
    value.map(|v| reformat_odata_date(&v)).unwrap_or_default()
}

impl From<HeaderRow> for Header {
    fn from(row: HeaderRow) -> Self {
        Self {
            bill_of_material: row.bill_of_material.unwrap_or_default(),
            bill_of_material_category: row.bill_of_material_category.unwrap_or_default(),
            bill_of_material_variant: row.bill_of_material_variant.unwrap_or_default(),
            bill_of_material_version: row.bill_of_material_version.unwrap_or_default(),
            engineering_change_document: row.engineering_change_document.unwrap_or_default(),
            material: row.material.unwrap_or_default(),
            plant: row.plant.unwrap_or_default(),
            bill_of_material_header_uuid: row.bill_of_material_header_uuid.unwrap_or_default(),
            validity_start_date: date(row.validity_start_date),
            validity_end_date: date(row.validity_end_date),
            is_multiple_bom_alt: row.is_multiple_bom_alt.unwrap_or_default(),
            bom_header_base_unit: row.bom_header_base_unit.unwrap_or_default(),
            bom_header_quantity_in_base_unit: row
                .bom_header_quantity_in_base_unit
                .unwrap_or_default(),
            record_creation_date: date(row.record_creation_date),
            last_change_date: date(row.last_change_date),
            bom_is_to_be_deleted: row.bom_is_to_be_deleted.unwrap_or_default(),
            product_description: row.product_description.unwrap_or_default(),
            plant_name: row.plant_name.unwrap_or_default(),
            bill_of_material_status: row.bill_of_material_status.unwrap_or_default(),
            to_item: row
                .to_item
                .and_then(|link| link.deferred)
                .and_then(|deferred| deferred.uri)
                .unwrap_or_default(),
        }
    }
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Self {
            bill_of_material: row.bill_of_material.unwrap_or_default(),
            bill_of_material_category: row.bill_of_material_category.unwrap_or_default(),
            bill_of_material_variant: row.bill_of_material_variant.unwrap_or_default(),
            bill_of_material_version: row.bill_of_material_version.unwrap_or_default(),
            bill_of_material_item_node_number: row
                .bill_of_material_item_node_number
                .unwrap_or_default(),
            header_change_document: row.header_change_document.unwrap_or_default(),
            material: row.material.unwrap_or_default(),
            plant: row.plant.unwrap_or_default(),
            validity_start_date: date(row.validity_start_date),
            validity_end_date: date(row.validity_end_date),
            bill_of_material_component: row.bill_of_material_component.unwrap_or_default(),
            component_description: row.component_description.unwrap_or_default(),
            bill_of_material_item_category: row.bill_of_material_item_category.unwrap_or_default(),
            bill_of_material_item_number: row.bill_of_material_item_number.unwrap_or_default(),
            bill_of_material_item_unit: row.bill_of_material_item_unit.unwrap_or_default(),
            bill_of_material_item_quantity: row.bill_of_material_item_quantity.unwrap_or_default(),
            is_assembly: row.is_assembly.unwrap_or_default(),
            is_sub_item: row.is_sub_item.unwrap_or_default(),
            component_scrap_in_percent: row.component_scrap_in_percent.unwrap_or_default(),
            storage_location: row.storage_location.unwrap_or_default(),
            bom_item_description: row.bom_item_description.unwrap_or_default(),
            component_material_group: row.component_material_group.unwrap_or_default(),
        }
    }
}

/// Decodes a `MaterialBOM` payload into header records.
pub fn convert_to_header(payload: &[u8]) -> BomResult<Vec<Header>> {
    let rows: Vec<HeaderRow> = decode_results(payload)?;
    Ok(rows.into_iter().map(Header::from).collect())
}

/// Decodes a `MaterialBOMItem` payload, or a header's item link payload,
/// into item records.
pub fn convert_to_item(payload: &[u8]) -> BomResult<Vec<Item>> {
    let rows: Vec<ItemRow> = decode_results(payload)?;
    Ok(rows.into_iter().map(Item::from).collect())
}
