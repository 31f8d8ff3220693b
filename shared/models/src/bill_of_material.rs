//! Bill of Material domain models.
//!
//! This module defines the read-only query value shared by every fetch in a
//! run, plus the two record shapes returned by the Bill of Material API:
//! [`Header`] rows from the `MaterialBOM` entity set and [`Item`] rows from the
//! `MaterialBOMItem` entity set (and from a header's item link).

use serde::{Deserialize, Serialize};

/// Filter values for one orchestration run.
///
/// Built once from the input descriptor and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillOfMaterialQuery {
    pub material: String,
    pub plant: String,
    /// Substring matched against the header's product description.
    pub product_description: String,
    pub component: String,
    /// Substring matched against the item's component description.
    pub component_description: String,
}

impl BillOfMaterialQuery {
    pub fn new(
        material: impl Into<String>,
        plant: impl Into<String>,
        product_description: impl Into<String>,
        component: impl Into<String>,
        component_description: impl Into<String>,
    ) -> Self {
        Self {
            material: material.into(),
            plant: plant.into(),
            product_description: product_description.into(),
            component: component.into(),
            component_description: component_description.into(),
        }
    }
}

/// One Bill of Material header row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub bill_of_material: String,
    pub bill_of_material_category: String,
    pub bill_of_material_variant: String,
    pub bill_of_material_version: String,
    pub engineering_change_document: String,
    pub material: String,
    pub plant: String,
    pub bill_of_material_header_uuid: String,
    pub validity_start_date: String,
    pub validity_end_date: String,
    pub is_multiple_bom_alt: bool,
    pub bom_header_base_unit: String,
    pub bom_header_quantity_in_base_unit: String,
    pub record_creation_date: String,
    pub last_change_date: String,
    pub bom_is_to_be_deleted: String,
    pub product_description: String,
    pub plant_name: String,
    pub bill_of_material_status: String,
    /// Link to the item list of this header.
    pub to_item: String,
}

impl Header {
    /// The item link, if the API supplied one. A non-blank link is returned
    /// exactly as received.
    pub fn item_link(&self) -> Option<&str> {
        if self.to_item.trim().is_empty() {
            None
        } else {
            Some(&self.to_item)
        }
    }
}

/// One Bill of Material item row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub bill_of_material: String,
    pub bill_of_material_category: String,
    pub bill_of_material_variant: String,
    pub bill_of_material_version: String,
    pub bill_of_material_item_node_number: String,
    pub header_change_document: String,
    pub material: String,
    pub plant: String,
    pub validity_start_date: String,
    pub validity_end_date: String,
    pub bill_of_material_component: String,
    pub component_description: String,
    pub bill_of_material_item_category: String,
    pub bill_of_material_item_number: String,
    pub bill_of_material_item_unit: String,
    pub bill_of_material_item_quantity: String,
    pub is_assembly: String,
    pub is_sub_item: String,
    pub component_scrap_in_percent: String,
    pub storage_location: String,
    pub bom_item_description: String,
    pub component_material_group: String,
}

/// Decoded records of one fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Records {
    Headers(Vec<Header>),
    Items(Vec<Item>),
}

impl Records {
    pub fn len(&self) -> usize {
        match self {
            Records::Headers(headers) => headers.len(),
            Records::Items(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn headers(&self) -> Option<&[Header]> {
        match self {
            Records::Headers(headers) => Some(headers),
            Records::Items(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_link_ignores_blank_values() {
        let mut header = Header::default();
        assert_eq!(header.item_link(), None);

        header.to_item = "   ".to_string();
        assert_eq!(header.item_link(), None);

        header.to_item = "http://x/items".to_string();
        assert_eq!(header.item_link(), Some("http://x/items"));
    }

    #[test]
    fn test_item_link_is_not_trimmed() {
        let header = Header {
            to_item: " http://x/items ".to_string(),
            ..Header::default()
        };
        assert_eq!(header.item_link(), Some(" http://x/items "));
    }

    #[test]
    fn test_records_accessors() {
        let headers = Records::Headers(vec![Header::default(), Header::default()]);
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.headers().map(<[Header]>::len), Some(2));

        let items = Records::Items(Vec::new());
        assert!(items.is_empty());
        assert!(items.headers().is_none());
    }

    #[test]
    fn test_records_serialize_as_plain_arrays() {
        let items = Records::Items(vec![Item {
            material: "M1".to_string(),
            ..Item::default()
        }]);
        let json = serde_json::to_value(&items).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["material"], "M1");
    }
}
