//! OData v2 plumbing for the Bill of Material API
//!
//! Filter construction for the list requests, envelope decoding for the
//! responses, and reformatting of OData date literals.

pub mod date;
pub mod formatter;
pub mod query;

pub use date::{parse_odata_date, reformat_odata_date};
pub use formatter::{convert_to_header, convert_to_item};
pub use query::{filter_expression, query_params, QueryParams, FILTER_KEY};

/// Service path shared by every Bill of Material entity set.
pub const SERVICE_PATH: &str = "API_BILL_OF_MATERIAL_SRV;v=0002";

/// Full URL of an entity set under `base_url`.
pub fn entity_set_url(base_url: &str, entity_set: &str) -> String {
    [base_url.trim_end_matches('/'), SERVICE_PATH, entity_set].join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_set_url() {
        assert_eq!(
            entity_set_url("https://host/sap/opu/odata/sap/", "MaterialBOM"),
            "https://host/sap/opu/odata/sap/API_BILL_OF_MATERIAL_SRV;v=0002/MaterialBOM"
        );
        assert_eq!(
            entity_set_url("http://127.0.0.1:8080", "MaterialBOMItem"),
            "http://127.0.0.1:8080/API_BILL_OF_MATERIAL_SRV;v=0002/MaterialBOMItem"
        );
    }
}
