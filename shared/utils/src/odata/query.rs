//! OData `$filter` construction, one rule per aspect.
//!
//! Values are embedded between single quotes as given. Quotes inside a value
//! are not escaped, so a value containing `'` produces a malformed filter.

use sap_bom_models::{Aspect, BillOfMaterialQuery};
use std::collections::BTreeMap;

/// Query-string parameters of one request. Built fresh for every call.
pub type QueryParams = BTreeMap<String, String>;

pub const FILTER_KEY: &str = "$filter";

/// Filter expression for `aspect`.
pub fn filter_expression(aspect: Aspect, query: &BillOfMaterialQuery) -> String {
    match aspect {
        Aspect::Header | Aspect::Item => format!(
            "Material eq '{}' and Plant eq '{}'",
            query.material, query.plant
        ),
        Aspect::ProductDescription => format!(
            "Plant eq '{}' and substringof('{}', ProductDescription)",
            query.plant, query.product_description
        ),
        Aspect::Component => format!(
            "Plant eq '{}' and BillOfMaterialComponent eq '{}'",
            query.plant, query.component
        ),
        Aspect::ComponentDescription => format!(
            "Plant eq '{}' and substringof('{}', ComponentDescription)",
            query.plant, query.component_description
        ),
    }
}

/// Parameters for the list request of `aspect`.
pub fn query_params(aspect: Aspect, query: &BillOfMaterialQuery) -> QueryParams {
    let mut params = QueryParams::new();
    params.insert(FILTER_KEY.to_string(), filter_expression(aspect, query));
    params
}
