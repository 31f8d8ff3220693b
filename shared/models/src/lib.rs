//! # SAP Bill of Material Domain Models
//!
//! Core types shared by the Bill of Material read service.
//!
//! ## Key Models
//!
//! - **Aspect**: one independently fetchable record category (Header, Item,
//!   ProductDescription, Component, ComponentDescription)
//! - **AspectSelection**: a caller's selector list expanded into aspects
//! - **BillOfMaterialQuery**: the filter values shared read-only by every fetch
//! - **Header** / **Item**: decoded rows of the two Bill of Material entity sets

pub mod aspect;
pub mod bill_of_material;


pub use aspect::*;
pub use bill_of_material::*;
