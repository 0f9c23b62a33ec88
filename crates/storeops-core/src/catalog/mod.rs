//! Product catalog module.
//!
//! Contains the product record, EAN-13 barcode validation, and the
//! authoritative catalog repository.

mod barcode;
mod catalog;
mod product;

pub use barcode::is_valid_ean13;
pub use catalog::{Catalog, ProductFilter};
pub use product::{Product, ProductUpdate};
