//! JSON dataset persistence for StoreOps.
//!
//! A dataset is a directory of five JSON files, one per collection:
//! products, employees, inventories, sales and units. [`DataStore`]
//! loads them in dependency order, resolving every cross-reference, and
//! writes them back pretty-printed.

mod error;
mod records;
mod store;

pub use error::DataError;
pub use records::{
    UnitRecord, EMPLOYEES_FILE, INVENTORIES_FILE, PRODUCTS_FILE, SALES_FILE, UNITS_FILE,
};
pub use store::{DataStore, Dataset};
