//! Dataset persistence error types.

use std::path::PathBuf;
use storeops_core::RetailError;
use thiserror::Error;

/// Errors that can occur loading or saving a dataset.
#[derive(Error, Debug)]
pub enum DataError {
    /// Reading or writing a dataset file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A dataset file is not valid JSON for its record type.
    #[error("Malformed dataset file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A domain-level check failed while rebuilding state.
    #[error(transparent)]
    Domain(#[from] RetailError),

    /// A unit references an inventory that inventories.json does not define.
    #[error("Unit {unit} references unknown inventory {inventory}")]
    UnknownInventory { unit: String, inventory: String },

    /// A unit references an employee that employees.json does not define.
    #[error("Unit {unit} references unknown employee {employee}")]
    UnknownEmployee { unit: String, employee: String },

    /// A unit references a sale that sales.json does not define.
    #[error("Unit {unit} references unknown sale {sale}")]
    UnknownSale { unit: String, sale: String },
}
