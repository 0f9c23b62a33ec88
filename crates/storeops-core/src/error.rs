//! Retail error types.

use crate::inventory::Pool;
use thiserror::Error;

/// Errors that can occur in retail operations.
///
/// Every variant is locally recoverable and matched on by callers, except
/// [`RetailError::UnresolvedProductReference`], which aborts an inventory
/// load: an inventory that references products the catalog cannot resolve
/// is unsafe to operate on.
#[derive(Error, Debug)]
pub enum RetailError {
    /// Barcode failed EAN-13 validation.
    #[error("Invalid EAN-13 barcode: {0}")]
    InvalidBarcode(String),

    /// Product not found in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Product code already present in the catalog.
    #[error("Product already cataloged: {0}")]
    ProductAlreadyExists(String),

    /// Product not registered in this inventory.
    #[error("Product not registered in inventory: {0}")]
    NotRegistered(String),

    /// Product already registered in this inventory.
    #[error("Product already registered in inventory: {0}")]
    AlreadyRegistered(String),

    /// Capacity update with neither limit specified.
    #[error("No capacity fields specified for {0}")]
    NoCapacityGiven(String),

    /// Adding would push a pool past its capacity limit.
    #[error("{pool} capacity exceeded for {code}: {requested} > {limit}")]
    CapacityExceeded {
        code: String,
        pool: Pool,
        requested: u32,
        limit: u32,
    },

    /// Destination string is neither "stock" nor "exposure".
    #[error("Invalid destination '{0}': use 'stock' or 'exposure'")]
    InvalidDestination(String),

    /// Not enough units in stock for the requested move.
    #[error("Insufficient stock for {code}: requested {requested}, available {available}")]
    InsufficientStock {
        code: String,
        requested: u32,
        available: u32,
    },

    /// Not enough units on the sales floor for the requested sale.
    #[error("Insufficient exposure for {code}: requested {requested}, available {available}")]
    InsufficientExposure {
        code: String,
        requested: u32,
        available: u32,
    },

    /// Removal blocked while either pool still holds units.
    #[error("Product {0} still has quantity in stock or exposure")]
    StillStocked(String),

    /// Snapshot references a product code the catalog cannot resolve.
    #[error("Inventory {inventory} references unknown product {code}")]
    UnresolvedProductReference { inventory: String, code: String },

    /// Quantity must be positive.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Item not in the cart.
    #[error("Item not in cart: {0}")]
    ItemNotInCart(String),

    /// Employee not found.
    #[error("Employee not found: {0}")]
    EmployeeNotFound(String),

    /// Employee id already registered.
    #[error("Employee already registered: {0}")]
    EmployeeAlreadyExists(String),

    /// Employee already terminated.
    #[error("Employee already terminated: {0}")]
    AlreadyTerminated(String),

    /// Store unit not found.
    #[error("Unit not found: {0}")]
    UnitNotFound(String),

    /// Store unit code already registered.
    #[error("Unit already registered: {0}")]
    UnitAlreadyExists(String),

    /// Store unit is deactivated.
    #[error("Unit is deactivated: {0}")]
    UnitInactive(String),

    /// Report period is inverted or starts in the future.
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),
}
