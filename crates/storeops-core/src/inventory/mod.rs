//! Bounded two-pool inventory tracking with a consistency audit.

mod audit;
mod inventory;
mod snapshot;

pub use audit::{ConsistencyReport, Finding};
pub use inventory::{Capacity, Inventory, MissingScope, Occupancy, Pool, ProductLevels};
pub use snapshot::InventorySnapshot;
