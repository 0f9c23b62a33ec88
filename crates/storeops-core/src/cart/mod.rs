//! Sale carts: line accumulation, pricing and finalization.

mod cart;

pub use cart::{Cart, SaleLine};
