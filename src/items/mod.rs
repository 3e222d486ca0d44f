//! Consumable pickups and their effects.

pub mod logic;
pub mod types;

pub use logic::apply_item;
pub use types::*;
