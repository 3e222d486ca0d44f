//! The player unit and pilot progression.

pub mod progression;
pub mod types;

pub use types::*;
