//! Enemy catalog and bump-to-attack resolution.

pub mod logic;
pub mod types;

pub use logic::resolve_combat;
pub use types::*;
