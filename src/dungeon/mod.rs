//! Level layout, procedural generation and sensor visibility.

pub mod generation;
pub mod types;
pub mod visibility;

pub use generation::generate_level;
pub use types::*;
