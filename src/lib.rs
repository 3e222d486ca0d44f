//! Mecha Delver - turn-based mecha dungeon crawl engine.
//!
//! The library holds every gameplay rule: procedural levels, sensor reveal,
//! bump-to-attack combat, pilot progression and the turn-sequencing session.
//! Front ends drive a [`core::Session`] and draw the [`core::Frame`] it returns.

pub mod character;
pub mod combat;
pub mod core;
pub mod dungeon;
pub mod items;
pub mod simulator;
pub mod utils;
