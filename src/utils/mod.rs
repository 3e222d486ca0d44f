//! Utility modules: build info and save persistence.

pub mod build_info;
pub mod persistence;

pub use persistence::{SaveError, SnapshotStore};
