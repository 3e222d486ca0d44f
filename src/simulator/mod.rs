//! Headless balance simulator.
//!
//! Plays whole campaigns through `Session` with a shortest-path autopilot to
//! analyze:
//! - How far runs get and how often they win
//! - Where runs die
//! - Pilot level pacing
//!
//! Because every turn goes through the real session, results match gameplay.

mod autopilot;
mod config;
mod report;
mod runner;

pub use autopilot::next_step;
pub use config::SimConfig;
pub use report::{RunOutcome, RunStats, SimReport};
pub use runner::{run_simulation, simulate_single_run};
