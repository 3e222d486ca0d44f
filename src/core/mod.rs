//! Session state, turn sequencing and the per-frame view.

pub mod constants;
pub mod frame;
pub mod game_log;
pub mod session;

pub use frame::{Frame, FuelGauge, Tile};
pub use game_log::GameLog;
pub use session::{GamePhase, SaveSnapshot, Session, TurnOutcome};
