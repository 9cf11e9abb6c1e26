pub mod config;
pub mod controller;
pub mod phase;
pub mod session;

pub use config::WorkoutConfig;
pub use controller::{FrameOutcome, WorkoutController};
pub use phase::{RepPhase, RepRecord, RepTracker};
pub use session::SessionAggregator;
