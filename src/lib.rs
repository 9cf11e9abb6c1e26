//! Exercise form evaluation and repetition counting over streamed body
//! keypoints. An external pose model supplies per-frame keypoint sets; this
//! crate gates them on confidence, scores form against per-exercise angle
//! rules, tracks repetition phases across frames, aggregates the session,
//! and hands completed workouts to the SQLite-backed history store.

pub mod analysis;
pub mod db;
pub mod feed;
pub mod models;
pub mod settings;
pub mod tracker;
mod utils;

pub use analysis::{
    confident_keypoints, has_minimum_confidence, measure_exercise_form, AngleMeasurement,
    ExerciseKind, FeedbackKind, FormAnalysisResult,
};
pub use db::{Database, HistoryStats};
pub use feed::{FeedController, SyntheticPoseFeed};
pub use models::{FormBreakdown, Keypoint, WorkoutSession};
pub use settings::{CoachSettings, SettingsStore};
pub use tracker::{
    FrameOutcome, RepPhase, RepRecord, RepTracker, SessionAggregator, WorkoutConfig,
    WorkoutController,
};
