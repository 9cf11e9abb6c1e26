pub mod confidence;
pub mod dispatch;
pub mod geometry;
pub mod result;

mod burpee;
mod lunge;
mod plank;
mod pushup;
mod squat;

pub use confidence::{
    confident_keypoints, has_minimum_confidence, DEFAULT_CONFIDENCE_THRESHOLD,
    DEFAULT_MIN_CONFIDENT_KEYPOINTS,
};
pub use dispatch::{measure_exercise_form, ExerciseKind};
pub use result::{AngleMeasurement, FeedbackKind, FormAnalysisResult};
