use crate::analysis::confidence::{DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_MIN_CONFIDENT_KEYPOINTS};

/// Configuration for one workout session with tunable gates.
#[derive(Debug, Clone)]
pub struct WorkoutConfig {
    pub exercise_id: String,

    /// Session ends once this many reps are recorded.
    pub target_reps: u32,

    /// Per-keypoint confidence floor for the frame-usability gate.
    pub confidence_threshold: f32,

    /// How many confident keypoints a frame needs to be analyzed at all.
    pub min_confident_keypoints: usize,
}

impl Default for WorkoutConfig {
    fn default() -> Self {
        Self {
            exercise_id: "squat".to_string(),
            target_reps: 10,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            min_confident_keypoints: DEFAULT_MIN_CONFIDENT_KEYPOINTS,
        }
    }
}
