//! Exercise identifier routing to the per-exercise rule sets.

use log::debug;

use crate::analysis::result::FormAnalysisResult;
use crate::analysis::{burpee, lunge, plank, pushup, squat};
use crate::models::Keypoint;

/// Closed set of supported exercise evaluators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseKind {
    Squat,
    PushUp,
    Plank,
    Lunge,
    Burpee,
}

impl ExerciseKind {
    /// Case-insensitive identifier lookup. Both `"push-up"` and `"pushup"`
    /// resolve to the push-up evaluator.
    pub fn parse(id: &str) -> Option<Self> {
        match id.to_lowercase().as_str() {
            "squat" => Some(ExerciseKind::Squat),
            "pushup" | "push-up" => Some(ExerciseKind::PushUp),
            "plank" => Some(ExerciseKind::Plank),
            "lunge" => Some(ExerciseKind::Lunge),
            "burpee" => Some(ExerciseKind::Burpee),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ExerciseKind::Squat => "Squat",
            ExerciseKind::PushUp => "Push-Up",
            ExerciseKind::Plank => "Plank",
            ExerciseKind::Lunge => "Lunge",
            ExerciseKind::Burpee => "Burpee",
        }
    }

    pub fn evaluate(&self, keypoints: &[Keypoint]) -> FormAnalysisResult {
        match self {
            ExerciseKind::Squat => squat::evaluate(keypoints),
            ExerciseKind::PushUp => pushup::evaluate(keypoints),
            ExerciseKind::Plank => plank::evaluate(keypoints),
            ExerciseKind::Lunge => lunge::evaluate(keypoints),
            ExerciseKind::Burpee => burpee::evaluate(keypoints),
        }
    }
}

/// Evaluate one frame for the given exercise identifier. Unknown identifiers
/// score as squats so a catalogue mismatch never fails a session; the
/// fallback is logged, not raised.
pub fn measure_exercise_form(exercise_id: &str, keypoints: &[Keypoint]) -> FormAnalysisResult {
    match ExerciseKind::parse(exercise_id) {
        Some(kind) => kind.evaluate(keypoints),
        None => {
            debug!("unknown exercise id '{exercise_id}', scoring as squat");
            ExerciseKind::Squat.evaluate(keypoints)
        }
    }
}
