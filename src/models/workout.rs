use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Correct/incorrect rep split derived from the session average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormBreakdown {
    pub correct_reps: u32,
    pub incorrect_reps: u32,
}

/// Summary of one completed workout session, handed to the store when the
/// target rep count is reached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSession {
    pub id: String,
    pub exercise_id: String,
    pub exercise_name: String,
    pub date: DateTime<Utc>,
    pub duration_secs: u64,
    pub reps_completed: u32,
    pub average_accuracy: u8,
    pub calories_burned: u32,
    pub form_breakdown: FormBreakdown,
}
