//! Running session accuracy and the completed-workout summary.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{FormBreakdown, WorkoutSession};
use crate::tracker::phase::RepRecord;

/// Flat burn rate applied to elapsed session time.
const CALORIES_PER_SECOND: f64 = 0.15;

/// Accumulates completed reps for one session and keeps the running average
/// accuracy. The average is recomputed from the full record list on every
/// append; an incremental mean would drift over a long session.
#[derive(Debug)]
pub struct SessionAggregator {
    records: Vec<RepRecord>,
    average_accuracy: u8,
    target_reps: u32,
}

impl SessionAggregator {
    pub fn new(target_reps: u32) -> Self {
        Self {
            records: Vec::new(),
            average_accuracy: 0,
            target_reps,
        }
    }

    pub fn push(&mut self, record: RepRecord) {
        self.records.push(record);
        let sum: u64 = self.records.iter().map(|r| r.accuracy as u64).sum();
        self.average_accuracy = (sum as f64 / self.records.len() as f64).round() as u8;
    }

    pub fn records(&self) -> &[RepRecord] {
        &self.records
    }

    pub fn reps_completed(&self) -> u32 {
        self.records.len() as u32
    }

    pub fn average_accuracy(&self) -> u8 {
        self.average_accuracy
    }

    pub fn is_complete(&self) -> bool {
        self.reps_completed() >= self.target_reps
    }

    /// Build the summary handed to persistence. Calories and the rep split
    /// are derived reporting values, not independently tracked.
    pub fn summarize(
        &self,
        exercise_id: &str,
        exercise_name: &str,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> WorkoutSession {
        let duration_secs = (finished_at - started_at).num_seconds().max(0) as u64;
        let reps_completed = self.reps_completed();
        let average_accuracy = self.average_accuracy;

        let calories_burned = (duration_secs as f64 * CALORIES_PER_SECOND).round() as u32;
        let correct_reps =
            (reps_completed as f64 * average_accuracy as f64 / 100.0).round() as u32;

        WorkoutSession {
            id: Uuid::new_v4().to_string(),
            exercise_id: exercise_id.to_string(),
            exercise_name: exercise_name.to_string(),
            date: finished_at,
            duration_secs,
            reps_completed,
            average_accuracy,
            calories_burned,
            form_breakdown: FormBreakdown {
                correct_reps,
                incorrect_reps: reps_completed - correct_reps,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(accuracy: u8) -> RepRecord {
        RepRecord {
            accuracy,
            angles: Vec::new(),
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn average_is_recomputed_on_every_append() {
        let mut aggregator = SessionAggregator::new(10);
        aggregator.push(record(90));
        assert_eq!(aggregator.average_accuracy(), 90);
        aggregator.push(record(80));
        assert_eq!(aggregator.average_accuracy(), 85);
        aggregator.push(record(70));
        assert_eq!(aggregator.average_accuracy(), 80);
        assert_eq!(aggregator.reps_completed(), 3);
    }

    #[test]
    fn completion_tracks_the_target() {
        let mut aggregator = SessionAggregator::new(2);
        assert!(!aggregator.is_complete());
        aggregator.push(record(90));
        assert!(!aggregator.is_complete());
        aggregator.push(record(90));
        assert!(aggregator.is_complete());
    }

    #[test]
    fn summary_derives_calories_and_rep_split() {
        let mut aggregator = SessionAggregator::new(10);
        for _ in 0..10 {
            aggregator.push(record(80));
        }

        let started_at = Utc::now();
        let finished_at = started_at + Duration::seconds(120);
        let summary = aggregator.summarize("squat", "Squat", started_at, finished_at);

        assert_eq!(summary.duration_secs, 120);
        assert_eq!(summary.calories_burned, 18);
        assert_eq!(summary.reps_completed, 10);
        assert_eq!(summary.average_accuracy, 80);
        assert_eq!(summary.form_breakdown.correct_reps, 8);
        assert_eq!(summary.form_breakdown.incorrect_reps, 2);
    }

    #[test]
    fn empty_session_summarizes_to_zeroes() {
        let aggregator = SessionAggregator::new(10);
        let now = Utc::now();
        let summary = aggregator.summarize("plank", "Plank", now, now);
        assert_eq!(summary.reps_completed, 0);
        assert_eq!(summary.average_accuracy, 0);
        assert_eq!(summary.form_breakdown.correct_reps, 0);
        assert_eq!(summary.form_breakdown.incorrect_reps, 0);
    }
}
