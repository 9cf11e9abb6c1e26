//! Per-session orchestration of the frame pipeline.

use chrono::{DateTime, Utc};
use log::warn;
use uuid::Uuid;

use crate::analysis::confidence::has_minimum_confidence;
use crate::analysis::dispatch::ExerciseKind;
use crate::analysis::result::FormAnalysisResult;
use crate::db::Database;
use crate::models::{Keypoint, WorkoutSession};
use crate::tracker::config::WorkoutConfig;
use crate::tracker::phase::{RepPhase, RepRecord, RepTracker};
use crate::tracker::session::SessionAggregator;

/// Everything the UI boundary needs from one evaluated frame.
#[derive(Debug)]
pub struct FrameOutcome {
    pub analysis: FormAnalysisResult,
    pub phase: RepPhase,
    pub completed_rep: Option<RepRecord>,
    pub session_complete: bool,
}

/// Owns one active workout session: the resolved evaluator, the phase
/// machine, and the aggregator. Frames must arrive in order on a single
/// logical thread; nothing here is shared across sessions.
pub struct WorkoutController {
    session_id: String,
    exercise_id: String,
    exercise: ExerciseKind,
    config: WorkoutConfig,
    tracker: RepTracker,
    aggregator: SessionAggregator,
    started_at: DateTime<Utc>,
}

impl WorkoutController {
    pub fn new(config: WorkoutConfig, started_at: DateTime<Utc>) -> Self {
        let exercise = ExerciseKind::parse(&config.exercise_id).unwrap_or_else(|| {
            warn!(
                "unknown exercise id '{}', falling back to squat rules",
                config.exercise_id
            );
            ExerciseKind::Squat
        });

        Self {
            session_id: Uuid::new_v4().to_string(),
            exercise_id: config.exercise_id.clone(),
            exercise,
            tracker: RepTracker::new(config.target_reps),
            aggregator: SessionAggregator::new(config.target_reps),
            config,
            started_at,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn phase(&self) -> RepPhase {
        self.tracker.phase()
    }

    pub fn reps_completed(&self) -> u32 {
        self.aggregator.reps_completed()
    }

    pub fn average_accuracy(&self) -> u8 {
        self.aggregator.average_accuracy()
    }

    pub fn is_complete(&self) -> bool {
        self.aggregator.is_complete()
    }

    /// Run one frame through gate -> evaluator -> phase machine ->
    /// aggregator. Frames that fail the confidence gate surface a warning
    /// and leave the phase machine untouched.
    pub fn process_frame(&mut self, keypoints: &[Keypoint], at: DateTime<Utc>) -> FrameOutcome {
        if !has_minimum_confidence(
            keypoints,
            self.config.min_confident_keypoints,
            self.config.confidence_threshold,
        ) {
            return FrameOutcome {
                analysis: FormAnalysisResult::insufficient_view(),
                phase: self.tracker.phase(),
                completed_rep: None,
                session_complete: self.aggregator.is_complete(),
            };
        }

        let analysis = self.exercise.evaluate(keypoints);
        let completed_rep = self.tracker.apply(&analysis, at);
        if let Some(record) = &completed_rep {
            self.aggregator.push(record.clone());
        }

        FrameOutcome {
            analysis,
            phase: self.tracker.phase(),
            completed_rep,
            session_complete: self.aggregator.is_complete(),
        }
    }

    /// The session summary as of `finished_at`, without persisting it.
    pub fn summary(&self, finished_at: DateTime<Utc>) -> WorkoutSession {
        self.aggregator.summarize(
            &self.exercise_id,
            self.exercise.display_name(),
            self.started_at,
            finished_at,
        )
    }

    /// Close the session: build the summary and hand it to the store. A
    /// failed write is logged and the summary is still returned, so the
    /// caller can show the result either way.
    pub async fn finish(&self, db: &Database, finished_at: DateTime<Utc>) -> WorkoutSession {
        let summary = self.summary(finished_at);
        if let Err(err) = db.insert_workout(&summary).await {
            warn!(
                "failed to persist workout {} for session {}: {err:?}",
                summary.id, self.session_id
            );
        }
        summary
    }
}
