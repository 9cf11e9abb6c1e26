//! Cross-frame repetition phase machine.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::result::{AngleMeasurement, FormAnalysisResult};

/// Frame accuracy that counts as "in position" and starts the descent.
const DESCENT_MIN_ACCURACY: u8 = 75;

/// Frame accuracy that counts as holding good form at maximal depth. The
/// bottom of the movement is where the tolerance bands are tuned, so a high
/// score here is the depth signal.
const BOTTOM_MIN_ACCURACY: u8 = 80;

/// Frame accuracy that completes the ascent and closes the rep.
const COMPLETION_MIN_ACCURACY: u8 = 75;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RepPhase {
    Starting,
    Down,
    Bottom,
    Up,
}

impl Default for RepPhase {
    fn default() -> Self {
        RepPhase::Starting
    }
}

impl RepPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepPhase::Starting => "starting",
            RepPhase::Down => "down",
            RepPhase::Bottom => "bottom",
            RepPhase::Up => "up",
        }
    }
}

/// One completed repetition, recorded at the frame that closed it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepRecord {
    pub accuracy: u8,
    pub angles: Vec<AngleMeasurement>,
    pub completed_at: DateTime<Utc>,
}

/// Per-session phase machine. At most one transition per evaluated frame;
/// a rep is emitted only on the up -> starting transition. Frames that fail
/// the confidence gate must never be applied here.
#[derive(Debug)]
pub struct RepTracker {
    phase: RepPhase,
    reps_completed: u32,
    target_reps: u32,
}

impl RepTracker {
    pub fn new(target_reps: u32) -> Self {
        Self {
            phase: RepPhase::Starting,
            reps_completed: 0,
            target_reps,
        }
    }

    pub fn phase(&self) -> RepPhase {
        self.phase
    }

    pub fn reps_completed(&self) -> u32 {
        self.reps_completed
    }

    pub fn target_reps(&self) -> u32 {
        self.target_reps
    }

    /// Whether the target is reached. A complete tracker refuses frames.
    pub fn is_complete(&self) -> bool {
        self.reps_completed >= self.target_reps
    }

    /// Advance the machine by one frame, returning the rep this frame
    /// completed, if any.
    pub fn apply(
        &mut self,
        analysis: &FormAnalysisResult,
        at: DateTime<Utc>,
    ) -> Option<RepRecord> {
        if self.is_complete() {
            return None;
        }

        match self.phase {
            RepPhase::Starting if analysis.accuracy > DESCENT_MIN_ACCURACY => {
                self.phase = RepPhase::Down;
            }
            RepPhase::Down if analysis.accuracy > BOTTOM_MIN_ACCURACY => {
                self.phase = RepPhase::Bottom;
            }
            RepPhase::Bottom => {
                // The frame after maximal depth is the start of the ascent.
                self.phase = RepPhase::Up;
            }
            RepPhase::Up if analysis.accuracy > COMPLETION_MIN_ACCURACY => {
                self.phase = RepPhase::Starting;
                self.reps_completed += 1;
                return Some(RepRecord {
                    accuracy: analysis.accuracy,
                    angles: analysis.angles.clone(),
                    completed_at: at,
                });
            }
            _ => {}
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::result::FeedbackKind;

    fn frame(accuracy: u8) -> FormAnalysisResult {
        FormAnalysisResult {
            angles: Vec::new(),
            accuracy,
            feedback: "",
            feedback_kind: FeedbackKind::Good,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn accuracy_sequence_drives_one_full_rep() {
        let mut tracker = RepTracker::new(10);
        assert_eq!(tracker.phase(), RepPhase::Starting);

        assert!(tracker.apply(&frame(80), now()).is_none());
        assert_eq!(tracker.phase(), RepPhase::Down);

        assert!(tracker.apply(&frame(85), now()).is_none());
        assert_eq!(tracker.phase(), RepPhase::Bottom);

        // Bottom advances unconditionally, even on a weak frame.
        assert!(tracker.apply(&frame(10), now()).is_none());
        assert_eq!(tracker.phase(), RepPhase::Up);

        let record = tracker.apply(&frame(80), now()).expect("rep should close");
        assert_eq!(record.accuracy, 80);
        assert_eq!(tracker.phase(), RepPhase::Starting);
        assert_eq!(tracker.reps_completed(), 1);
    }

    #[test]
    fn thresholds_are_strict() {
        let mut tracker = RepTracker::new(10);
        assert!(tracker.apply(&frame(75), now()).is_none());
        assert_eq!(tracker.phase(), RepPhase::Starting);

        tracker.apply(&frame(76), now());
        assert_eq!(tracker.phase(), RepPhase::Down);

        assert!(tracker.apply(&frame(80), now()).is_none());
        assert_eq!(tracker.phase(), RepPhase::Down);
    }

    #[test]
    fn at_most_one_transition_per_frame() {
        let mut tracker = RepTracker::new(10);
        // A perfect frame moves starting -> down and nothing further.
        tracker.apply(&frame(100), now());
        assert_eq!(tracker.phase(), RepPhase::Down);
    }

    #[test]
    fn completed_tracker_refuses_frames() {
        let mut tracker = RepTracker::new(1);
        for accuracy in [80, 85, 0, 80] {
            tracker.apply(&frame(accuracy), now());
        }
        assert!(tracker.is_complete());
        assert_eq!(tracker.reps_completed(), 1);

        let phase_before = tracker.phase();
        assert!(tracker.apply(&frame(100), now()).is_none());
        assert_eq!(tracker.phase(), phase_before);
        assert_eq!(tracker.reps_completed(), 1);
    }
}
