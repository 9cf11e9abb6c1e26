//! Shared per-frame analysis output types and scoring arithmetic.

use serde::Serialize;

use crate::analysis::geometry::Point;
use crate::models::Keypoint;

/// Confidence below which a critical keypoint invalidates the whole frame's
/// score for its exercise.
pub const CRITICAL_CONFIDENCE: f32 = 0.5;

/// Ceiling applied to accuracy when tracking is unreliable; a poorly seen
/// frame must never report high accuracy.
pub const LOW_CONFIDENCE_CAP: u8 = 50;

pub const LOW_CONFIDENCE_FEEDBACK: &str = "Move into better view";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FeedbackKind {
    Good,
    Warning,
    Error,
}

impl FeedbackKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackKind::Good => "good",
            FeedbackKind::Warning => "warning",
            FeedbackKind::Error => "error",
        }
    }
}

/// One measured joint angle judged against its tolerance band.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AngleMeasurement {
    pub name: &'static str,
    pub angle: f32,
    pub is_correct: bool,
    pub min_angle: f32,
    pub max_angle: f32,
}

impl AngleMeasurement {
    /// Judge `angle` against [min_angle, max_angle]. Non-finite angles come
    /// from missing keypoints and are always incorrect.
    pub fn judge(name: &'static str, angle: f32, min_angle: f32, max_angle: f32) -> Self {
        let is_correct = angle.is_finite() && angle >= min_angle && angle <= max_angle;
        Self {
            name,
            angle,
            is_correct,
            min_angle,
            max_angle,
        }
    }
}

/// Per-frame evaluator output: measurements, an accuracy in [0,100], and a
/// single prioritized feedback message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormAnalysisResult {
    pub angles: Vec<AngleMeasurement>,
    pub accuracy: u8,
    pub feedback: &'static str,
    pub feedback_kind: FeedbackKind,
}

impl FormAnalysisResult {
    /// Result surfaced for frames that fail the confidence gate. No scoring
    /// is performed and the phase machine never sees these frames.
    pub fn insufficient_view() -> Self {
        Self {
            angles: Vec::new(),
            accuracy: 0,
            feedback: LOW_CONFIDENCE_FEEDBACK,
            feedback_kind: FeedbackKind::Warning,
        }
    }
}

/// round(100 * correct / total); 0 when nothing was measured.
pub fn accuracy_of(angles: &[AngleMeasurement]) -> u8 {
    if angles.is_empty() {
        return 0;
    }
    let correct = angles.iter().filter(|a| a.is_correct).count();
    ((correct as f64 / angles.len() as f64) * 100.0).round() as u8
}

/// True when any critical keypoint is missing or tracked below
/// [`CRITICAL_CONFIDENCE`].
pub fn is_low_confidence(critical: &[Option<&Keypoint>]) -> bool {
    critical
        .iter()
        .any(|kp| kp.map(Keypoint::confidence).unwrap_or(0.0) < CRITICAL_CONFIDENCE)
}

/// Image-space position for a possibly missing keypoint. Missing landmarks
/// become NaN points so every downstream angle reads as invalid instead of
/// panicking mid-session.
pub(crate) fn point_or_nan(kp: Option<&Keypoint>) -> Point {
    kp.map(Point::from)
        .unwrap_or_else(|| Point::new(f32::NAN, f32::NAN))
}
