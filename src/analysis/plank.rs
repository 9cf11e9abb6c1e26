//! Plank rule set: body line plus shoulder stacking over the elbows.

use crate::analysis::geometry::{angle_at, distance};
use crate::analysis::result::{
    accuracy_of, is_low_confidence, point_or_nan, AngleMeasurement, FeedbackKind,
    FormAnalysisResult, LOW_CONFIDENCE_CAP, LOW_CONFIDENCE_FEEDBACK,
};
use crate::models::{index, named_or_index, Keypoint};

/// Shoulders count as stacked when their horizontal offset from the elbow
/// stays under this share of the upper-arm length. A ratio keeps the check
/// meaningful for both normalized and pixel coordinates.
const STACKED_OFFSET_RATIO: f32 = 0.25;

pub(crate) fn evaluate(keypoints: &[Keypoint]) -> FormAnalysisResult {
    let shoulder = named_or_index(keypoints, "left_shoulder", index::LEFT_SHOULDER);
    let elbow = named_or_index(keypoints, "left_elbow", index::LEFT_ELBOW);
    let hip = named_or_index(keypoints, "left_hip", index::LEFT_HIP);
    let ankle = named_or_index(keypoints, "left_ankle", index::LEFT_ANKLE);

    let low_confidence = is_low_confidence(&[shoulder, elbow, hip, ankle]);

    let shoulder_pt = point_or_nan(shoulder);
    let elbow_pt = point_or_nan(elbow);
    let hip_pt = point_or_nan(hip);
    let ankle_pt = point_or_nan(ankle);

    let body_angle = angle_at(shoulder_pt, hip_pt, ankle_pt);
    let upper_arm = distance(shoulder_pt, elbow_pt);
    let shoulders_stacked = (shoulder_pt.x - elbow_pt.x).abs() < upper_arm * STACKED_OFFSET_RATIO;

    let angles = vec![
        AngleMeasurement::judge("Body Straight", body_angle, 170.0, 180.0),
        // Reported as a pseudo-angle so the measurement list stays uniform.
        AngleMeasurement::judge(
            "Shoulders over elbows",
            if shoulders_stacked { 180.0 } else { 90.0 },
            180.0,
            180.0,
        ),
    ];

    let mut accuracy = accuracy_of(&angles);
    if low_confidence {
        accuracy = accuracy.min(LOW_CONFIDENCE_CAP);
    }

    let (feedback, feedback_kind) = if low_confidence {
        (LOW_CONFIDENCE_FEEDBACK, FeedbackKind::Warning)
    } else if body_angle < 170.0 {
        ("Don't let hips drop!", FeedbackKind::Error)
    } else if !shoulders_stacked {
        ("Keep shoulders over elbows", FeedbackKind::Warning)
    } else {
        ("Strong plank!", FeedbackKind::Good)
    };

    FormAnalysisResult {
        angles,
        accuracy,
        feedback,
        feedback_kind,
    }
}
