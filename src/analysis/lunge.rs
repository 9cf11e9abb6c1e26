//! Lunge rule set: front-knee bend and torso uprightness.

use crate::analysis::geometry::{angle_at, vertical_reference};
use crate::analysis::result::{
    accuracy_of, is_low_confidence, point_or_nan, AngleMeasurement, FeedbackKind,
    FormAnalysisResult, LOW_CONFIDENCE_CAP, LOW_CONFIDENCE_FEEDBACK,
};
use crate::models::{index, named_or_index, Keypoint};

pub(crate) fn evaluate(keypoints: &[Keypoint]) -> FormAnalysisResult {
    let hip = named_or_index(keypoints, "left_hip", index::LEFT_HIP);
    let knee = named_or_index(keypoints, "left_knee", index::LEFT_KNEE);
    let ankle = named_or_index(keypoints, "left_ankle", index::LEFT_ANKLE);
    let shoulder = named_or_index(keypoints, "left_shoulder", index::LEFT_SHOULDER);

    let low_confidence = is_low_confidence(&[hip, knee, ankle, shoulder]);

    let hip_pt = point_or_nan(hip);
    let knee_pt = point_or_nan(knee);
    let ankle_pt = point_or_nan(ankle);
    let shoulder_pt = point_or_nan(shoulder);

    let knee_angle = angle_at(hip_pt, knee_pt, ankle_pt);
    let torso_angle = angle_at(vertical_reference(hip_pt), hip_pt, shoulder_pt);

    let angles = vec![
        AngleMeasurement::judge("Front Knee", knee_angle, 85.0, 100.0),
        AngleMeasurement::judge("Torso Upright", torso_angle, 80.0, 180.0),
    ];

    let mut accuracy = accuracy_of(&angles);
    if low_confidence {
        accuracy = accuracy.min(LOW_CONFIDENCE_CAP);
    }

    let (feedback, feedback_kind) = if low_confidence {
        (LOW_CONFIDENCE_FEEDBACK, FeedbackKind::Warning)
    } else if knee_angle < 85.0 {
        ("Front knee too far forward", FeedbackKind::Error)
    } else if torso_angle < 80.0 {
        ("Stay upright", FeedbackKind::Warning)
    } else {
        ("Perfect lunge!", FeedbackKind::Good)
    };

    FormAnalysisResult {
        angles,
        accuracy,
        feedback,
        feedback_kind,
    }
}
