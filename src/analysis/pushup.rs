//! Push-up rule set: elbow flexion and body line.

use crate::analysis::geometry::angle_at;
use crate::analysis::result::{
    accuracy_of, is_low_confidence, point_or_nan, AngleMeasurement, FeedbackKind,
    FormAnalysisResult, LOW_CONFIDENCE_CAP, LOW_CONFIDENCE_FEEDBACK,
};
use crate::models::{index, named_or_index, Keypoint};

pub(crate) fn evaluate(keypoints: &[Keypoint]) -> FormAnalysisResult {
    let shoulder = named_or_index(keypoints, "left_shoulder", index::LEFT_SHOULDER);
    let elbow = named_or_index(keypoints, "left_elbow", index::LEFT_ELBOW);
    let wrist = named_or_index(keypoints, "left_wrist", index::LEFT_WRIST);
    let hip = named_or_index(keypoints, "left_hip", index::LEFT_HIP);
    let knee = named_or_index(keypoints, "left_knee", index::LEFT_KNEE);

    let low_confidence = is_low_confidence(&[shoulder, elbow, wrist, hip, knee]);

    let shoulder_pt = point_or_nan(shoulder);
    let elbow_pt = point_or_nan(elbow);
    let wrist_pt = point_or_nan(wrist);
    let hip_pt = point_or_nan(hip);
    let knee_pt = point_or_nan(knee);

    let elbow_angle = angle_at(shoulder_pt, elbow_pt, wrist_pt);
    let body_angle = angle_at(shoulder_pt, hip_pt, knee_pt);

    let angles = vec![
        AngleMeasurement::judge("Elbow Angle", elbow_angle, 80.0, 100.0),
        AngleMeasurement::judge("Body Straight", body_angle, 165.0, 180.0),
    ];

    let mut accuracy = accuracy_of(&angles);
    if low_confidence {
        accuracy = accuracy.min(LOW_CONFIDENCE_CAP);
    }

    let (feedback, feedback_kind) = if low_confidence {
        (LOW_CONFIDENCE_FEEDBACK, FeedbackKind::Warning)
    } else if body_angle < 165.0 {
        ("Don't let hips sag!", FeedbackKind::Error)
    } else if elbow_angle > 100.0 {
        ("Lower your chest more", FeedbackKind::Warning)
    } else {
        ("Perfect push-up!", FeedbackKind::Good)
    };

    FormAnalysisResult {
        angles,
        accuracy,
        feedback,
        feedback_kind,
    }
}
