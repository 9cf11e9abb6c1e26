//! Burpee rule set. A burpee chains several movement patterns, so this
//! evaluator first classifies the frame into a sub-phase and then scores
//! the measurements that matter for that part of the movement.

use crate::analysis::geometry::angle_at;
use crate::analysis::result::{
    accuracy_of, is_low_confidence, point_or_nan, AngleMeasurement, FeedbackKind,
    FormAnalysisResult, LOW_CONFIDENCE_CAP, LOW_CONFIDENCE_FEEDBACK,
};
use crate::models::{index, named_or_index, Keypoint};

/// Within-frame movement sub-phase. Distinct from the cross-frame rep
/// phases: this is read off a single skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BurpeePhase {
    Standing,
    Plank,
    Pushup,
    Jump,
}

/// Classify the frame from body geometry. A horizontal torso selects the
/// plank family (bent elbows refine it to a push-up); upright with deeply
/// bent knees is the crouch; upright, extended, with wrists overhead is the
/// jump. NaN geometry falls through to standing and scores as invalid.
pub(crate) fn classify_phase(
    torso_horizontal: bool,
    knee_angle: f32,
    elbow_angle: f32,
    arms_overhead: bool,
) -> BurpeePhase {
    if torso_horizontal {
        if elbow_angle < 120.0 {
            BurpeePhase::Pushup
        } else {
            BurpeePhase::Plank
        }
    } else if knee_angle < 120.0 {
        // Crouch entering or leaving the jump; reported as standing.
        BurpeePhase::Standing
    } else if arms_overhead && knee_angle >= 165.0 {
        BurpeePhase::Jump
    } else {
        BurpeePhase::Standing
    }
}

pub(crate) fn evaluate(keypoints: &[Keypoint]) -> FormAnalysisResult {
    let nose = named_or_index(keypoints, "nose", index::NOSE);
    let shoulder = named_or_index(keypoints, "left_shoulder", index::LEFT_SHOULDER);
    let elbow = named_or_index(keypoints, "left_elbow", index::LEFT_ELBOW);
    let wrist = named_or_index(keypoints, "left_wrist", index::LEFT_WRIST);
    let hip = named_or_index(keypoints, "left_hip", index::LEFT_HIP);
    let knee = named_or_index(keypoints, "left_knee", index::LEFT_KNEE);
    let ankle = named_or_index(keypoints, "left_ankle", index::LEFT_ANKLE);

    let low_confidence = is_low_confidence(&[shoulder, hip, knee, ankle]);

    let nose_pt = point_or_nan(nose);
    let shoulder_pt = point_or_nan(shoulder);
    let elbow_pt = point_or_nan(elbow);
    let wrist_pt = point_or_nan(wrist);
    let hip_pt = point_or_nan(hip);
    let knee_pt = point_or_nan(knee);
    let ankle_pt = point_or_nan(ankle);

    let knee_angle = angle_at(hip_pt, knee_pt, ankle_pt);
    let body_angle = angle_at(shoulder_pt, hip_pt, ankle_pt);
    let elbow_angle = angle_at(shoulder_pt, elbow_pt, wrist_pt);

    let torso_horizontal = (hip_pt.y - shoulder_pt.y).abs() < (hip_pt.x - shoulder_pt.x).abs();
    let arms_overhead = wrist_pt.y < nose_pt.y;

    let phase = classify_phase(torso_horizontal, knee_angle, elbow_angle, arms_overhead);

    let (angles, feedback, feedback_kind) = match phase {
        BurpeePhase::Standing if knee_angle < 120.0 => (
            vec![AngleMeasurement::judge("Squat Depth", knee_angle, 80.0, 110.0)],
            "Now jump up!",
            FeedbackKind::Good,
        ),
        BurpeePhase::Standing => (
            vec![
                AngleMeasurement::judge("Body Upright", body_angle, 165.0, 180.0),
                AngleMeasurement::judge("Legs Extended", knee_angle, 165.0, 180.0),
            ],
            "Good! Now drop down",
            FeedbackKind::Good,
        ),
        BurpeePhase::Jump => (
            vec![
                AngleMeasurement::judge("Body Upright", body_angle, 165.0, 180.0),
                AngleMeasurement::judge("Legs Extended", knee_angle, 165.0, 180.0),
            ],
            "Full extension, land soft",
            FeedbackKind::Good,
        ),
        BurpeePhase::Plank => {
            let body_ok = body_angle >= 165.0;
            (
                vec![
                    AngleMeasurement::judge("Body Straight", body_angle, 165.0, 180.0),
                    AngleMeasurement::judge("Plank Hold", knee_angle, 165.0, 180.0),
                ],
                if body_ok {
                    "Hold plank, then push-up"
                } else {
                    "Keep body straight!"
                },
                if body_ok {
                    FeedbackKind::Good
                } else {
                    FeedbackKind::Error
                },
            )
        }
        BurpeePhase::Pushup => {
            let elbow_ok = elbow_angle >= 80.0 && elbow_angle <= 100.0;
            (
                vec![
                    AngleMeasurement::judge("Body Straight", body_angle, 165.0, 180.0),
                    AngleMeasurement::judge("Plank Hold", knee_angle, 165.0, 180.0),
                    AngleMeasurement::judge("Elbow Angle", elbow_angle, 80.0, 100.0),
                ],
                if elbow_ok {
                    "Perfect push-up!"
                } else {
                    "Lower your chest more"
                },
                if elbow_ok {
                    FeedbackKind::Good
                } else {
                    FeedbackKind::Warning
                },
            )
        }
    };

    let mut accuracy = accuracy_of(&angles);
    let (feedback, feedback_kind) = if low_confidence {
        accuracy = accuracy.min(LOW_CONFIDENCE_CAP);
        (LOW_CONFIDENCE_FEEDBACK, FeedbackKind::Warning)
    } else {
        (feedback, feedback_kind)
    };

    FormAnalysisResult {
        angles,
        accuracy,
        feedback,
        feedback_kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standing_keypoints(wrist: (f32, f32), score: f32) -> Vec<Keypoint> {
        vec![
            Keypoint::new(0.5, 0.2, score, "nose"),
            Keypoint::new(0.5, 0.3, score, "left_shoulder"),
            Keypoint::new(0.45, 0.4, score, "left_elbow"),
            Keypoint::new(wrist.0, wrist.1, score, "left_wrist"),
            Keypoint::new(0.5, 0.5, score, "left_hip"),
            Keypoint::new(0.5, 0.7, score, "left_knee"),
            Keypoint::new(0.5, 0.9, score, "left_ankle"),
        ]
    }

    fn horizontal_keypoints(elbow: (f32, f32), wrist: (f32, f32)) -> Vec<Keypoint> {
        vec![
            Keypoint::new(0.2, 0.48, 0.9, "nose"),
            Keypoint::new(0.3, 0.5, 0.9, "left_shoulder"),
            Keypoint::new(elbow.0, elbow.1, 0.9, "left_elbow"),
            Keypoint::new(wrist.0, wrist.1, 0.9, "left_wrist"),
            Keypoint::new(0.6, 0.5, 0.9, "left_hip"),
            Keypoint::new(0.75, 0.5, 0.9, "left_knee"),
            Keypoint::new(0.9, 0.5, 0.9, "left_ankle"),
        ]
    }

    #[test]
    fn upright_frame_reads_as_standing() {
        let result = evaluate(&standing_keypoints((0.45, 0.5), 0.9));
        assert_eq!(result.accuracy, 100);
        assert_eq!(result.feedback, "Good! Now drop down");
        assert_eq!(result.angles.len(), 2);
    }

    #[test]
    fn overhead_wrists_read_as_jump() {
        let result = evaluate(&standing_keypoints((0.52, 0.1), 0.9));
        assert_eq!(result.feedback, "Full extension, land soft");
        assert_eq!(result.accuracy, 100);
    }

    #[test]
    fn crouch_reports_squat_depth() {
        let keypoints = vec![
            Keypoint::new(0.5, 0.35, 0.9, "nose"),
            Keypoint::new(0.5, 0.42, 0.9, "left_shoulder"),
            Keypoint::new(0.47, 0.5, 0.9, "left_elbow"),
            Keypoint::new(0.47, 0.6, 0.9, "left_wrist"),
            Keypoint::new(0.52, 0.62, 0.9, "left_hip"),
            Keypoint::new(0.42, 0.65, 0.9, "left_knee"),
            Keypoint::new(0.45, 0.85, 0.9, "left_ankle"),
        ];
        let result = evaluate(&keypoints);
        assert_eq!(result.angles.len(), 1);
        assert_eq!(result.angles[0].name, "Squat Depth");
        assert_eq!(result.feedback, "Now jump up!");
        assert_eq!(result.accuracy, 100);
    }

    #[test]
    fn horizontal_frame_with_bent_elbows_reads_as_pushup() {
        let result = evaluate(&horizontal_keypoints((0.3, 0.62), (0.42, 0.62)));
        assert_eq!(result.angles.len(), 3);
        assert_eq!(result.feedback, "Perfect push-up!");
        assert_eq!(result.accuracy, 100);
    }

    #[test]
    fn horizontal_frame_with_straight_arms_reads_as_plank() {
        let result = evaluate(&horizontal_keypoints((0.32, 0.7), (0.34, 0.9)));
        assert_eq!(result.angles.len(), 2);
        assert_eq!(result.feedback, "Hold plank, then push-up");
    }

    #[test]
    fn low_confidence_overrides_phase_feedback() {
        let result = evaluate(&standing_keypoints((0.45, 0.5), 0.2));
        assert!(result.accuracy <= LOW_CONFIDENCE_CAP);
        assert_eq!(result.feedback, LOW_CONFIDENCE_FEEDBACK);
        assert_eq!(result.feedback_kind, FeedbackKind::Warning);
    }

    #[test]
    fn classification_thresholds() {
        assert_eq!(classify_phase(true, 180.0, 90.0, false), BurpeePhase::Pushup);
        assert_eq!(classify_phase(true, 180.0, 170.0, false), BurpeePhase::Plank);
        assert_eq!(classify_phase(false, 95.0, 170.0, false), BurpeePhase::Standing);
        assert_eq!(classify_phase(false, 178.0, 170.0, true), BurpeePhase::Jump);
        assert_eq!(classify_phase(false, 178.0, 170.0, false), BurpeePhase::Standing);
    }
}
