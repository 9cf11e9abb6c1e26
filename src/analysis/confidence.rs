//! Frame-usability gating on keypoint confidence.

use crate::models::Keypoint;

pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.5;
pub const DEFAULT_MIN_CONFIDENT_KEYPOINTS: usize = 10;

/// Keypoints at or above the confidence threshold, in their original order.
pub fn confident_keypoints(keypoints: &[Keypoint], threshold: f32) -> Vec<Keypoint> {
    keypoints
        .iter()
        .filter(|kp| kp.confidence() >= threshold)
        .cloned()
        .collect()
}

/// Whether enough of the body is tracked to analyze this frame at all.
/// Callers must skip form scoring and phase updates for frames that fail
/// this gate and surface a warning instead.
pub fn has_minimum_confidence(keypoints: &[Keypoint], min_count: usize, threshold: f32) -> bool {
    keypoints
        .iter()
        .filter(|kp| kp.confidence() >= threshold)
        .count()
        >= min_count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keypoints_with_scores(scores: &[f32]) -> Vec<Keypoint> {
        scores
            .iter()
            .enumerate()
            .map(|(i, score)| Keypoint {
                x: i as f32,
                y: 0.0,
                score: Some(*score),
                name: None,
            })
            .collect()
    }

    #[test]
    fn filter_preserves_order_and_threshold() {
        let keypoints = keypoints_with_scores(&[0.9, 0.2, 0.6, 0.4, 0.5]);
        let kept = confident_keypoints(&keypoints, 0.5);
        let kept_x: Vec<f32> = kept.iter().map(|kp| kp.x).collect();
        assert_eq!(kept_x, vec![0.0, 2.0, 4.0]);
        assert!(kept.iter().all(|kp| kp.confidence() >= 0.5));
    }

    #[test]
    fn filter_does_not_mutate_input() {
        let keypoints = keypoints_with_scores(&[0.1, 0.9]);
        let _ = confident_keypoints(&keypoints, 0.5);
        assert_eq!(keypoints.len(), 2);
    }

    #[test]
    fn gate_counts_against_minimum() {
        let keypoints = keypoints_with_scores(&[0.9, 0.9, 0.9, 0.1]);
        assert!(has_minimum_confidence(&keypoints, 3, 0.5));
        assert!(!has_minimum_confidence(&keypoints, 4, 0.5));
    }

    #[test]
    fn missing_scores_never_pass_the_gate() {
        let keypoints = vec![
            Keypoint {
                x: 0.0,
                y: 0.0,
                score: None,
                name: None,
            };
            12
        ];
        assert!(!has_minimum_confidence(
            &keypoints,
            DEFAULT_MIN_CONFIDENT_KEYPOINTS,
            DEFAULT_CONFIDENCE_THRESHOLD
        ));
    }
}
