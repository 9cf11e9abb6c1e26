use serde::{Deserialize, Serialize};

/// A named 2D anatomical landmark with a detection confidence score.
///
/// Coordinates are in image space (x right, y down), normalized or in
/// pixels; the convention must stay consistent within one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    /// Detection confidence in [0,1]. Sources that omit it score as 0.
    pub score: Option<f32>,
    pub name: Option<String>,
}

impl Keypoint {
    pub fn new(x: f32, y: f32, score: f32, name: &str) -> Self {
        Self {
            x,
            y,
            score: Some(score),
            name: Some(name.to_string()),
        }
    }

    pub fn confidence(&self) -> f32 {
        self.score.unwrap_or(0.0)
    }
}

/// MoveNet/COCO-17 landmark order, used as the positional fallback for
/// sources that omit landmark names.
pub mod index {
    pub const NOSE: usize = 0;
    pub const LEFT_EYE: usize = 1;
    pub const RIGHT_EYE: usize = 2;
    pub const LEFT_EAR: usize = 3;
    pub const RIGHT_EAR: usize = 4;
    pub const LEFT_SHOULDER: usize = 5;
    pub const RIGHT_SHOULDER: usize = 6;
    pub const LEFT_ELBOW: usize = 7;
    pub const RIGHT_ELBOW: usize = 8;
    pub const LEFT_WRIST: usize = 9;
    pub const RIGHT_WRIST: usize = 10;
    pub const LEFT_HIP: usize = 11;
    pub const RIGHT_HIP: usize = 12;
    pub const LEFT_KNEE: usize = 13;
    pub const RIGHT_KNEE: usize = 14;
    pub const LEFT_ANKLE: usize = 15;
    pub const RIGHT_ANKLE: usize = 16;
}

/// Look up a landmark by name, falling back to its conventional index when
/// the name lookup fails. The fallback keeps unnamed keypoint sets working.
pub fn named_or_index<'a>(
    keypoints: &'a [Keypoint],
    name: &str,
    fallback: usize,
) -> Option<&'a Keypoint> {
    keypoints
        .iter()
        .find(|kp| kp.name.as_deref() == Some(name))
        .or_else(|| keypoints.get(fallback))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_landmark_by_name() {
        let keypoints = vec![
            Keypoint::new(0.1, 0.1, 0.9, "nose"),
            Keypoint::new(0.4, 0.5, 0.9, "left_hip"),
        ];
        let hip = named_or_index(&keypoints, "left_hip", index::LEFT_HIP).unwrap();
        assert_eq!(hip.x, 0.4);
    }

    #[test]
    fn falls_back_to_index_for_unnamed_sources() {
        let keypoints: Vec<Keypoint> = (0..17)
            .map(|i| Keypoint {
                x: i as f32 / 17.0,
                y: 0.5,
                score: Some(0.9),
                name: None,
            })
            .collect();
        let hip = named_or_index(&keypoints, "left_hip", index::LEFT_HIP).unwrap();
        assert_eq!(hip.x, index::LEFT_HIP as f32 / 17.0);
    }

    #[test]
    fn missing_landmark_and_short_set_yields_none() {
        let keypoints = vec![Keypoint::new(0.1, 0.1, 0.9, "nose")];
        assert!(named_or_index(&keypoints, "left_ankle", index::LEFT_ANKLE).is_none());
    }

    #[test]
    fn missing_score_reads_as_zero_confidence() {
        let kp = Keypoint {
            x: 0.0,
            y: 0.0,
            score: None,
            name: None,
        };
        assert_eq!(kp.confidence(), 0.0);
    }
}
