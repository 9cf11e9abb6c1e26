//! Scripted demo pose source. Stands in for a real pose model so the full
//! pipeline can run without a camera; none of this feeds production logic.

use rand::Rng;

use crate::models::Keypoint;

/// Limb lengths for the generated side-view skeleton, in normalized image
/// space.
const TORSO_LEN: f32 = 0.24;
const THIGH_LEN: f32 = 0.20;
const SHANK_LEN: f32 = 0.22;

const HIP_X: f32 = 0.50;
const HIP_Y: f32 = 0.52;

/// Coordinate jitter applied per frame to mimic detector noise. Small
/// enough that a scripted pose never leaves its tolerance bands.
const JITTER: f32 = 0.004;

/// Scripted squat cycle as (knee, hip, back) target angles. Two rest frames
/// score low, then four in-band frames walk the phase machine through one
/// full repetition.
const CYCLE: [(f32, f32, f32); 6] = [
    (175.0, 170.0, 178.0),
    (140.0, 130.0, 176.0),
    (95.0, 90.0, 175.0),
    (96.0, 88.0, 173.0),
    (94.0, 92.0, 174.0),
    (95.0, 90.0, 176.0),
];

fn ray(from: (f32, f32), angle_deg: f32, len: f32) -> (f32, f32) {
    let rad = angle_deg.to_radians();
    (from.0 + len * rad.cos(), from.1 + len * rad.sin())
}

/// Build a full 17-landmark side-view squat skeleton whose measured knee,
/// hip, and back angles equal the given targets. The chain is laid out from
/// the hip by absolute ray directions, so each interior angle holds by
/// construction (image space, y down; the vertical reference points down).
pub(crate) fn squat_pose(
    knee_angle: f32,
    hip_angle: f32,
    back_angle: f32,
    score: f32,
) -> Vec<Keypoint> {
    let hip = (HIP_X, HIP_Y);

    let shoulder_dir = 90.0 - back_angle;
    let shoulder = ray(hip, shoulder_dir, TORSO_LEN);

    let thigh_dir = shoulder_dir + hip_angle;
    let knee = ray(hip, thigh_dir, THIGH_LEN);

    let shank_dir = thigh_dir + 180.0 - knee_angle;
    let ankle = ray(knee, shank_dir, SHANK_LEN);

    // Landmarks the squat rules ignore, placed plausibly around the chain
    // so the frame still carries a full skeleton for the usability gate.
    let nose = (shoulder.0 + 0.02, shoulder.1 - 0.10);
    let elbow = (shoulder.0 - 0.04, shoulder.1 + 0.12);
    let wrist = (elbow.0 - 0.03, elbow.1 + 0.10);

    let place = |name: &str, at: (f32, f32)| Keypoint::new(at.0, at.1, score, name);

    vec![
        place("nose", nose),
        place("left_eye", (nose.0 - 0.02, nose.1 - 0.02)),
        place("right_eye", (nose.0 + 0.02, nose.1 - 0.02)),
        place("left_ear", (nose.0 - 0.04, nose.1 - 0.01)),
        place("right_ear", (nose.0 + 0.04, nose.1 - 0.01)),
        place("left_shoulder", shoulder),
        place("right_shoulder", (shoulder.0 + 0.04, shoulder.1)),
        place("left_elbow", elbow),
        place("right_elbow", (elbow.0 + 0.10, elbow.1)),
        place("left_wrist", wrist),
        place("right_wrist", (wrist.0 + 0.12, wrist.1)),
        place("left_hip", hip),
        place("right_hip", (hip.0 + 0.04, hip.1)),
        place("left_knee", knee),
        place("right_knee", (knee.0 + 0.04, knee.1)),
        place("left_ankle", ankle),
        place("right_ankle", (ankle.0 + 0.04, ankle.1)),
    ]
}

/// Endless scripted squat feed with per-frame jitter.
pub struct SyntheticPoseFeed {
    frame: usize,
}

impl SyntheticPoseFeed {
    pub fn new() -> Self {
        Self { frame: 0 }
    }

    pub fn next_frame(&mut self) -> Vec<Keypoint> {
        let (knee, hip, back) = CYCLE[self.frame % CYCLE.len()];
        self.frame += 1;

        let mut rng = rand::thread_rng();
        let mut keypoints = squat_pose(knee, hip, back, 0.9);
        for kp in &mut keypoints {
            kp.x += rng.gen_range(-JITTER..=JITTER);
            kp.y += rng.gen_range(-JITTER..=JITTER);
        }
        keypoints
    }
}

impl Default for SyntheticPoseFeed {
    fn default() -> Self {
        Self::new()
    }
}
