pub mod keypoint;
pub mod workout;

pub use keypoint::{index, named_or_index, Keypoint};
pub use workout::{FormBreakdown, WorkoutSession};
