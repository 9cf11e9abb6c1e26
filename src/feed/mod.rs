pub mod controller;
pub mod loop_worker;
pub mod synthetic;

pub use controller::FeedController;
pub use synthetic::SyntheticPoseFeed;
