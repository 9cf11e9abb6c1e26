use chrono::Utc;
use tokio::time::{Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::db::Database;
use crate::models::WorkoutSession;
use crate::tracker::WorkoutController;

use super::synthetic::SyntheticPoseFeed;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_info;

const FRAME_INTERVAL_MS: u64 = 200;

/// Drive the demo feed through the controller until the session completes
/// or the token is cancelled. Returns the persisted summary on completion,
/// None when cancelled mid-session.
pub async fn feed_loop(
    mut controller: WorkoutController,
    db: Database,
    cancel_token: CancellationToken,
) -> Option<WorkoutSession> {
    let mut ticker = tokio::time::interval(Duration::from_millis(FRAME_INTERVAL_MS));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut feed = SyntheticPoseFeed::new();

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let keypoints = feed.next_frame();
                let outcome = controller.process_frame(&keypoints, Utc::now());

                if let Some(record) = &outcome.completed_rep {
                    log_info!(
                        "rep {} complete at {}% accuracy (session avg {}%)",
                        controller.reps_completed(),
                        record.accuracy,
                        controller.average_accuracy()
                    );
                }

                if outcome.session_complete {
                    log_info!(
                        "target reached for session {}, finishing",
                        controller.session_id()
                    );
                    return Some(controller.finish(&db, Utc::now()).await);
                }
            }
            _ = cancel_token.cancelled() => {
                log_info!("feed loop shutting down for session {}", controller.session_id());
                return None;
            }
        }
    }
}
