use anyhow::{bail, Context, Result};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::db::Database;
use crate::models::WorkoutSession;
use crate::tracker::WorkoutController;

use super::loop_worker::feed_loop;

/// Lifecycle handle for the demo feed loop: one running session at a time,
/// cancellable, joinable.
pub struct FeedController {
    handle: Option<JoinHandle<Option<WorkoutSession>>>,
    cancel_token: Option<CancellationToken>,
}

impl FeedController {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
        }
    }

    pub fn start(&mut self, controller: WorkoutController, db: Database) -> Result<()> {
        if self.handle.is_some() {
            bail!("feed already active");
        }

        let cancel_token = CancellationToken::new();
        let token_clone = cancel_token.clone();

        let handle = tokio::spawn(feed_loop(controller, db, token_clone));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(())
    }

    /// Cancel the running feed and join it. Returns the summary if the
    /// session happened to complete before the cancel landed.
    pub async fn stop(&mut self) -> Result<Option<WorkoutSession>> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        match self.handle.take() {
            Some(handle) => handle.await.context("feed loop task failed to join"),
            None => Ok(None),
        }
    }

    /// Wait for the feed to finish on its own (session completion).
    pub async fn wait(&mut self) -> Result<Option<WorkoutSession>> {
        self.cancel_token.take();
        match self.handle.take() {
            Some(handle) => handle.await.context("feed loop task failed to join"),
            None => Ok(None),
        }
    }
}

impl Default for FeedController {
    fn default() -> Self {
        Self::new()
    }
}
