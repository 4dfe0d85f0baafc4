//! Off-thread release of the player handle.
//!
//! Native engines can block for a noticeable time while tearing down video
//! outputs, and the host usually disposes the panel while it is closing the
//! window. The release therefore runs on Tokio's blocking pool when a runtime
//! is available. Failures and panics are logged and swallowed.
//!
//! The player travels to the worker inside [`PendingRelease`], which releases
//! it on drop. A blocking task that a shutting-down runtime discards without
//! running still releases the handle.

use crate::error::{PlaybackError, Result};
use bridge_traits::{MediaPlayer, SubscriptionId};
use std::panic::{self, AssertUnwindSafe};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Handle to an in-flight player release.
///
/// Dropping it does not cancel the release.
#[derive(Debug)]
pub struct Disposal {
    task: Option<JoinHandle<()>>,
}

impl Disposal {
    /// Disposal that has nothing left to do.
    pub(crate) fn completed() -> Self {
        Self { task: None }
    }

    /// Release `player` off the calling thread when possible.
    pub(crate) fn start(player: Box<dyn MediaPlayer>, subscription: Option<SubscriptionId>) -> Self {
        let mut pending = PendingRelease {
            player: Some(player),
            subscription,
        };

        match Handle::try_current() {
            Ok(handle) => {
                let task = handle.spawn_blocking(move || pending.release());
                Self { task: Some(task) }
            }
            Err(_) => {
                debug!("No async runtime available; releasing player inline");
                pending.release();
                Self::completed()
            }
        }
    }

    /// `true` while the release is still running.
    pub fn is_pending(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Wait for the release to finish.
    pub async fn finished(self) {
        if let Some(task) = self.task {
            if let Err(err) = task.await {
                warn!(error = %err, "Player release task did not complete");
            }
        }
    }
}

/// Owns a player until it has been released exactly once.
struct PendingRelease {
    player: Option<Box<dyn MediaPlayer>>,
    subscription: Option<SubscriptionId>,
}

impl PendingRelease {
    fn release(&mut self) {
        if let Some(player) = self.player.take() {
            log_outcome(release_player(player.as_ref(), self.subscription.take()));
        }
    }
}

impl Drop for PendingRelease {
    fn drop(&mut self) {
        if self.player.is_some() {
            debug!("Release task discarded; releasing player on drop");
            self.release();
        }
    }
}

fn release_player(player: &dyn MediaPlayer, subscription: Option<SubscriptionId>) -> Result<()> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        if let Some(id) = subscription {
            player.unsubscribe(id);
        }
        player.release()
    }));

    match outcome {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(PlaybackError::DisposalFailed(err.to_string())),
        Err(payload) => {
            let reason = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic during release".to_string());
            Err(PlaybackError::DisposalFailed(reason))
        }
    }
}

fn log_outcome(result: Result<()>) {
    match result {
        Ok(()) => debug!("Player released"),
        Err(err) => warn!(error = %err, "Ignoring failure while releasing player"),
    }
}
