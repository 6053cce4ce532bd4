//! Scheduled tasks owned by a rendered tree.
//!
//! Effect-only nodes (delayed navigation, resend countdowns) turn into tasks
//! here. Every task is tied to the tree's cancellation token: dropping the
//! tree cancels whatever has not fired yet, so a navigation can never outlive
//! the screen that scheduled it.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::dispatch::Navigator;

#[derive(Debug)]
pub(crate) struct EffectSet {
    token: CancellationToken,
}

impl EffectSet {
    pub(crate) fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// One-shot replace-navigation after a delay.
    pub(crate) fn schedule_replace(
        &self,
        navigator: Arc<dyn Navigator>,
        route: String,
        after_ms: u64,
    ) {
        let Some(handle) = runtime_handle("scheduled navigation") else {
            return;
        };
        let token = self.token.child_token();
        handle.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(Duration::from_millis(after_ms)) => {
                    navigator.replace(&route).await;
                }
            }
        });
    }

    /// A once-per-second countdown from `seconds` to zero. The returned
    /// counter is what the owning element reads.
    pub(crate) fn start_countdown(&self, seconds: u32) -> Arc<AtomicU32> {
        let remaining = Arc::new(AtomicU32::new(seconds));
        if seconds == 0 {
            return remaining;
        }
        let Some(handle) = runtime_handle("resend countdown") else {
            return remaining;
        };
        let token = self.token.child_token();
        let counter = Arc::clone(&remaining);
        handle.spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => return,
                    _ = tokio::time::sleep(Duration::from_secs(1)) => {}
                }
                if counter.fetch_sub(1, Ordering::Relaxed) <= 1 {
                    return;
                }
            }
        });
        remaining
    }
}

impl Drop for EffectSet {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Timed effects need a runtime; without one the visual tree must still come
/// out, so the effect is skipped with a warning instead of panicking.
fn runtime_handle(what: &str) -> Option<tokio::runtime::Handle> {
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => Some(handle),
        Err(_) => {
            warn!(what, "No async runtime available; timed effect skipped");
            None
        }
    }
}
