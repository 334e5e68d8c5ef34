//! Debounced draft notifications.
//!
//! Drafts are saved on every keystroke. The debouncer additionally reports the
//! end of a typing burst: each keystroke re-arms a one-shot timer and only the
//! last one in a burst fires. Firing never touches the draft store.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::observability::DRAFTS_DEBOUNCE_FIRED;
use crate::types::ChatId;

/// One-shot timer re-armed by every draft change.
pub struct DraftDebouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
    fired: Arc<AtomicU64>,
}

impl DraftDebouncer {
    /// Creates a debouncer that fires `delay` after the last change.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            fired: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Cancels any pending timer and arms a new one for this change.
    pub fn schedule(&mut self, chat_id: ChatId, content: &str) {
        self.cancel();
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::trace!(%chat_id, "no tokio runtime; draft debounce skipped");
                return;
            }
        };
        let delay = self.delay;
        let fired = Arc::clone(&self.fired);
        let content_length = content.chars().count();
        self.pending = Some(handle.spawn(async move {
            tokio::time::sleep(delay).await;
            fired.fetch_add(1, Ordering::Relaxed);
            DRAFTS_DEBOUNCE_FIRED.click();
            tracing::debug!(%chat_id, content_length, "debounced save draft");
        }));
    }

    /// Cancels the pending timer, if any.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }

    /// Returns true while a timer is armed and has not fired.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|p| !p.is_finished())
    }

    /// Returns how many times the timer has fired.
    pub fn fired(&self) -> u64 {
        self.fired.load(Ordering::Relaxed)
    }
}

impl Drop for DraftDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
