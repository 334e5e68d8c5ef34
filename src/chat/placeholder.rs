//! Rotating placeholder hints for the chat input.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};

use crate::observability::INPUT_PLACEHOLDER_TICKS;

/// Cycles through a fixed list of example prompts.
///
/// The index starts at zero and wraps after the last example. When a ticker is
/// running it advances the index on every tick; the ticker is aborted when the
/// rotation is dropped.
pub struct PlaceholderRotation {
    examples: Arc<[String]>,
    index: Arc<AtomicUsize>,
    ticker: Option<JoinHandle<()>>,
}

impl PlaceholderRotation {
    /// Creates a rotation over `examples`, positioned at the first one.
    pub fn new<I, S>(examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let examples: Vec<String> = examples.into_iter().map(Into::into).collect();
        Self {
            examples: examples.into(),
            index: Arc::new(AtomicUsize::new(0)),
            ticker: None,
        }
    }

    /// Starts advancing once per `period` on the current tokio runtime.
    ///
    /// Restarts from the first example. Without a runtime the rotation stays put.
    pub fn start(&mut self, period: Duration) {
        self.stop();
        self.index.store(0, Ordering::Relaxed);
        if self.examples.len() < 2 || period.is_zero() {
            return;
        }
        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(_) => {
                tracing::warn!("no tokio runtime; placeholder rotation disabled");
                return;
            }
        };
        let index = Arc::clone(&self.index);
        let len = self.examples.len();
        self.ticker = Some(handle.spawn(async move {
            let mut ticks = interval_at(Instant::now() + period, period);
            loop {
                ticks.tick().await;
                advance_index(&index, len);
                INPUT_PLACEHOLDER_TICKS.click();
            }
        }));
    }

    /// Stops the ticker, leaving the current example in place.
    pub fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }

    /// Returns true while a ticker is running.
    pub fn is_running(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Advances to the next example by hand.
    pub fn advance(&self) {
        if !self.examples.is_empty() {
            advance_index(&self.index, self.examples.len());
        }
    }

    /// Returns the index of the current example.
    pub fn index(&self) -> usize {
        self.index.load(Ordering::Relaxed)
    }

    /// Returns the current example, or the empty string when there are none.
    pub fn current(&self) -> &str {
        self.examples
            .get(self.index())
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Returns the number of examples.
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    /// Returns true when there are no examples.
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}

impl Drop for PlaceholderRotation {
    fn drop(&mut self) {
        self.stop();
    }
}

fn advance_index(index: &AtomicUsize, len: usize) {
    let _ = index.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |i| {
        Some((i + 1) % len)
    });
}
