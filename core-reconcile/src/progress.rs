//! Progress Reporting
//!
//! One-way bounded handoff from the apply driver to an external observer
//! (e.g. a status display loop). The driver publishes each list's total
//! before applying it and the running count after every item; a slow
//! observer backpressures the driver instead of losing updates.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

/// Default bound of the progress channel
pub const DEFAULT_PROGRESS_CAPACITY: usize = 16;

/// A single progress event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ProgressUpdate {
    /// Size of the list about to be applied
    Total(usize),
    /// Running number of applied items, success or failure
    Count(usize),
}

/// Observer-side accumulator for progress updates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    pub total: usize,
    pub count: usize,
}

impl ProgressState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one update into the state
    ///
    /// A new `Total` starts the next list and resets the count.
    pub fn apply(&mut self, update: ProgressUpdate) {
        match update {
            ProgressUpdate::Total(total) => {
                self.total = total;
                self.count = 0;
            }
            ProgressUpdate::Count(count) => self.count = count,
        }
    }

    /// Progress percentage (0-100)
    pub fn percent(&self) -> u8 {
        if self.total > 0 {
            ((self.count as f64 / self.total as f64) * 100.0).min(100.0) as u8
        } else {
            0
        }
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.count >= self.total
    }
}

/// Sending half of the progress channel, held by the apply driver
#[derive(Debug, Clone)]
pub struct ProgressReporter {
    tx: mpsc::Sender<ProgressUpdate>,
}

impl ProgressReporter {
    /// Create a bounded progress channel
    ///
    /// Sends block once `capacity` updates are in flight, so a stalled
    /// observer slows the driver down rather than dropping updates.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ProgressUpdate>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Publish the total for the next list
    pub async fn begin_list(&self, total: usize) {
        self.send(ProgressUpdate::Total(total)).await;
    }

    /// Publish the running count after an item
    pub async fn advance(&self, count: usize) {
        self.send(ProgressUpdate::Count(count)).await;
    }

    async fn send(&self, update: ProgressUpdate) {
        // A vanished observer must not fail the run; the store mutation has
        // already happened by the time progress is published.
        if self.tx.send(update).await.is_err() {
            debug!(?update, "Progress observer hung up, dropping update");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_state_accumulates_and_resets_per_list() {
        let mut state = ProgressState::new();

        state.apply(ProgressUpdate::Total(4));
        state.apply(ProgressUpdate::Count(1));
        state.apply(ProgressUpdate::Count(2));
        assert_eq!(state.percent(), 50);
        assert!(!state.is_complete());

        state.apply(ProgressUpdate::Count(4));
        assert!(state.is_complete());

        // Next list.
        state.apply(ProgressUpdate::Total(2));
        assert_eq!(state.count, 0);
        assert_eq!(state.percent(), 0);
    }

    #[test]
    fn test_percent_with_zero_total() {
        let state = ProgressState::new();
        assert_eq!(state.percent(), 0);
        assert!(!state.is_complete());
    }

    #[test]
    fn test_update_serde_round_trip() {
        let json = serde_json::to_string(&ProgressUpdate::Total(3)).unwrap();
        assert_eq!(json, r#"{"type":"total","value":3}"#);

        let back: ProgressUpdate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ProgressUpdate::Total(3));

        let count: ProgressUpdate = serde_json::from_str(r#"{"type":"count","value":7}"#).unwrap();
        assert_eq!(count, ProgressUpdate::Count(7));
    }

    #[tokio::test]
    async fn test_updates_arrive_in_publish_order() {
        let (reporter, mut rx) = ProgressReporter::channel(8);

        reporter.begin_list(2).await;
        reporter.advance(1).await;
        reporter.advance(2).await;
        drop(reporter);

        assert_eq!(rx.recv().await, Some(ProgressUpdate::Total(2)));
        assert_eq!(rx.recv().await, Some(ProgressUpdate::Count(1)));
        assert_eq!(rx.recv().await, Some(ProgressUpdate::Count(2)));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_full_channel_blocks_until_observer_reads() {
        let (reporter, mut rx) = ProgressReporter::channel(1);

        reporter.begin_list(1).await;

        // Channel is full: the next send parks until the observer reads.
        let blocked = tokio::time::timeout(Duration::from_millis(50), reporter.advance(1)).await;
        assert!(blocked.is_err());

        assert_eq!(rx.recv().await, Some(ProgressUpdate::Total(1)));
        tokio::time::timeout(Duration::from_millis(50), reporter.advance(1))
            .await
            .expect("send should complete once capacity frees up");
        assert_eq!(rx.recv().await, Some(ProgressUpdate::Count(1)));
    }

    #[tokio::test]
    async fn test_dropped_observer_does_not_panic_the_driver() {
        let (reporter, rx) = ProgressReporter::channel(1);
        drop(rx);

        reporter.begin_list(3).await;
        reporter.advance(1).await;
    }
}
