//! Progress tracking utilities
//!
//! A thread-safe tracker that logs a message each time a running count
//! crosses an interval boundary. Workers share one tracker and add to it as
//! regions commit.

use log::info;
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe progress tracker for logging progress at regular intervals.
///
/// # Example
/// ```
/// use fgeval_lib::progress::ProgressTracker;
///
/// let tracker = ProgressTracker::new("Committed regions").with_interval(100);
/// for _ in 0..250 {
///     tracker.log_if_needed(1); // Logs at 100 and 200
/// }
/// tracker.log_final(); // Logs "Committed regions 250 (complete)"
/// ```
pub struct ProgressTracker {
    /// Progress is logged when the count crosses multiples of this.
    interval: u64,
    /// Message prefix for log output.
    message: String,
    /// Items counted so far.
    count: AtomicU64,
}

impl ProgressTracker {
    /// Create a tracker with the given message prefix and a default
    /// interval of 100.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { interval: 100, message: message.into(), count: AtomicU64::new(0) }
    }

    /// Set the logging interval.
    #[must_use]
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval.max(1);
        self
    }

    /// Add to the count, logging once for each interval boundary crossed.
    ///
    /// Safe to call from multiple threads. Returns `true` if the new count
    /// sits exactly on an interval boundary (so `log_final` knows whether a
    /// closing message is still needed).
    pub fn log_if_needed(&self, additional: u64) -> bool {
        let prev = self.count.fetch_add(additional, Ordering::Relaxed);
        let count = prev + additional;

        for crossed in (prev / self.interval + 1)..=(count / self.interval) {
            info!("{} {}", self.message, crossed * self.interval);
        }
        count > 0 && count % self.interval == 0
    }

    /// Current count.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Log the final count if it does not sit on an interval boundary.
    pub fn log_final(&self) {
        let count = self.count();
        if count % self.interval != 0 {
            info!("{} {} (complete)", self.message, count);
        }
    }
}
