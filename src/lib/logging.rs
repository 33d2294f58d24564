//! Logging utilities for formatted output.
//!
//! Formatting helpers for counts, durations, and rates, plus an operation
//! timer and the end-of-run evaluation summary.

use std::time::{Duration, Instant};

use crate::synchronizer::EvalCounts;

/// Formats a count with thousands separators (e.g. "1,234,567").
#[must_use]
pub fn format_count(n: u64) -> String {
    let s = n.to_string();
    s.as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap())
        .collect::<Vec<_>>()
        .join(",")
}

/// Formats a duration in human-readable form (e.g. "2m 15s", "1h 30m").
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        let mins = secs / 60;
        let rest = secs % 60;
        if rest == 0 { format!("{mins}m") } else { format!("{mins}m {rest}s") }
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        if mins == 0 { format!("{hours}h") } else { format!("{hours}h {mins}m") }
    }
}

/// Formats a processing rate with appropriate units.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_rate(count: u64, duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        return format!("{} items/s", format_count(count));
    }
    let rate = count as f64 / secs;
    if rate >= 1.0 {
        format!("{} items/s", format_count(rate as u64))
    } else {
        format!("{:.1} items/min", count as f64 / (secs / 60.0))
    }
}

/// Logs a formatted summary of the final evaluation counts.
#[allow(clippy::cast_precision_loss)]
pub fn log_eval_summary(counts: &EvalCounts) {
    log::info!("Evaluation Summary:");
    log::info!("  True positives: {}", format_count(counts.true_positives));
    log::info!("  False positives: {}", format_count(counts.false_positives));
    log::info!("  False negatives: {}", format_count(counts.false_negatives));

    if counts.total_calls() > 0 {
        let precision = counts.true_positives as f64 / counts.total_calls() as f64;
        log::info!("  Precision: {precision:.4}");
    }
    let baseline_total = counts.true_positives + counts.false_negatives;
    if baseline_total > 0 {
        let sensitivity = counts.true_positives as f64 / baseline_total as f64;
        log::info!("  Sensitivity: {sensitivity:.4}");
    }
}

/// Operation timing and summary helper.
///
/// # Examples
///
/// ```no_run
/// use fgeval_lib::logging::OperationTimer;
///
/// let timer = OperationTimer::new("Evaluating regions");
/// // ... do work ...
/// timer.log_completion(1_000);
/// ```
pub struct OperationTimer {
    operation: String,
    start_time: Instant,
}

impl OperationTimer {
    /// Creates a new operation timer and logs the start.
    #[must_use]
    pub fn new(operation: &str) -> Self {
        log::info!("{operation} ...");
        Self { operation: operation.to_string(), start_time: Instant::now() }
    }

    /// Logs the completion with item count and rate.
    pub fn log_completion(&self, count: u64) {
        let duration = self.start_time.elapsed();
        log::info!(
            "{} completed: {} in {} ({})",
            self.operation,
            format_count(count),
            format_duration(duration),
            format_rate(count, duration)
        );
    }
}
