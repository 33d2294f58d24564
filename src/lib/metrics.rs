//! Structured metrics for evaluation runs.
//!
//! One row per run, written as TSV with consistent error handling.

use std::path::Path;

use anyhow::{Context, Result};
use fgoxide::io::DelimFile;
use serde::{Deserialize, Serialize};

use crate::synchronizer::EvalCounts;

/// A metric type that can be serialized to TSV files.
pub trait Metric: Serialize + for<'de> Deserialize<'de> + Clone + Default {
    /// Human-readable name for this metric type, used in error messages.
    fn metric_name() -> &'static str;
}

/// Summary metrics of one evaluation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalMetrics {
    /// Called variants that matched a baseline variant.
    pub true_positives: u64,
    /// Called variants with no matching baseline.
    pub false_positives: u64,
    /// Baseline variants with no matching call.
    pub false_negatives: u64,
    /// tp / (tp + fp), or 0 with no calls.
    pub precision: f64,
    /// tp / (tp + fn), or 0 with no baseline variants.
    pub sensitivity: f64,
    /// Harmonic mean of precision and sensitivity.
    pub f_measure: f64,
}

impl Metric for EvalMetrics {
    fn metric_name() -> &'static str {
        "evaluation"
    }
}

impl From<EvalCounts> for EvalMetrics {
    #[allow(clippy::cast_precision_loss)]
    fn from(counts: EvalCounts) -> Self {
        let precision = if counts.total_calls() > 0 {
            counts.true_positives as f64 / counts.total_calls() as f64
        } else {
            0.0
        };
        let baseline_total = counts.true_positives + counts.false_negatives;
        let sensitivity = if baseline_total > 0 {
            counts.true_positives as f64 / baseline_total as f64
        } else {
            0.0
        };
        let f_measure = if precision + sensitivity > 0.0 {
            2.0 * precision * sensitivity / (precision + sensitivity)
        } else {
            0.0
        };
        Self {
            true_positives: counts.true_positives,
            false_positives: counts.false_positives,
            false_negatives: counts.false_negatives,
            precision,
            sensitivity,
            f_measure,
        }
    }
}

/// Write metrics to a TSV file with consistent error handling.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written to.
pub fn write_metrics<P: AsRef<Path>, T: Metric>(path: P, metrics: &[T]) -> Result<()> {
    let path_ref = path.as_ref();
    DelimFile::default().write_tsv(path_ref, metrics).with_context(|| {
        format!("Failed to write {} metrics: {}", T::metric_name(), path_ref.display())
    })
}
