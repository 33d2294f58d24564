//! Evaluate called variants against a baseline truth set.
//!
//! Loads both VCF files, groups records by reference sequence into ordered
//! per-region sets, and runs the worker pool over the ordered-commit
//! synchronizer. Classified records land in `tp.vcf`, `fp.vcf`, and
//! `fn.vcf` under the output directory, each preceded by the calls-file
//! header, ordered by region dispatch order and by input order within a
//! region.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use fgeval_lib::logging::{format_count, log_eval_summary, OperationTimer};
use fgeval_lib::matcher::ExactMatcher;
use fgeval_lib::metrics::{write_metrics, EvalMetrics};
use fgeval_lib::pool::run_workers;
use fgeval_lib::progress::ProgressTracker;
use fgeval_lib::sink::SplitSinks;
use fgeval_lib::source::VecSource;
use fgeval_lib::synchronizer::EvalSynchronizer;
use fgeval_lib::vcf_io::{read_regions, serialize_header};

use crate::commands::command::Command;
use crate::commands::common::{ThreadingOptions, VcfIoOptions};

/// Evaluate a call set against a baseline truth set.
///
/// Regions are evaluated in parallel but committed in dispatch order, so
/// the output is reproducible for a given pair of inputs regardless of
/// thread scheduling.
#[derive(Debug, Parser)]
#[command(
    name = "eval",
    about = "Evaluate called variants against a baseline truth set",
    long_about = r#"
Evaluate called variants against a baseline truth set, per reference
sequence, writing classified records to three output streams:

  tp.vcf - called variants that match a baseline variant
  fp.vcf - called variants with no matching baseline
  fn.vcf - baseline variants with no matching call

Each stream begins with the calls-file header. Records appear in region
dispatch order and, within a region, in input order, so output is
byte-for-byte reproducible across runs regardless of --threads.

Example usage:
  fgeval eval -b truth.vcf -c calls.vcf -o eval_out
  fgeval eval -b truth.vcf.gz -c calls.vcf.gz -o eval_out -t 8 --summary eval_out/summary.txt
"#
)]
pub struct Eval {
    /// Input/output options
    #[command(flatten)]
    pub io: VcfIoOptions,

    /// Threading options
    #[command(flatten)]
    pub threading: ThreadingOptions,

    /// Optional output file for summary metrics (TSV)
    #[arg(long = "summary")]
    pub summary: Option<PathBuf>,

    /// Progress logging interval, in regions
    #[arg(long = "progress-interval", default_value = "100")]
    pub progress_interval: u64,
}

impl Command for Eval {
    fn execute(&self) -> Result<()> {
        self.io.validate()?;
        std::fs::create_dir_all(&self.io.output).with_context(|| {
            format!("Failed to create output directory: {}", self.io.output.display())
        })?;

        let timer = OperationTimer::new("Evaluating variants");
        info!("Baseline: {}", self.io.baseline.display());
        info!("Calls: {}", self.io.calls.display());
        info!("Output: {}", self.io.output.display());
        info!("Threads: {}", self.threading.threads);

        let (header, regions) = read_regions(&self.io.baseline, &self.io.calls)?;
        let header_text = serialize_header(&header)?;
        let region_count = regions.len() as u64;
        info!("Loaded {} regions", format_count(region_count));

        let sinks = SplitSinks::new(
            &header_text,
            create_sink_file(&self.io.output, "tp.vcf")?,
            create_sink_file(&self.io.output, "fp.vcf")?,
            create_sink_file(&self.io.output, "fn.vcf")?,
        )?;
        let sync = EvalSynchronizer::new(VecSource::new(regions), sinks);
        let progress =
            ProgressTracker::new("Committed regions").with_interval(self.progress_interval);

        // Close the sinks on every exit path; the run error, if any, wins.
        let run_result = run_workers(self.threading.threads, &sync, &ExactMatcher, &progress);
        let close_result = sync.close();
        run_result?;
        close_result?;
        progress.log_final();

        let counts = sync.counts();
        log_eval_summary(&counts);
        if let Some(path) = &self.summary {
            write_metrics(path, &[EvalMetrics::from(counts)])?;
            info!("Wrote summary metrics: {}", path.display());
        }

        timer.log_completion(region_count);
        Ok(())
    }
}

fn create_sink_file(dir: &std::path::Path, name: &str) -> Result<File> {
    let path = dir.join(name);
    File::create(&path).with_context(|| format!("Failed to create output file: {}", path.display()))
}
