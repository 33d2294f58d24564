//! Common CLI options shared across commands.
//!
//! Shared argument structures composed into command structs with
//! `#[command(flatten)]`.

use std::path::PathBuf;

use clap::Args;

use fgeval_lib::validation::validate_file_exists;

/// Input/output options for commands that read a baseline and a call set
/// and write classified output.
#[derive(Debug, Clone, Args)]
pub struct VcfIoOptions {
    /// Baseline (truth) VCF file
    #[arg(short = 'b', long = "baseline")]
    pub baseline: PathBuf,

    /// Called variants VCF file
    #[arg(short = 'c', long = "calls")]
    pub calls: PathBuf,

    /// Output directory for classified records
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
}

impl VcfIoOptions {
    /// Validates that both input files exist.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first missing input.
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_file_exists(&self.baseline, "Baseline VCF")?;
        validate_file_exists(&self.calls, "Calls VCF")?;
        Ok(())
    }
}

/// Threading options for parallel commands.
#[derive(Debug, Clone, Args)]
pub struct ThreadingOptions {
    /// Number of worker threads
    #[arg(short = 't', long = "threads", default_value = "4")]
    pub threads: usize,
}
