//! Input validation utilities
//!
//! Common validation for command-line parameters and file paths with
//! consistent error messages.

use std::path::Path;

use anyhow::{bail, Result};

/// Validate that a file exists
///
/// # Arguments
/// * `path` - Path to validate
/// * `description` - Human-readable description of the file (e.g., "Baseline VCF")
///
/// # Errors
/// Returns an error if the file does not exist
///
/// # Example
/// ```
/// use fgeval_lib::validation::validate_file_exists;
///
/// let result = validate_file_exists("/nonexistent/file.vcf", "Baseline VCF");
/// assert!(result.is_err());
/// ```
pub fn validate_file_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        bail!("{description} does not exist: {}", path_ref.display());
    }
    Ok(())
}

/// Validate that a directory exists and is a directory
///
/// # Errors
/// Returns an error if the path does not exist or is not a directory
pub fn validate_directory_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    if !path_ref.is_dir() {
        bail!("{description} is not a directory: {}", path_ref.display());
    }
    Ok(())
}
