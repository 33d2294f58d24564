//! Custom error types for fgeval operations.

use thiserror::Error;

/// Result type alias for fgeval operations
pub type Result<T> = std::result::Result<T, EvalError>;

/// Error type for fgeval operations
#[derive(Error, Debug)]
pub enum EvalError {
    /// A thread was interrupted while parked awaiting its commit turn.
    ///
    /// The message is fixed: callers distinguish this from I/O failure by
    /// matching the variant, and downstream tooling matches the text.
    #[error("Interrupted. Unexpectedly")]
    Interrupted,

    /// `write` was invoked for a region that is not an outstanding work unit
    /// (never dispatched, or already committed). This is a defect in the
    /// caller, not a recoverable condition.
    #[error("Region '{region}' is not an outstanding work unit")]
    UnknownRegion {
        /// The offending region name
        region: String,
    },

    /// Sink write or flush failure during commit or close.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
