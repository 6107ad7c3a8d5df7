//! Error types for bids-automodel
//!
//! Collaborator failures pass through unchanged; the builder adds none of its own
//! beyond misuse of the public helpers.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// bids-automodel error types
#[derive(Error, Debug)]
pub enum Error {
    /// Run-level variables could not be interpreted
    #[error("Variable loading error: {0}")]
    Variables(String),

    /// Scan duration unavailable for a run
    #[error("Cannot determine scan length for run {run} of task {task}\nPass an explicit scan_length to load event variables")]
    ScanLength {
        /// Task the run belongs to
        task: String,
        /// Run identifier (entity string)
        run: String,
    },

    /// Helper called with arguments it cannot honour
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
