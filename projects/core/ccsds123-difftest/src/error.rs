//! Error types for harness operations.

use crate::config::ConfigurationError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for harness operations.
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Errors that can occur while running the harness.
///
/// Only [`HarnessError::ExternalTool`] and [`HarnessError::TruncatedOutput`] are scoped to a
/// single trial (see [`HarnessError::is_trial_failure`]); everything else aborts a fuzz run.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Malformed or inconsistent configuration.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration file could not be parsed or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An external tool could not be started at all.
    #[error("External tool not available: {tool}: {source}")]
    ToolNotFound {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// An external tool ran but reported failure.
    #[error("{tool} failed: {reason}")]
    ExternalTool { tool: String, reason: String },

    /// An external tool produced an output too small to contain its header.
    #[error("{} is {size} bytes, shorter than the {header} byte header", path.display())]
    TruncatedOutput {
        path: PathBuf,
        size: u64,
        header: usize,
    },
}

impl HarnessError {
    /// Whether this error only fails the current trial, rather than the whole run.
    pub fn is_trial_failure(&self) -> bool {
        matches!(
            self,
            HarnessError::ExternalTool { .. } | HarnessError::TruncatedOutput { .. }
        )
    }
}
