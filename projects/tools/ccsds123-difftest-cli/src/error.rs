use ccsds123_difftest::{ConfigurationError, HarnessError};
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Harness(#[from] HarnessError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("{failed} out of {trials} trials failed")]
    TrialsFailed { failed: usize, trials: usize },
    #[error("{} does not match the golden bitstream", actual.display())]
    Mismatch { actual: PathBuf },
}

impl From<ConfigurationError> for CliError {
    fn from(error: ConfigurationError) -> Self {
        CliError::Harness(error.into())
    }
}
