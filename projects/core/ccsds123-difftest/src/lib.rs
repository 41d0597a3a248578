#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]

pub mod compare;
pub mod config;
pub mod cube;
pub mod error;
pub mod fuzz;
pub mod golden;
pub mod sampler;
pub mod sim_params;
pub mod tools;
pub mod workspace;

pub use compare::{compare_bytes, compare_files, WORD_TOLERANCE};
pub use config::{Configuration, ConfigurationError, PartialConfiguration};
pub use error::{HarnessError, HarnessResult};
pub use fuzz::{FuzzDriver, FuzzSettings, FuzzSummary, TrialOutcome, TrialRecord};
pub use golden::{GoldenBitstream, GoldenPipeline, HEADER_SIZE};

/// Common test prelude for avoiding duplicate imports in test modules
#[cfg(test)]
pub(crate) mod test_prelude;
