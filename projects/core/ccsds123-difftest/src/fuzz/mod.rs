//! Randomized differential testing.
//!
//! Each trial samples a configuration and cube, builds the golden bitstream with the reference
//! encoder, runs the simulation of the implementation under test and compares every pipeline
//! output against the golden bitstream. Failed trials are archived with everything needed to
//! reproduce them.
//!
//! Steps of a trial run strictly in sequence, and the first hard failure ends the trial: no
//! simulation without a golden bitstream, no comparison after a failed simulation. Failures of
//! the external tools only fail the trial; configuration and I/O errors abort the whole run.

mod archive;
mod coverage;

pub use archive::*;
pub use coverage::*;

use crate::compare::compare_files;
use crate::config::{Configuration, PartialConfiguration};
use crate::cube::{generate_cube, sample_dimensions, CubeDimensions, ImageCube};
use crate::error::HarnessResult;
use crate::golden::GoldenPipeline;
use crate::sampler;
use crate::sim_params::SimulationParameters;
use crate::tools::{ReferenceEncoder, Simulator};
use crate::workspace::TrialWorkspace;
use core::fmt;
use rand::Rng;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Default directory failed trials are archived under.
pub const DEFAULT_ARCHIVE_ROOT: &str = "failed_runs";

/// Where a fuzz run keeps its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzSettings {
    /// Parent of the per-trial workspaces. The system temporary directory if `None`.
    pub scratch_root: Option<PathBuf>,
    /// Parent of the failure archive directories.
    pub archive_root: PathBuf,
}

impl Default for FuzzSettings {
    fn default() -> Self {
        Self {
            scratch_root: None,
            archive_root: PathBuf::from(DEFAULT_ARCHIVE_ROOT),
        }
    }
}

/// How a trial ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrialOutcome {
    /// Every pipeline output matched the golden bitstream.
    Passed,
    /// The golden bitstream could not be built.
    EncoderFailed { reason: String },
    /// The simulation exited unsuccessfully.
    SimulationFailed { code: Option<i32> },
    /// These pipelines produced a mismatching output, or none at all.
    Mismatch { pipelines: Vec<usize> },
}

impl TrialOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, TrialOutcome::Passed)
    }
}

impl fmt::Display for TrialOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrialOutcome::Passed => f.write_str("passed"),
            TrialOutcome::EncoderFailed { reason } => write!(f, "reference encoder failed: {reason}"),
            TrialOutcome::SimulationFailed { code: Some(code) } => {
                write!(f, "simulation failed with exit code {code}")
            }
            TrialOutcome::SimulationFailed { code: None } => {
                f.write_str("simulation terminated by a signal")
            }
            TrialOutcome::Mismatch { pipelines } => write!(f, "mismatch in pipelines {pipelines:?}"),
        }
    }
}

/// Everything known about a finished trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialRecord {
    pub index: usize,
    pub configuration: Configuration,
    pub dimensions: CubeDimensions,
    pub outcome: TrialOutcome,
    /// Archive directory of a failed trial.
    pub archive: Option<PathBuf>,
}

/// Result of a fuzz run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzSummary {
    pub trials: usize,
    pub passed: usize,
    pub coverage: Coverage,
    pub records: Vec<TrialRecord>,
}

impl FuzzSummary {
    pub fn failed(&self) -> usize {
        self.trials - self.passed
    }

    pub fn all_passed(&self) -> bool {
        self.passed == self.trials
    }
}

impl fmt::Display for FuzzSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Done. {} out of {} tests passed.", self.passed, self.trials)?;
        writeln!(f)?;
        writeln!(f, "Parameters that have been covered:")?;
        write!(f, "{}", self.coverage)
    }
}

/// Runs fuzz trials against a reference encoder and a simulation.
pub struct FuzzDriver<E, S> {
    golden: GoldenPipeline<E>,
    simulator: S,
    archive: FailureArchive,
    scratch_root: Option<PathBuf>,
}

impl<E: ReferenceEncoder, S: Simulator> FuzzDriver<E, S> {
    pub fn new(encoder: E, simulator: S, settings: FuzzSettings) -> Self {
        Self {
            golden: GoldenPipeline::new(encoder),
            simulator,
            archive: FailureArchive::new(settings.archive_root),
            scratch_root: settings.scratch_root,
        }
    }

    pub fn archive(&self) -> &FailureArchive {
        &self.archive
    }

    /// Runs `trials` trials, each completing `fixed` with values drawn from `rng`.
    ///
    /// # Errors
    ///
    /// Configuration and I/O errors, which abort the run. Failing trials are not errors; they
    /// are counted in the returned summary.
    pub fn run<R: Rng>(
        &self,
        trials: usize,
        fixed: &PartialConfiguration,
        rng: &mut R,
    ) -> HarnessResult<FuzzSummary> {
        let mut summary = FuzzSummary {
            trials,
            passed: 0,
            coverage: Coverage::new(),
            records: Vec::with_capacity(trials),
        };

        for index in 0..trials {
            let record = self.run_trial(index, fixed, rng)?;
            summary.coverage.record(&record.configuration);
            if record.outcome.passed() {
                summary.passed += 1;
            }
            summary.records.push(record);
        }

        info!(
            passed = summary.passed,
            failed = summary.failed(),
            "fuzz run finished"
        );
        Ok(summary)
    }

    /// Samples a configuration and cube dimensions, then runs one trial with them.
    pub fn run_trial<R: Rng>(
        &self,
        index: usize,
        fixed: &PartialConfiguration,
        rng: &mut R,
    ) -> HarnessResult<TrialRecord> {
        let configuration = sampler::sample(fixed, rng)?;
        let dimensions = sample_dimensions(rng, configuration.pipelines)?;
        self.evaluate_trial(index, configuration, dimensions)
    }

    /// Runs one trial with a given configuration and cube size.
    pub fn evaluate_trial(
        &self,
        index: usize,
        configuration: Configuration,
        dimensions: CubeDimensions,
    ) -> HarnessResult<TrialRecord> {
        info!(trial = index, %dimensions, pipelines = configuration.pipelines, "starting trial");
        for (name, value) in configuration.named_values() {
            debug!(trial = index, "{name} = {value}");
        }

        let workspace = TrialWorkspace::temporary(self.scratch_root.as_deref())?;
        let image = ImageCube::synthetic(workspace.cube_path(), dimensions);
        generate_cube(&image.path, dimensions)?;
        SimulationParameters::new(&configuration, dimensions, false)
            .write_verilog(&workspace.sim_params_path())?;

        let outcome = self.execute(&configuration, &image, &workspace)?;
        let archive = if outcome.passed() {
            info!(trial = index, "trial passed");
            None
        } else {
            warn!(trial = index, %outcome, "trial failed");
            Some(self.archive.store(&configuration, &image, &workspace)?)
        };

        Ok(TrialRecord {
            index,
            configuration,
            dimensions,
            outcome,
            archive,
        })
    }

    fn execute(
        &self,
        configuration: &Configuration,
        image: &ImageCube,
        workspace: &TrialWorkspace,
    ) -> HarnessResult<TrialOutcome> {
        let golden = match self.golden.build(configuration, image, workspace) {
            Ok(golden) => golden,
            Err(error) if error.is_trial_failure() => {
                return Ok(TrialOutcome::EncoderFailed {
                    reason: error.to_string(),
                })
            }
            Err(error) => return Err(error),
        };

        let status = self
            .simulator
            .simulate(workspace, &image.path, golden.path())?;
        if !status.success {
            return Ok(TrialOutcome::SimulationFailed { code: status.code });
        }

        let mut pipelines = Vec::new();
        for pipeline in 0..configuration.pipelines as usize {
            let output = workspace.pipeline_output_path(pipeline);
            if !output.exists() {
                warn!(pipeline, "simulation produced no output");
                pipelines.push(pipeline);
            } else if !compare_files(&output, golden.path())? {
                warn!(pipeline, "output differs from golden bitstream");
                pipelines.push(pipeline);
            }
        }

        if pipelines.is_empty() {
            Ok(TrialOutcome::Passed)
        } else {
            Ok(TrialOutcome::Mismatch { pipelines })
        }
    }
}
