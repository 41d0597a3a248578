use crate::error::HarnessResult;
use crate::workspace::TrialWorkspace;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Result of one simulation run.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SimulationStatus {
    pub success: bool,
    /// Exit code, if the simulation exited normally.
    pub code: Option<i32>,
}

impl SimulationStatus {
    pub const fn passed() -> Self {
        Self {
            success: true,
            code: Some(0),
        }
    }

    pub const fn failed(code: Option<i32>) -> Self {
        Self {
            success: false,
            code,
        }
    }
}

/// Simulation of the implementation under test.
///
/// Given a cube and the golden bitstream, a simulation writes the bitstream of pipeline `i`
/// to [`TrialWorkspace::pipeline_output_path`]`(i)`.
pub trait Simulator {
    /// Runs the simulation to completion.
    ///
    /// A simulation that runs but fails is reported through [`SimulationStatus`], not as an
    /// error.
    fn simulate(
        &self,
        workspace: &TrialWorkspace,
        cube: &Path,
        golden: &Path,
    ) -> HarnessResult<SimulationStatus>;
}

/// Runs a simulation script with the trial workspace as working directory.
///
/// The command line is `<program> <args...> <cube> <golden>`. A relative program path such as
/// `./simulate.sh` is resolved against the working directory of the harness, not the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSimulator {
    program: OsString,
    args: Vec<OsString>,
}

impl ScriptSimulator {
    pub const DEFAULT_PROGRAM: &'static str = "./simulate.sh";

    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Adds arguments passed before the cube and golden paths.
    pub fn with_args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &Path {
        Path::new(&self.program)
    }
}

impl Default for ScriptSimulator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROGRAM)
    }
}

impl Simulator for ScriptSimulator {
    fn simulate(
        &self,
        workspace: &TrialWorkspace,
        cube: &Path,
        golden: &Path,
    ) -> HarnessResult<SimulationStatus> {
        let mut command = Command::new(resolve_program(self.program())?);
        command
            .args(&self.args)
            .arg(cube)
            .arg(golden)
            .current_dir(workspace.path());

        let output = super::spawn_output("simulation", &mut command)?;
        if output.status.success() {
            debug!(
                stdout = %String::from_utf8_lossy(&output.stdout).trim_end(),
                "simulation finished"
            );
            return Ok(SimulationStatus::passed());
        }

        super::log_failure("simulation", &output);
        Ok(SimulationStatus::failed(output.status.code()))
    }
}

fn resolve_program(program: &Path) -> HarnessResult<PathBuf> {
    if program.is_relative() && program.components().count() > 1 {
        return Ok(env::current_dir()?.join(program));
    }
    Ok(program.to_path_buf())
}
