//! Test prelude for harness tests.
//!
//! Provides in-process stand-ins for the external tools, so trials can be run without the
//! reference encoder or a hardware simulator installed.

use crate::cube::ImageCube;
use crate::error::{HarnessError, HarnessResult};
use crate::golden::HEADER_SIZE;
use crate::tools::{ReferenceEncoder, SimulationStatus, Simulator};
use crate::workspace::TrialWorkspace;
use std::fs;
use std::path::Path;

/// Encoder that always writes the same output file.
pub struct FixedEncoder {
    output: Vec<u8>,
}

impl FixedEncoder {
    /// Writes a header followed by `payload`.
    pub fn new(payload: &[u8]) -> Self {
        let mut output = vec![0xA5; HEADER_SIZE];
        output.extend_from_slice(payload);
        Self { output }
    }

    /// Writes exactly `output`, header included.
    pub fn with_output(output: Vec<u8>) -> Self {
        Self { output }
    }
}

impl ReferenceEncoder for FixedEncoder {
    fn encode(&self, _image: &ImageCube, _config: &Path, output: &Path) -> HarnessResult<()> {
        fs::write(output, &self.output)?;
        Ok(())
    }
}

/// Encoder whose payload is the input cube followed by a few zero bytes.
pub struct CubeEchoEncoder;

impl ReferenceEncoder for CubeEchoEncoder {
    fn encode(&self, image: &ImageCube, _config: &Path, output: &Path) -> HarnessResult<()> {
        let mut data = vec![0x5A; HEADER_SIZE];
        data.extend(fs::read(&image.path)?);
        data.extend_from_slice(&[0; 5]);
        fs::write(output, data)?;
        Ok(())
    }
}

/// Encoder that always fails.
pub struct FailingEncoder;

impl ReferenceEncoder for FailingEncoder {
    fn encode(&self, _image: &ImageCube, _config: &Path, _output: &Path) -> HarnessResult<()> {
        Err(HarnessError::ExternalTool {
            tool: "emporda".into(),
            reason: "exit status: 1".into(),
        })
    }
}

/// Simulation that copies the golden bitstream to every pipeline output.
///
/// The pipeline count is read back from the simulation parameter include, like a testbench
/// would.
#[derive(Default)]
pub struct CopyingSimulator {
    padding: usize,
    corrupt: Option<usize>,
    skip: Option<usize>,
}

impl CopyingSimulator {
    /// Appends `padding` zero bytes to every output.
    pub fn padded(padding: usize) -> Self {
        Self {
            padding,
            ..Self::default()
        }
    }

    /// Flips a bit in the output of `pipeline`.
    pub fn corrupting(pipeline: usize) -> Self {
        Self {
            corrupt: Some(pipeline),
            ..Self::default()
        }
    }

    /// Does not write the output of `pipeline`.
    pub fn skipping(pipeline: usize) -> Self {
        Self {
            skip: Some(pipeline),
            ..Self::default()
        }
    }
}

impl Simulator for CopyingSimulator {
    fn simulate(
        &self,
        workspace: &TrialWorkspace,
        _cube: &Path,
        golden: &Path,
    ) -> HarnessResult<SimulationStatus> {
        let golden = fs::read(golden)?;
        for pipeline in 0..pipeline_count(workspace)? {
            if self.skip == Some(pipeline) {
                continue;
            }

            let mut output = golden.clone();
            output.resize(golden.len() + self.padding, 0);
            if self.corrupt == Some(pipeline) {
                output[0] ^= 0x01;
            }
            fs::write(workspace.pipeline_output_path(pipeline), output)?;
        }
        Ok(SimulationStatus::passed())
    }
}

/// Simulation that exits with the given code without writing anything.
pub struct FailingSimulator(pub i32);

impl Simulator for FailingSimulator {
    fn simulate(
        &self,
        _workspace: &TrialWorkspace,
        _cube: &Path,
        _golden: &Path,
    ) -> HarnessResult<SimulationStatus> {
        Ok(SimulationStatus::failed(Some(self.0)))
    }
}

/// Simulation that must never be reached.
pub struct PanickingSimulator;

impl Simulator for PanickingSimulator {
    fn simulate(
        &self,
        _workspace: &TrialWorkspace,
        _cube: &Path,
        _golden: &Path,
    ) -> HarnessResult<SimulationStatus> {
        panic!("simulation must not run")
    }
}

/// Reads `parameter PIPELINES = n;` from the workspace's simulation parameter include.
pub fn pipeline_count(workspace: &TrialWorkspace) -> HarnessResult<usize> {
    let params = fs::read_to_string(workspace.sim_params_path())?;
    let count = params
        .lines()
        .filter_map(|line| line.strip_prefix("parameter PIPELINES = "))
        .filter_map(|value| value.trim_end_matches(';').parse().ok())
        .next()
        .unwrap_or(0);
    Ok(count)
}
