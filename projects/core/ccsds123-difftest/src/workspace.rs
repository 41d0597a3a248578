//! Per-trial scratch directories.
//!
//! Every artifact of a trial (cube, encoder configuration, encoded and golden bitstreams,
//! simulation parameters and pipeline outputs) lives inside one [`TrialWorkspace`], which is the
//! only place that knows their file names.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// File name of the synthetic input cube.
pub const CUBE_FILE: &str = "input.bip";
/// File name of the golden bitstream.
pub const GOLDEN_FILE: &str = "golden";
/// File name of the raw reference encoder output.
pub const ENCODED_FILE: &str = "comp_temp";
/// File name of the reference encoder configuration.
pub const ENCODER_CONFIG_FILE: &str = "emporda_config.txt";
/// File name of the simulation parameter include.
pub const SIM_PARAMS_FILE: &str = "gen_comp_params.v";
/// File name of an image converted to BIP order.
pub const CONVERTED_FILE: &str = "converted_img";

/// Scratch directory holding the artifacts of a single trial.
///
/// Temporary workspaces are deleted when dropped; persistent ones are left in place.
#[derive(Debug)]
pub struct TrialWorkspace {
    root: PathBuf,
    _temp: Option<TempDir>,
}

impl TrialWorkspace {
    /// Creates a fresh temporary workspace, under `scratch_root` if given, otherwise in the
    /// system temporary directory.
    pub fn temporary(scratch_root: Option<&Path>) -> io::Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("trial-");
        let temp = match scratch_root {
            Some(root) => {
                fs::create_dir_all(root)?;
                builder.tempdir_in(root)?
            }
            None => builder.tempdir()?,
        };

        Ok(Self {
            root: fs::canonicalize(temp.path())?,
            _temp: Some(temp),
        })
    }

    /// Uses `dir` as the workspace, creating it if needed. Its contents outlive the workspace.
    pub fn persistent(dir: &Path) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            root: fs::canonicalize(dir)?,
            _temp: None,
        })
    }

    /// Absolute path of the workspace directory.
    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn cube_path(&self) -> PathBuf {
        self.root.join(CUBE_FILE)
    }

    pub fn golden_path(&self) -> PathBuf {
        self.root.join(GOLDEN_FILE)
    }

    pub fn encoded_path(&self) -> PathBuf {
        self.root.join(ENCODED_FILE)
    }

    pub fn encoder_config_path(&self) -> PathBuf {
        self.root.join(ENCODER_CONFIG_FILE)
    }

    pub fn sim_params_path(&self) -> PathBuf {
        self.root.join(SIM_PARAMS_FILE)
    }

    pub fn converted_path(&self) -> PathBuf {
        self.root.join(CONVERTED_FILE)
    }

    /// Where the simulation writes the bitstream of `pipeline`.
    pub fn pipeline_output_path(&self, pipeline: usize) -> PathBuf {
        self.root.join(pipeline_output_file(pipeline))
    }
}

/// File name of the bitstream produced by `pipeline`.
pub fn pipeline_output_file(pipeline: usize) -> String {
    format!("out_{pipeline}.bin")
}
