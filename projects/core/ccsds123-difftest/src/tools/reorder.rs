use crate::cube::{ImageCube, StorageOrder};
use crate::error::HarnessResult;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;

/// Sample size argument of the reorder tool, in bytes.
const SAMPLE_BYTES: u8 = 2;

/// Wrapper around the `cube_rearrange` utility, which rewrites an image in another sample order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderTool {
    program: PathBuf,
}

impl ReorderTool {
    pub const DEFAULT_PROGRAM: &'static str = "cube_rearrange";

    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Builds `<program> <in> <from> <out> <to> <NX> <NY> <NZ> 2`.
    pub fn command(&self, image: &ImageCube, to: StorageOrder, output: &Path) -> Command {
        let dims = image.dimensions;
        let mut command = Command::new(&self.program);
        command
            .arg(&image.path)
            .arg(image.order.as_str())
            .arg(output)
            .arg(to.as_str())
            .arg(dims.nx.to_string())
            .arg(dims.ny.to_string())
            .arg(dims.nz.to_string())
            .arg(SAMPLE_BYTES.to_string());
        command
    }

    /// Rewrites `image` in order `to` at `output` and describes the result.
    pub fn rearrange(
        &self,
        image: &ImageCube,
        to: StorageOrder,
        output: &Path,
    ) -> HarnessResult<ImageCube> {
        info!(from = %image.order, %to, "converting image");
        super::run_tool("cube_rearrange", &mut self.command(image, to, output))?;

        Ok(ImageCube {
            path: output.to_path_buf(),
            order: to,
            ..image.clone()
        })
    }

    /// Returns `image` itself if it is already BIP, otherwise a BIP copy written to `output`.
    pub fn ensure_bip(&self, image: &ImageCube, output: &Path) -> HarnessResult<ImageCube> {
        if image.order == StorageOrder::Bip {
            return Ok(image.clone());
        }

        self.rearrange(image, StorageOrder::Bip, output)
    }
}

impl Default for ReorderTool {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROGRAM)
    }
}
