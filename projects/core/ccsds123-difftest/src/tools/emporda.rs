use crate::config::Endianness;
use crate::cube::{ImageCube, StorageOrder};
use crate::error::HarnessResult;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Software encoder that produces the expected bitstream for an image.
///
/// The output file starts with a fixed size header followed by the compressed payload.
pub trait ReferenceEncoder {
    /// Compresses `image` with the encoder configuration at `config_path` into `output_path`.
    ///
    /// # Errors
    ///
    /// [`HarnessError::ExternalTool`](crate::HarnessError::ExternalTool) if the encoder reports
    /// failure.
    fn encode(&self, image: &ImageCube, config_path: &Path, output_path: &Path)
        -> HarnessResult<()>;
}

/// The Emporda reference encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmpordaEncoder {
    program: PathBuf,
}

impl EmpordaEncoder {
    pub const DEFAULT_PROGRAM: &'static str = "emporda";

    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Builds the encoder command line:
    /// `-c -i <img> -o <out> -ig <NZ> <NY> <NX> <datatype> 0 -so <order> -e <endian> -f <cfg> -v`.
    pub fn command(&self, image: &ImageCube, config_path: &Path, output_path: &Path) -> Command {
        let dims = image.dimensions;
        let mut command = Command::new(&self.program);
        command
            .arg("-c")
            .arg("-i")
            .arg(&image.path)
            .arg("-o")
            .arg(output_path)
            .arg("-ig")
            .arg(dims.nz.to_string())
            .arg(dims.ny.to_string())
            .arg(dims.nx.to_string())
            .arg(image.sample_type.encoder_code().to_string())
            .arg("0")
            .arg("-so")
            .arg(storage_order_flag(image.order).to_string())
            .arg("-e")
            .arg(endianness_flag(image.byte_order).to_string())
            .arg("-f")
            .arg(config_path)
            .arg("-v");
        command
    }
}

impl Default for EmpordaEncoder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PROGRAM)
    }
}

impl ReferenceEncoder for EmpordaEncoder {
    fn encode(
        &self,
        image: &ImageCube,
        config_path: &Path,
        output_path: &Path,
    ) -> HarnessResult<()> {
        super::run_tool(
            "emporda",
            &mut self.command(image, config_path, output_path),
        )?;
        Ok(())
    }
}

/// Sample order flag of the encoder command line: 2 for BIP, 0 for every other order.
pub const fn storage_order_flag(order: StorageOrder) -> u8 {
    match order {
        StorageOrder::Bip => 2,
        StorageOrder::Bsq | StorageOrder::Bil => 0,
    }
}

/// Byte order flag of the encoder command line.
pub const fn endianness_flag(endianness: Endianness) -> u8 {
    match endianness {
        Endianness::Little => 1,
        Endianness::Big => 0,
    }
}
