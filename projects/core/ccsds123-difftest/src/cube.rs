//! Synthetic multi-band image cubes.
//!
//! Fuzz trials do not use real imagery. Instead, every cube is a sawtooth ramp in which the
//! sample at linear index `i` holds `i mod 65536`, written as little endian 16-bit words.
//! Identical dimensions always produce byte-identical files, which keeps failures easy to
//! reproduce and diagnose.

use crate::config::{ConfigurationError, Endianness};
use core::fmt;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Range of the X dimension of fuzz cubes.
pub const FUZZ_NX: (usize, usize) = (10, 100);
/// Lower bound of the Y dimension of fuzz cubes.
pub const FUZZ_MIN_NY: usize = 10;
/// Upper bound on `NX * NY` for fuzz cubes.
pub const FUZZ_MAX_PIXELS: usize = 2500;
/// Upper bound of the Z dimension of fuzz cubes.
pub const FUZZ_MAX_NZ: usize = 100;
/// Every pipeline needs at least this many bands.
pub const BANDS_PER_PIPELINE: usize = 3;

/// Dimensions of an image cube.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CubeDimensions {
    #[serde(rename = "NX")]
    pub nx: usize,
    #[serde(rename = "NY")]
    pub ny: usize,
    #[serde(rename = "NZ")]
    pub nz: usize,
}

impl CubeDimensions {
    pub const fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self { nx, ny, nz }
    }

    /// Total number of samples in the cube.
    pub const fn sample_count(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Size of the cube in bytes, for 16-bit samples.
    pub const fn byte_len(&self) -> usize {
        self.sample_count() * 2
    }
}

impl fmt::Display for CubeDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.nx, self.ny, self.nz)
    }
}

/// Order in which the samples of a multi-band image are stored.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StorageOrder {
    /// Band sequential.
    Bsq,
    /// Band interleaved by pixel.
    Bip,
    /// Band interleaved by line.
    Bil,
}

impl StorageOrder {
    /// Name used on external tool command lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            StorageOrder::Bsq => "BSQ",
            StorageOrder::Bip => "BIP",
            StorageOrder::Bil => "BIL",
        }
    }
}

impl fmt::Display for StorageOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageOrder {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "BSQ" => Ok(StorageOrder::Bsq),
            "BIP" => Ok(StorageOrder::Bip),
            "BIL" => Ok(StorageOrder::Bil),
            _ => Err(ConfigurationError::UnknownValue {
                field: "order",
                value: s.to_string(),
            }),
        }
    }
}

/// Sample data type of an image.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SampleType {
    Unsigned16,
    Signed16,
}

impl SampleType {
    /// Datatype code understood by the reference encoder.
    pub const fn encoder_code(self) -> u8 {
        match self {
            SampleType::Unsigned16 => 2,
            SampleType::Signed16 => 3,
        }
    }
}

/// Descriptor of an image cube stored on disk. Read-only once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCube {
    pub path: PathBuf,
    pub dimensions: CubeDimensions,
    pub order: StorageOrder,
    pub sample_type: SampleType,
    pub byte_order: Endianness,
}

impl ImageCube {
    /// Describes a cube produced by [`generate_cube`]: unsigned little endian samples.
    ///
    /// The ramp is written in linear scan order, and fuzz trials interpret it as band
    /// interleaved by pixel.
    pub fn synthetic(path: PathBuf, dimensions: CubeDimensions) -> Self {
        Self {
            path,
            dimensions,
            order: StorageOrder::Bip,
            sample_type: SampleType::Unsigned16,
            byte_order: Endianness::Little,
        }
    }
}

/// Writes a deterministic sawtooth cube of `NX * NY * NZ` little endian `u16` samples.
///
/// Sample `i` (linear scan order) has the value `i mod 65536`.
pub fn generate_cube(path: &Path, dimensions: CubeDimensions) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for index in 0..dimensions.sample_count() {
        writer.write_all(&(index as u16).to_le_bytes())?;
    }
    writer.flush()
}

/// Draws random fuzz cube dimensions for the given number of pipelines.
///
/// `NX` in `[10, 100]`, `NY` in `[10, floor(2500 / NX)]` and `NZ` in `[3 * pipelines, 100]`,
/// which bounds the sample count and gives every pipeline at least three bands.
pub fn sample_dimensions<R: Rng>(
    rng: &mut R,
    pipelines: u8,
) -> Result<CubeDimensions, ConfigurationError> {
    let nx = rng.gen_range(FUZZ_NX.0..=FUZZ_NX.1);
    let ny = rng.gen_range(FUZZ_MIN_NY..=FUZZ_MAX_PIXELS / nx);

    let min_nz = BANDS_PER_PIPELINE * pipelines as usize;
    if min_nz > FUZZ_MAX_NZ {
        return Err(ConfigurationError::EmptyRange {
            field: "NZ",
            min: min_nz as i64,
            max: FUZZ_MAX_NZ as i64,
        });
    }
    let nz = rng.gen_range(min_nz..=FUZZ_MAX_NZ);

    Ok(CubeDimensions::new(nx, ny, nz))
}
