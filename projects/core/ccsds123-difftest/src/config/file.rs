//! JSON configuration files.
//!
//! The format is shared by the command line tools and the failure archive:
//!
//! ```json
//! {
//!   "parameters": { "D": 16, "out_word_size": 8, "out_endianness": "little", "encoder": "sample" },
//!   "images": [
//!     { "filename": "input.bip", "order": "BIP", "endianness": "little", "signed": false,
//!       "NX": 10, "NY": 10, "NZ": 9 }
//!   ]
//! }
//! ```

use super::{ConfigurationError, Endianness, PartialConfiguration};
use crate::cube::{CubeDimensions, ImageCube, SampleType, StorageOrder};
use crate::error::HarnessError;
use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Contents of a configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Fixed (possibly partial) compressor parameters.
    #[serde(default)]
    pub parameters: PartialConfiguration,
    /// Input images. Single image commands use the first entry.
    #[serde(default)]
    pub images: Vec<ImageDescriptor>,
}

/// An input image as described in a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    pub filename: PathBuf,
    pub order: StorageOrder,
    pub endianness: Endianness,
    /// Accepts both `true` and `"true"`, as older files quote it.
    #[serde(deserialize_with = "bool_or_string")]
    pub signed: bool,
    #[serde(rename = "NX")]
    pub nx: usize,
    #[serde(rename = "NY")]
    pub ny: usize,
    #[serde(rename = "NZ")]
    pub nz: usize,
}

impl ConfigFile {
    /// Reads and parses a configuration file.
    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    /// Writes the configuration file as pretty printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), HarnessError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Returns the first image, which single image commands operate on.
    pub fn first_image(&self) -> Result<&ImageDescriptor, ConfigurationError> {
        self.images.first().ok_or(ConfigurationError::NoImages)
    }
}

impl ImageDescriptor {
    /// Describes a cube that already exists on disk.
    pub fn from_cube(cube: &ImageCube, filename: PathBuf) -> Self {
        Self {
            filename,
            order: cube.order,
            endianness: cube.byte_order,
            signed: cube.sample_type == SampleType::Signed16,
            nx: cube.dimensions.nx,
            ny: cube.dimensions.ny,
            nz: cube.dimensions.nz,
        }
    }

    /// Dimensions of the image.
    pub fn dimensions(&self) -> CubeDimensions {
        CubeDimensions::new(self.nx, self.ny, self.nz)
    }

    /// Converts the descriptor into an [`ImageCube`].
    pub fn to_cube(&self) -> ImageCube {
        ImageCube {
            path: self.filename.clone(),
            dimensions: self.dimensions(),
            order: self.order,
            sample_type: if self.signed {
                SampleType::Signed16
            } else {
                SampleType::Unsigned16
            },
            byte_order: self.endianness,
        }
    }
}

fn bool_or_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Text(String),
    }

    match BoolOrString::deserialize(deserializer)? {
        BoolOrString::Bool(value) => Ok(value),
        BoolOrString::Text(text) => match text.to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(de::Error::invalid_value(
                Unexpected::Str(&text),
                &"true or false",
            )),
        },
    }
}
