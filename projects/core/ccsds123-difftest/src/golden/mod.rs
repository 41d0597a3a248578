//! Golden reference bitstream generation.
//!
//! The golden bitstream is what a correct implementation must emit for a given image and
//! configuration. It is derived from the reference encoder output in four steps:
//!
//! 1. Emit the encoder configuration file ([`EncoderConfig`]).
//! 2. Run the reference encoder.
//! 3. Strip the [`HEADER_SIZE`] byte header the implementation under test does not produce.
//! 4. Normalize the tail to the output word boundary ([`normalize_tail`]).

mod encoder_config;
mod normalize;

pub use encoder_config::*;
pub use normalize::*;

use crate::config::{Configuration, OutputWordSize};
use crate::cube::ImageCube;
use crate::error::{HarnessError, HarnessResult};
use crate::tools::ReferenceEncoder;
use crate::workspace::TrialWorkspace;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Size of the header the reference encoder writes before the payload.
pub const HEADER_SIZE: usize = 19;

/// The expected output of the implementation under test. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldenBitstream {
    path: PathBuf,
    bytes: Vec<u8>,
    word_size: OutputWordSize,
}

impl GoldenBitstream {
    /// Where the golden bitstream was written.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn word_size(&self) -> OutputWordSize {
        self.word_size
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false; a golden bitstream holds at least one word.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Builds golden bitstreams with a [`ReferenceEncoder`].
#[derive(Debug, Clone, Default)]
pub struct GoldenPipeline<E> {
    encoder: E,
}

impl<E: ReferenceEncoder> GoldenPipeline<E> {
    pub fn new(encoder: E) -> Self {
        Self { encoder }
    }

    pub fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Encodes `image` with `config` and writes the golden bitstream to
    /// [`TrialWorkspace::golden_path`].
    ///
    /// # Errors
    ///
    /// - [`HarnessError::ExternalTool`] if the encoder fails.
    /// - [`HarnessError::TruncatedOutput`] if the encoder output does not even hold a header.
    /// - [`HarnessError::Io`] if an artifact cannot be written or read.
    pub fn build(
        &self,
        config: &Configuration,
        image: &ImageCube,
        workspace: &TrialWorkspace,
    ) -> HarnessResult<GoldenBitstream> {
        let config_path = workspace.encoder_config_path();
        EncoderConfig::from_configuration(config, image.dimensions, image.order)
            .write(&config_path)?;
        debug!(path = %config_path.display(), "wrote encoder configuration");

        let encoded_path = workspace.encoded_path();
        self.encoder.encode(image, &config_path, &encoded_path)?;

        let encoded = fs::read(&encoded_path)?;
        if encoded.len() < HEADER_SIZE {
            return Err(HarnessError::TruncatedOutput {
                path: encoded_path,
                size: encoded.len() as u64,
                header: HEADER_SIZE,
            });
        }

        let word_size = config.output_word_size;
        let bytes = normalize_tail(&encoded[HEADER_SIZE..], word_size);
        let path = workspace.golden_path();
        fs::write(&path, &bytes)?;
        debug!(
            encoded = encoded.len(),
            golden = bytes.len(),
            %word_size,
            "wrote golden bitstream"
        );

        Ok(GoldenBitstream {
            path,
            bytes,
            word_size,
        })
    }
}
