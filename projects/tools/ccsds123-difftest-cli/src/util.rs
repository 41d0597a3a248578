use crate::error::CliError;
use ccsds123_difftest::config::{ConfigFile, Configuration};
use ccsds123_difftest::cube::ImageCube;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the log subscriber. `RUST_LOG` selects the level unless `verbose` is set.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

/// A complete configuration and its first image, as used by the single image commands.
pub struct ImageJob {
    pub configuration: Configuration,
    pub image: ImageCube,
}

/// Loads `path`, which must fix every parameter and describe at least one image.
///
/// A relative image file name is resolved against the directory of the configuration file, so
/// archived failures can be replayed from anywhere.
pub fn load_image_job(path: &Path) -> Result<ImageJob, CliError> {
    let file = ConfigFile::load(path)?;
    let configuration = file.parameters.into_complete()?;
    let mut image = file.first_image()?.to_cube();

    if image.path.is_relative() {
        if let Some(dir) = path.parent() {
            image.path = dir.join(&image.path);
        }
    }

    Ok(ImageJob {
        configuration,
        image,
    })
}
