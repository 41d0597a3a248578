use crate::config::{ConfigFile, Configuration, ImageDescriptor, PartialConfiguration};
use crate::cube::ImageCube;
use crate::error::HarnessResult;
use crate::workspace::{TrialWorkspace, CUBE_FILE};
use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Name of the replayable configuration stored with every archived failure.
pub const ARCHIVE_CONFIG_FILE: &str = "conf.json";

/// Timestamp format of archive directory names.
const TIMESTAMP_FORMAT: &str = "%m%d-%H%M%S";

/// Keeps the artifacts of failed trials for later investigation.
///
/// Every failure is stored in its own directory `<root>/<MMDD-HHMMSS>` (UTC). Failures within
/// the same second get a `-<n>` suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureArchive {
    root: PathBuf,
}

impl FailureArchive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Copies the artifacts of a failed trial into a fresh archive directory.
    ///
    /// Artifacts the trial never produced (a golden bitstream after an encoder failure, or a
    /// pipeline output the simulation did not write) are skipped and logged.
    pub fn store(
        &self,
        config: &Configuration,
        image: &ImageCube,
        workspace: &TrialWorkspace,
    ) -> HarnessResult<PathBuf> {
        let dir = self.create_dir(Utc::now())?;

        let mut artifacts = vec![
            workspace.cube_path(),
            workspace.golden_path(),
            workspace.sim_params_path(),
        ];
        artifacts.extend((0..config.pipelines as usize).map(|i| workspace.pipeline_output_path(i)));

        for artifact in &artifacts {
            let Some(name) = artifact.file_name() else {
                continue;
            };
            if artifact.exists() {
                fs::copy(artifact, dir.join(name))?;
            } else {
                warn!(artifact = %artifact.display(), "artifact missing, not archived");
            }
        }

        let record = ConfigFile {
            parameters: PartialConfiguration::from(*config),
            images: vec![ImageDescriptor::from_cube(image, PathBuf::from(CUBE_FILE))],
        };
        record.save(&dir.join(ARCHIVE_CONFIG_FILE))?;

        info!(dir = %dir.display(), "archived failed trial");
        Ok(dir)
    }

    /// Creates the archive directory for a failure at `now`.
    pub fn create_dir(&self, now: DateTime<Utc>) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.root)?;

        let stamp = now.format(TIMESTAMP_FORMAT).to_string();
        let mut suffix = 0usize;
        loop {
            let name = match suffix {
                0 => stamp.clone(),
                n => format!("{stamp}-{n}"),
            };
            let dir = self.root.join(name);
            match fs::create_dir(&dir) {
                Ok(()) => return Ok(dir),
                Err(error) if error.kind() == io::ErrorKind::AlreadyExists => suffix += 1,
                Err(error) => return Err(error),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::reference_fields;
    use crate::cube::{generate_cube, CubeDimensions, StorageOrder};
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 7, 14, 5, 9).unwrap()
    }

    #[test]
    fn names_directory_after_timestamp() {
        let dir = tempdir().unwrap();
        let archive = FailureArchive::new(dir.path().join("failed_runs"));

        let created = archive.create_dir(timestamp()).unwrap();

        assert_eq!(created, dir.path().join("failed_runs").join("0307-140509"));
        assert!(created.is_dir());
    }

    #[test]
    fn same_second_failures_get_fresh_directories() {
        let dir = tempdir().unwrap();
        let archive = FailureArchive::new(dir.path());

        let first = archive.create_dir(timestamp()).unwrap();
        let second = archive.create_dir(timestamp()).unwrap();
        let third = archive.create_dir(timestamp()).unwrap();

        assert_eq!(first.file_name().unwrap(), "0307-140509");
        assert_eq!(second.file_name().unwrap(), "0307-140509-1");
        assert_eq!(third.file_name().unwrap(), "0307-140509-2");
    }

    #[test]
    fn stores_present_artifacts_and_config() {
        let dir = tempdir().unwrap();
        let workspace = TrialWorkspace::temporary(Some(dir.path())).unwrap();
        let config = Configuration::new(reference_fields()).unwrap();
        let dims = CubeDimensions::new(10, 10, 9);
        let image = ImageCube::synthetic(workspace.cube_path(), dims);

        generate_cube(&image.path, dims).unwrap();
        fs::write(workspace.golden_path(), [1u8, 2, 3]).unwrap();
        fs::write(workspace.sim_params_path(), "parameter NX = 10;\n").unwrap();
        fs::write(workspace.pipeline_output_path(0), [1u8, 2, 3]).unwrap();
        fs::write(workspace.pipeline_output_path(2), [9u8]).unwrap();

        let archive = FailureArchive::new(dir.path().join("failed_runs"));
        let stored = archive.store(&config, &image, &workspace).unwrap();

        for name in ["input.bip", "golden", "gen_comp_params.v", "out_0.bin", "out_2.bin"] {
            assert!(stored.join(name).is_file(), "{name} missing");
        }
        assert!(!stored.join("out_1.bin").exists());
        assert_eq!(fs::read(stored.join("out_2.bin")).unwrap(), [9]);

        let replay = ConfigFile::load(&stored.join(ARCHIVE_CONFIG_FILE)).unwrap();
        assert_eq!(replay.parameters.into_complete().unwrap(), config);
        let image = replay.first_image().unwrap();
        assert_eq!(image.filename, PathBuf::from("input.bip"));
        assert_eq!(image.order, StorageOrder::Bip);
        assert!(!image.signed);
        assert_eq!(image.dimensions(), dims);
    }
}
