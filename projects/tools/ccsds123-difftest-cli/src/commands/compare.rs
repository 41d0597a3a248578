use crate::error::CliError;
use argh::FromArgs;
use ccsds123_difftest::compare_files;
use std::path::PathBuf;

#[derive(FromArgs, Debug)]
/// Compare an implementation bitstream against a golden bitstream, tolerating word padding
#[argh(subcommand, name = "compare")]
pub struct CompareCmd {
    /// bitstream produced by the implementation
    #[argh(option, short = 'a')]
    pub actual: PathBuf,

    /// golden bitstream
    #[argh(option, short = 'g')]
    pub golden: PathBuf,
}

pub fn handle_compare_command(cmd: CompareCmd) -> Result<(), CliError> {
    if !compare_files(&cmd.actual, &cmd.golden)? {
        return Err(CliError::Mismatch { actual: cmd.actual });
    }

    println!("{} matches {}", cmd.actual.display(), cmd.golden.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs;
    use tempfile::tempdir;

    fn command(actual: &[u8], golden: &[u8]) -> (tempfile::TempDir, CompareCmd) {
        let dir = tempdir().unwrap();
        let cmd = CompareCmd {
            actual: dir.path().join("out_0.bin"),
            golden: dir.path().join("golden"),
        };
        fs::write(&cmd.actual, actual).unwrap();
        fs::write(&cmd.golden, golden).unwrap();
        (dir, cmd)
    }

    #[rstest]
    #[case(&[1, 2, 3], &[1, 2, 3])]
    #[case(&[1, 2, 3, 0, 0], &[1, 2, 3])]
    #[case(&[1, 2, 3], &[1, 2, 3, 0, 0, 0, 0, 0, 0, 0])]
    fn padded_output_matches(#[case] actual: &[u8], #[case] golden: &[u8]) {
        let (_dir, cmd) = command(actual, golden);
        assert!(handle_compare_command(cmd).is_ok());
    }

    #[rstest]
    #[case(&[1, 2, 4], &[1, 2, 3])]
    #[case(&[1, 2, 3, 0, 1], &[1, 2, 3])]
    #[case(&[1, 2, 3, 0, 0, 0, 0, 0, 0, 0, 0], &[1, 2, 3])]
    fn differing_output_is_an_error(#[case] actual: &[u8], #[case] golden: &[u8]) {
        let (_dir, cmd) = command(actual, golden);
        assert!(matches!(
            handle_compare_command(cmd),
            Err(CliError::Mismatch { .. })
        ));
    }

    #[test]
    fn missing_output_is_an_io_error() {
        let (dir, mut cmd) = command(&[1], &[1]);
        cmd.actual = dir.path().join("out_7.bin");
        assert!(matches!(handle_compare_command(cmd), Err(CliError::Io(_))));
    }
}
