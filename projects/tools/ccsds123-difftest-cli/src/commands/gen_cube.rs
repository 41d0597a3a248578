use crate::error::CliError;
use argh::FromArgs;
use bytesize::ByteSize;
use ccsds123_difftest::cube::{generate_cube, CubeDimensions};
use std::path::PathBuf;

#[derive(FromArgs, Debug)]
/// Write a synthetic sawtooth image cube of 16-bit little endian samples
#[argh(subcommand, name = "gen-cube")]
pub struct GenCubeCmd {
    /// output file path
    #[argh(option, short = 'o')]
    pub output: PathBuf,

    /// number of samples per line
    #[argh(option)]
    pub nx: usize,

    /// number of lines
    #[argh(option)]
    pub ny: usize,

    /// number of bands
    #[argh(option)]
    pub nz: usize,
}

pub fn handle_gen_cube_command(cmd: GenCubeCmd) -> Result<(), CliError> {
    let dimensions = CubeDimensions::new(cmd.nx, cmd.ny, cmd.nz);
    generate_cube(&cmd.output, dimensions)?;

    println!(
        "Wrote {dimensions} cube ({}) to {}",
        ByteSize::b(dimensions.byte_len() as u64),
        cmd.output.display()
    );
    Ok(())
}
