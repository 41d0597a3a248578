#![allow(unexpected_cfgs)]
#![cfg(not(tarpaulin_include))]

mod commands;
mod error;
mod util;
use argh::FromArgs;
use core::error::Error;

#[derive(FromArgs, Debug)]
/// Differential testing of CCSDS-123 compressor implementations against the reference encoder
struct TopLevel {
    /// log debug output (overrides RUST_LOG)
    #[argh(switch, short = 'v')]
    verbose: bool,

    #[argh(subcommand)]
    command: Commands,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Commands {
    Fuzz(commands::fuzz::FuzzCmd),
    GenCube(commands::gen_cube::GenCubeCmd),
    GenSimRef(commands::gen_sim_ref::GenSimRefCmd),
    GenImplParams(commands::gen_impl_params::GenImplParamsCmd),
    Compare(commands::compare::CompareCmd),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli: TopLevel = argh::from_env();
    util::init_logging(cli.verbose);

    match cli.command {
        Commands::Fuzz(cmd) => {
            commands::fuzz::handle_fuzz_command(cmd)?;
        }
        Commands::GenCube(cmd) => {
            commands::gen_cube::handle_gen_cube_command(cmd)?;
        }
        Commands::GenSimRef(cmd) => {
            commands::gen_sim_ref::handle_gen_sim_ref_command(cmd)?;
        }
        Commands::GenImplParams(cmd) => {
            commands::gen_impl_params::handle_gen_impl_params_command(cmd)?;
        }
        Commands::Compare(cmd) => {
            commands::compare::handle_compare_command(cmd)?;
        }
    }

    Ok(())
}
