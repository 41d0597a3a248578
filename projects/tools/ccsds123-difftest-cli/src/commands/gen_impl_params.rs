use crate::error::CliError;
use crate::util::load_image_job;
use argh::FromArgs;
use ccsds123_difftest::cube::SampleType;
use ccsds123_difftest::sim_params::SimulationParameters;
use std::path::PathBuf;

#[derive(FromArgs, Debug)]
/// Write the Verilog and VHDL parameter files of the implementation for a configured image
#[argh(subcommand, name = "gen-impl-params")]
pub struct GenImplParamsCmd {
    /// configuration file fixing every parameter and describing the image
    #[argh(option, short = 'c')]
    pub config: PathBuf,

    /// output path of the Verilog include [default: tb/impl_params.v]
    #[argh(option, default = "PathBuf::from(\"tb/impl_params.v\")")]
    pub verilog: PathBuf,

    /// output path of the VHDL package [default: tb/synth_params.vhd]
    #[argh(option, default = "PathBuf::from(\"tb/synth_params.vhd\")")]
    pub vhdl: PathBuf,
}

pub fn handle_gen_impl_params_command(cmd: GenImplParamsCmd) -> Result<(), CliError> {
    let job = load_image_job(&cmd.config)?;
    let params = SimulationParameters::new(
        &job.configuration,
        job.image.dimensions,
        job.image.sample_type == SampleType::Signed16,
    );

    params.write_verilog(&cmd.verilog)?;
    params.write_vhdl(&cmd.vhdl)?;

    println!(
        "Wrote {} and {}",
        cmd.verilog.display(),
        cmd.vhdl.display()
    );
    Ok(())
}
