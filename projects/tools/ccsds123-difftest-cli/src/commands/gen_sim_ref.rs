use crate::error::CliError;
use crate::util::load_image_job;
use argh::FromArgs;
use ccsds123_difftest::cube::SampleType;
use ccsds123_difftest::sim_params::SimulationParameters;
use ccsds123_difftest::tools::{EmpordaEncoder, ReorderTool};
use ccsds123_difftest::workspace::TrialWorkspace;
use ccsds123_difftest::GoldenPipeline;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(FromArgs, Debug)]
/// Generate the simulation parameter include and golden bitstream for a configured image
#[argh(subcommand, name = "gen-sim-ref")]
pub struct GenSimRefCmd {
    /// configuration file fixing every parameter and describing the image
    #[argh(option, short = 'c')]
    pub config: PathBuf,

    /// output path of the Verilog parameter include
    #[argh(option)]
    pub params: PathBuf,

    /// output path of the golden bitstream
    #[argh(option)]
    pub golden: PathBuf,

    /// reference encoder executable [default: emporda]
    #[argh(option, default = "PathBuf::from(EmpordaEncoder::DEFAULT_PROGRAM)")]
    pub encoder: PathBuf,

    /// image reorder executable [default: cube_rearrange]
    #[argh(option, default = "PathBuf::from(ReorderTool::DEFAULT_PROGRAM)")]
    pub reorder: PathBuf,

    /// keep intermediate files in this directory [default: temporary directory]
    #[argh(option)]
    pub work_dir: Option<PathBuf>,
}

pub fn handle_gen_sim_ref_command(cmd: GenSimRefCmd) -> Result<(), CliError> {
    let job = load_image_job(&cmd.config)?;
    let workspace = match &cmd.work_dir {
        Some(dir) => TrialWorkspace::persistent(dir)?,
        None => TrialWorkspace::temporary(None)?,
    };

    let image = ReorderTool::new(&cmd.reorder).ensure_bip(&job.image, &workspace.converted_path())?;

    SimulationParameters::new(
        &job.configuration,
        image.dimensions,
        image.sample_type == SampleType::Signed16,
    )
    .write_verilog(&cmd.params)?;
    info!(path = %cmd.params.display(), "wrote simulation parameters");

    let golden = GoldenPipeline::new(EmpordaEncoder::new(&cmd.encoder)).build(
        &job.configuration,
        &image,
        &workspace,
    )?;
    fs::write(&cmd.golden, golden.bytes())?;

    println!(
        "Wrote {} byte golden bitstream to {}",
        golden.len(),
        cmd.golden.display()
    );
    Ok(())
}
