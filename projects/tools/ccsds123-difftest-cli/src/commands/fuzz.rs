use crate::error::CliError;
use argh::FromArgs;
use ccsds123_difftest::config::{ConfigFile, PartialConfiguration};
use ccsds123_difftest::fuzz::DEFAULT_ARCHIVE_ROOT;
use ccsds123_difftest::tools::{check_tool_available, EmpordaEncoder, ScriptSimulator};
use ccsds123_difftest::{FuzzDriver, FuzzSettings};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

#[derive(FromArgs, Debug)]
/// Run randomized trials comparing the simulation against the reference encoder
#[argh(subcommand, name = "fuzz")]
pub struct FuzzCmd {
    /// number of trials to run
    #[argh(option, short = 'n')]
    pub runs: usize,

    /// configuration file whose parameters are kept fixed [default: D=16, word size 8, little endian, sample coder]
    #[argh(option)]
    pub config: Option<PathBuf>,

    /// seed for reproducing a run [default: random]
    #[argh(option)]
    pub seed: Option<u64>,

    /// skip checking that the encoder and simulation script exist
    #[argh(switch)]
    pub skip_tool_check: bool,

    /// reference encoder executable [default: emporda]
    #[argh(option, default = "PathBuf::from(EmpordaEncoder::DEFAULT_PROGRAM)")]
    pub encoder: PathBuf,

    /// simulation script [default: ./simulate.sh]
    #[argh(option, default = "PathBuf::from(ScriptSimulator::DEFAULT_PROGRAM)")]
    pub simulator: PathBuf,

    /// directory trial workspaces are created in [default: system temporary directory]
    #[argh(option)]
    pub scratch_dir: Option<PathBuf>,

    /// directory failed trials are archived in [default: failed_runs]
    #[argh(option, default = "PathBuf::from(DEFAULT_ARCHIVE_ROOT)")]
    pub archive_dir: PathBuf,
}

pub fn handle_fuzz_command(cmd: FuzzCmd) -> Result<(), CliError> {
    let fixed = match &cmd.config {
        Some(path) => ConfigFile::load(path)?.parameters,
        None => PartialConfiguration::fuzz_defaults(),
    };

    if !cmd.skip_tool_check {
        check_tool_available("emporda", &cmd.encoder)?;
        check_tool_available("simulation", &cmd.simulator)?;
    }

    let seed = cmd.seed.unwrap_or_else(rand::random);
    info!(seed, runs = cmd.runs, "starting fuzz run");
    let mut rng = StdRng::seed_from_u64(seed);

    let driver = FuzzDriver::new(
        EmpordaEncoder::new(&cmd.encoder),
        ScriptSimulator::new(&cmd.simulator),
        FuzzSettings {
            scratch_root: cmd.scratch_dir,
            archive_root: cmd.archive_dir,
        },
    );

    let start = Instant::now();
    let summary = driver.run(cmd.runs, &fixed, &mut rng)?;

    println!("{summary}");
    for record in summary.records.iter().filter(|record| !record.outcome.passed()) {
        let archive = record
            .archive
            .as_ref()
            .map(|dir| dir.display().to_string())
            .unwrap_or_default();
        println!("Trial {}: {} {archive}", record.index, record.outcome);
    }
    println!("Fuzz run (seed {seed}) completed in {:.2?}", start.elapsed());

    if summary.all_passed() {
        Ok(())
    } else {
        Err(CliError::TrialsFailed {
            failed: summary.failed(),
            trials: summary.trials,
        })
    }
}
