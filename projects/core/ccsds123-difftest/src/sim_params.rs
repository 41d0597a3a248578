//! Parameter files for the implementation under test.
//!
//! The simulation testbench includes a Verilog file with one `parameter NAME = value;` line per
//! parameter. Synthesis uses the same values through a VHDL package.

use crate::config::{Configuration, Endianness, LocalSumMode, PredictionMode};
use crate::cube::CubeDimensions;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

/// Name of the generated VHDL package.
pub const VHDL_PACKAGE: &str = "synth_params";

/// Compile time parameters of the implementation under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationParameters {
    values: Vec<(&'static str, i64)>,
    signed: bool,
}

impl SimulationParameters {
    pub fn new(config: &Configuration, dimensions: CubeDimensions, signed: bool) -> Self {
        let values = vec![
            ("NX", dimensions.nx as i64),
            ("NY", dimensions.ny as i64),
            ("NZ", dimensions.nz as i64),
            ("D", config.dynamic_range.into()),
            ("P", config.prediction_bands.into()),
            ("R", config.register_size.into()),
            ("OMEGA", config.weight_resolution.into()),
            ("TINC_LOG", config.weight_update_interval_log.into()),
            ("V_MIN", config.weight_exponent_min.into()),
            ("V_MAX", config.weight_exponent_max.into()),
            ("KZ_PRIME", config.accumulator_init_constant.into()),
            ("COUNTER_SIZE", config.counter_size.into()),
            ("INITIAL_COUNT", config.initial_count_exponent.into()),
            ("UMAX", config.unary_length_limit.into()),
            (
                "COL_ORIENTED",
                (config.local_sum_mode == LocalSumMode::Column).into(),
            ),
            (
                "REDUCED",
                (config.prediction_mode == PredictionMode::Reduced).into(),
            ),
            (
                "LITTLE_ENDIAN",
                (config.output_endianness == Endianness::Little).into(),
            ),
            ("BUS_WIDTH", config.output_word_size.bus_width() as i64),
            ("PIPELINES", config.pipelines.into()),
        ];

        Self { values, signed }
    }

    /// Parameters in the order they are written.
    pub fn values(&self) -> &[(&'static str, i64)] {
        &self.values
    }

    pub fn get(&self, name: &str) -> Option<i64> {
        self.values
            .iter()
            .find(|(key, _)| *key == name)
            .map(|&(_, value)| value)
    }

    pub fn signed(&self) -> bool {
        self.signed
    }

    pub fn to_verilog(&self) -> String {
        let mut out = String::new();
        for (name, value) in &self.values {
            let _ = writeln!(out, "parameter {name} = {value};");
        }
        out
    }

    pub fn to_vhdl(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "package {VHDL_PACKAGE} is");
        for (name, value) in &self.values {
            let _ = writeln!(out, "    constant {name} : integer := {value};");
        }
        let _ = writeln!(out, "    constant IS_SIGNED : boolean := {};", self.signed);
        let _ = writeln!(out, "end package {VHDL_PACKAGE};");
        out
    }

    /// Writes the Verilog include read by the simulation testbench.
    pub fn write_verilog(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_verilog())
    }

    /// Writes the VHDL package used for synthesis.
    pub fn write_vhdl(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_vhdl())
    }
}
