//! Strongly typed compressor configuration.
//!
//! A [`Configuration`] describes one complete, internally consistent parameter set for the
//! predictor and entropy coder. It can only be obtained through [`Configuration::new`] (or
//! deserialization, which goes through the same checks), so holding one means every range and
//! cross-field invariant has already been verified.
//!
//! Partial, caller-fixed parameter sets are described by [`PartialConfiguration`]; the
//! [`sampler`](crate::sampler) fills in the remaining fields.

mod error;
mod file;
mod partial;

pub use error::*;
pub use file::*;
pub use partial::*;

use core::fmt;
use core::ops::{Deref, RangeInclusive};
use derive_enum_all_values::AllValues;
use serde::{Deserialize, Serialize};

/// Legal dynamic range `D`, in bits per sample.
pub const DYNAMIC_RANGE: RangeInclusive<u8> = 2..=16;
/// Legal number of prediction bands `P`.
pub const PREDICTION_BANDS: RangeInclusive<u8> = 0..=15;
/// Legal weight component resolution `OMEGA`.
pub const WEIGHT_RESOLUTION: RangeInclusive<u8> = 4..=19;
/// Legal weight update time constant `TINC_LOG`.
pub const WEIGHT_UPDATE_INTERVAL_LOG: RangeInclusive<u8> = 4..=11;
/// Legal weight update exponent bounds `V_MIN` / `V_MAX`.
pub const WEIGHT_EXPONENT: RangeInclusive<i8> = -6..=9;
/// Legal unary length limit `UMAX`.
pub const UNARY_LENGTH_LIMIT: RangeInclusive<u8> = 8..=32;
/// Legal rescaling counter size `COUNTER_SIZE`.
pub const COUNTER_SIZE: RangeInclusive<u8> = 4..=9;
/// Smallest legal register size, regardless of `D` and `OMEGA`.
pub const MIN_REGISTER_SIZE: u8 = 32;
/// Largest legal register size.
pub const MAX_REGISTER_SIZE: u8 = 64;
/// Largest number of pipelines for which a fuzz cube can still provide `3 * pipelines` bands.
pub const MAX_PIPELINES: u8 = 33;

/// Canonical field names, in the order they are reported.
pub const FIELD_NAMES: [&str; 17] = [
    "D",
    "P",
    "R",
    "OMEGA",
    "TINC_LOG",
    "V_MIN",
    "V_MAX",
    "UMAX",
    "COUNTER_SIZE",
    "INITIAL_COUNT",
    "K",
    "mode",
    "locsum_mode",
    "encoder",
    "out_word_size",
    "out_endianness",
    "PIPELINES",
];

/// Prediction mode of the adaptive predictor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, AllValues, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionMode {
    /// Uses the directional (spatial) local differences in addition to the spectral ones.
    Full,
    /// Uses spectral local differences only.
    Reduced,
}

/// How the local sum around the current sample is formed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, AllValues, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocalSumMode {
    Neighbor,
    Column,
}

/// Entropy coder used after prediction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, AllValues, Serialize, Deserialize)]
pub enum EntropyCoder {
    /// Sample-adaptive Golomb-power-of-two coder.
    #[serde(rename = "sample")]
    SampleAdaptive,
    /// Block-adaptive (Rice) coder.
    #[serde(rename = "block")]
    BlockAdaptive,
}

/// Byte order of an output bitstream or an input image.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, AllValues, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endianness {
    Little,
    Big,
}

/// Size of one output word of the compressed bitstream.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, AllValues, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum OutputWordSize {
    One,
    Two,
    Four,
    Eight,
}

impl OutputWordSize {
    /// Largest supported output word size, in bytes.
    pub const MAX_BYTES: usize = 8;

    /// Size of the word in bytes.
    pub const fn bytes(self) -> usize {
        match self {
            OutputWordSize::One => 1,
            OutputWordSize::Two => 2,
            OutputWordSize::Four => 4,
            OutputWordSize::Eight => 8,
        }
    }

    /// Width of the output bus of the implementation, in bits.
    pub const fn bus_width(self) -> usize {
        self.bytes() * 8
    }
}

impl TryFrom<u8> for OutputWordSize {
    type Error = ConfigurationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(OutputWordSize::One),
            2 => Ok(OutputWordSize::Two),
            4 => Ok(OutputWordSize::Four),
            8 => Ok(OutputWordSize::Eight),
            _ => Err(ConfigurationError::InvalidOutputWordSize(value)),
        }
    }
}

impl From<OutputWordSize> for u8 {
    fn from(value: OutputWordSize) -> Self {
        value.bytes() as u8
    }
}

impl fmt::Display for PredictionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PredictionMode::Full => "full",
            PredictionMode::Reduced => "reduced",
        })
    }
}

impl fmt::Display for LocalSumMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LocalSumMode::Neighbor => "neighbor",
            LocalSumMode::Column => "column",
        })
    }
}

impl fmt::Display for EntropyCoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EntropyCoder::SampleAdaptive => "sample",
            EntropyCoder::BlockAdaptive => "block",
        })
    }
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Endianness::Little => "little",
            Endianness::Big => "big",
        })
    }
}

impl fmt::Display for OutputWordSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bytes())
    }
}

/// Raw field values of a configuration, before validation.
///
/// Serialized field names match the keys used by configuration files.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationFields {
    /// Dynamic range `D` (bits per sample).
    #[serde(rename = "D")]
    pub dynamic_range: u8,
    /// Number of preceding bands used for prediction, `P`.
    #[serde(rename = "P")]
    pub prediction_bands: u8,
    /// Register size `R`.
    #[serde(rename = "R")]
    pub register_size: u8,
    /// Weight component resolution `OMEGA`.
    #[serde(rename = "OMEGA")]
    pub weight_resolution: u8,
    /// Weight update scaling exponent change interval, `TINC_LOG`.
    #[serde(rename = "TINC_LOG")]
    pub weight_update_interval_log: u8,
    /// Initial weight update scaling exponent, `V_MIN`.
    #[serde(rename = "V_MIN")]
    pub weight_exponent_min: i8,
    /// Final weight update scaling exponent, `V_MAX`.
    #[serde(rename = "V_MAX")]
    pub weight_exponent_max: i8,
    /// Unary length limit `UMAX`.
    #[serde(rename = "UMAX")]
    pub unary_length_limit: u8,
    /// Rescaling counter size.
    #[serde(rename = "COUNTER_SIZE")]
    pub counter_size: u8,
    /// Initial count exponent.
    #[serde(rename = "INITIAL_COUNT")]
    pub initial_count_exponent: u8,
    /// Accumulator initialization constant `K`.
    #[serde(rename = "K")]
    pub accumulator_init_constant: u8,
    #[serde(rename = "mode")]
    pub prediction_mode: PredictionMode,
    #[serde(rename = "locsum_mode")]
    pub local_sum_mode: LocalSumMode,
    #[serde(rename = "encoder")]
    pub entropy_coder: EntropyCoder,
    #[serde(rename = "out_word_size")]
    pub output_word_size: OutputWordSize,
    #[serde(rename = "out_endianness")]
    pub output_endianness: Endianness,
    /// Number of parallel pipelines of the implementation under test.
    #[serde(rename = "PIPELINES")]
    pub pipelines: u8,
}

/// A complete, validated configuration for one trial.
///
/// Dereferences to [`ConfigurationFields`] for read access; there is no way to mutate a
/// configuration once it has been validated.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ConfigurationFields", into = "ConfigurationFields")]
pub struct Configuration(ConfigurationFields);

impl Configuration {
    /// Validates `fields` and wraps them into a [`Configuration`].
    ///
    /// # Errors
    ///
    /// Returns the first violated range or invariant:
    ///
    /// - every field within its legal range
    /// - `max(32, D + OMEGA + 2) <= R <= 64`
    /// - `V_MIN <= V_MAX`
    /// - `INITIAL_COUNT < COUNTER_SIZE`
    /// - `K <= D - 2`
    pub fn new(fields: ConfigurationFields) -> Result<Self, ConfigurationError> {
        check_range("D", fields.dynamic_range, &DYNAMIC_RANGE)?;
        check_range("P", fields.prediction_bands, &PREDICTION_BANDS)?;
        check_range("OMEGA", fields.weight_resolution, &WEIGHT_RESOLUTION)?;
        check_range(
            "TINC_LOG",
            fields.weight_update_interval_log,
            &WEIGHT_UPDATE_INTERVAL_LOG,
        )?;
        check_range("V_MIN", fields.weight_exponent_min, &WEIGHT_EXPONENT)?;
        check_range("V_MAX", fields.weight_exponent_max, &WEIGHT_EXPONENT)?;
        check_range("UMAX", fields.unary_length_limit, &UNARY_LENGTH_LIMIT)?;
        check_range("COUNTER_SIZE", fields.counter_size, &COUNTER_SIZE)?;
        check_range("PIPELINES", fields.pipelines, &(1..=MAX_PIPELINES))?;

        let minimum = min_register_size(fields.dynamic_range, fields.weight_resolution);
        if fields.register_size < minimum {
            return Err(ConfigurationError::RegisterSizeTooSmall {
                register_size: fields.register_size,
                minimum,
            });
        }
        check_range("R", fields.register_size, &(minimum..=MAX_REGISTER_SIZE))?;

        if fields.weight_exponent_min > fields.weight_exponent_max {
            return Err(ConfigurationError::InvertedWeightBounds {
                v_min: fields.weight_exponent_min,
                v_max: fields.weight_exponent_max,
            });
        }

        if fields.initial_count_exponent >= fields.counter_size {
            return Err(ConfigurationError::InitialCountTooLarge {
                initial_count: fields.initial_count_exponent,
                counter_size: fields.counter_size,
            });
        }
        check_range("INITIAL_COUNT", fields.initial_count_exponent, &(1..=u8::MAX))?;

        let maximum = max_accumulator_constant(fields.dynamic_range);
        if fields.accumulator_init_constant > maximum {
            return Err(ConfigurationError::AccumulatorConstantTooLarge {
                k: fields.accumulator_init_constant,
                maximum,
            });
        }

        Ok(Self(fields))
    }

    /// Returns the validated field values.
    pub fn fields(&self) -> &ConfigurationFields {
        &self.0
    }

    /// Returns `(name, value)` pairs for every field, in [`FIELD_NAMES`] order.
    pub fn named_values(&self) -> [(&'static str, String); 17] {
        let f = &self.0;
        let values = [
            f.dynamic_range.to_string(),
            f.prediction_bands.to_string(),
            f.register_size.to_string(),
            f.weight_resolution.to_string(),
            f.weight_update_interval_log.to_string(),
            f.weight_exponent_min.to_string(),
            f.weight_exponent_max.to_string(),
            f.unary_length_limit.to_string(),
            f.counter_size.to_string(),
            f.initial_count_exponent.to_string(),
            f.accumulator_init_constant.to_string(),
            f.prediction_mode.to_string(),
            f.local_sum_mode.to_string(),
            f.entropy_coder.to_string(),
            f.output_word_size.to_string(),
            f.output_endianness.to_string(),
            f.pipelines.to_string(),
        ];

        let mut index = 0;
        values.map(|value| {
            let name = FIELD_NAMES[index];
            index += 1;
            (name, value)
        })
    }
}

impl Deref for Configuration {
    type Target = ConfigurationFields;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<ConfigurationFields> for Configuration {
    type Error = ConfigurationError;

    fn try_from(fields: ConfigurationFields) -> Result<Self, Self::Error> {
        Self::new(fields)
    }
}

impl From<Configuration> for ConfigurationFields {
    fn from(value: Configuration) -> Self {
        value.0
    }
}

/// Smallest register size able to hold the widest intermediate value: `max(32, D + OMEGA + 2)`.
pub fn min_register_size(dynamic_range: u8, weight_resolution: u8) -> u8 {
    MIN_REGISTER_SIZE.max(dynamic_range.saturating_add(weight_resolution).saturating_add(2))
}

/// Largest accumulator initialization constant for the given dynamic range: `D - 2`.
pub fn max_accumulator_constant(dynamic_range: u8) -> u8 {
    dynamic_range.saturating_sub(2)
}

fn check_range<T>(
    field: &'static str,
    value: T,
    range: &RangeInclusive<T>,
) -> Result<(), ConfigurationError>
where
    T: Copy + PartialOrd + Into<i64>,
{
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigurationError::OutOfRange {
            field,
            value: value.into(),
            min: (*range.start()).into(),
            max: (*range.end()).into(),
        })
    }
}
