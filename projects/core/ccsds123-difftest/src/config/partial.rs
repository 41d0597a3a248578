//! Builder for partially fixed configurations.

use super::*;

/// A configuration in which any subset of fields may be fixed.
///
/// Fields left as `None` are drawn at random by the [`sampler`](crate::sampler); fixed fields are
/// passed through unchanged and always take priority.
///
/// ```
/// use ccsds123_difftest::config::{Endianness, EntropyCoder, OutputWordSize, PartialConfiguration};
///
/// let fixed = PartialConfiguration::new()
///     .dynamic_range(16)
///     .output_word_size(OutputWordSize::Eight)
///     .output_endianness(Endianness::Little)
///     .entropy_coder(EntropyCoder::SampleAdaptive);
/// assert_eq!(fixed.dynamic_range, Some(16));
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialConfiguration {
    #[serde(rename = "D", default, skip_serializing_if = "Option::is_none")]
    pub dynamic_range: Option<u8>,
    #[serde(rename = "P", default, skip_serializing_if = "Option::is_none")]
    pub prediction_bands: Option<u8>,
    #[serde(rename = "R", default, skip_serializing_if = "Option::is_none")]
    pub register_size: Option<u8>,
    #[serde(rename = "OMEGA", default, skip_serializing_if = "Option::is_none")]
    pub weight_resolution: Option<u8>,
    #[serde(rename = "TINC_LOG", default, skip_serializing_if = "Option::is_none")]
    pub weight_update_interval_log: Option<u8>,
    #[serde(rename = "V_MIN", default, skip_serializing_if = "Option::is_none")]
    pub weight_exponent_min: Option<i8>,
    #[serde(rename = "V_MAX", default, skip_serializing_if = "Option::is_none")]
    pub weight_exponent_max: Option<i8>,
    #[serde(rename = "UMAX", default, skip_serializing_if = "Option::is_none")]
    pub unary_length_limit: Option<u8>,
    #[serde(rename = "COUNTER_SIZE", default, skip_serializing_if = "Option::is_none")]
    pub counter_size: Option<u8>,
    #[serde(rename = "INITIAL_COUNT", default, skip_serializing_if = "Option::is_none")]
    pub initial_count_exponent: Option<u8>,
    #[serde(rename = "K", default, skip_serializing_if = "Option::is_none")]
    pub accumulator_init_constant: Option<u8>,
    #[serde(rename = "mode", default, skip_serializing_if = "Option::is_none")]
    pub prediction_mode: Option<PredictionMode>,
    #[serde(rename = "locsum_mode", default, skip_serializing_if = "Option::is_none")]
    pub local_sum_mode: Option<LocalSumMode>,
    #[serde(rename = "encoder", default, skip_serializing_if = "Option::is_none")]
    pub entropy_coder: Option<EntropyCoder>,
    #[serde(rename = "out_word_size", default, skip_serializing_if = "Option::is_none")]
    pub output_word_size: Option<OutputWordSize>,
    #[serde(rename = "out_endianness", default, skip_serializing_if = "Option::is_none")]
    pub output_endianness: Option<Endianness>,
    #[serde(rename = "PIPELINES", default, skip_serializing_if = "Option::is_none")]
    pub pipelines: Option<u8>,
}

impl PartialConfiguration {
    /// Creates an empty partial configuration; every field will be sampled.
    pub fn new() -> Self {
        Self::default()
    }

    /// The fixed set the fuzzer uses when no configuration file is given:
    /// 16 bit samples, 8 byte little endian output words, sample adaptive coder.
    pub fn fuzz_defaults() -> Self {
        Self::new()
            .dynamic_range(16)
            .output_word_size(OutputWordSize::Eight)
            .output_endianness(Endianness::Little)
            .entropy_coder(EntropyCoder::SampleAdaptive)
    }

    /// Fix the dynamic range `D`.
    pub fn dynamic_range(mut self, value: u8) -> Self {
        self.dynamic_range = Some(value);
        self
    }

    /// Fix the number of prediction bands `P`.
    pub fn prediction_bands(mut self, value: u8) -> Self {
        self.prediction_bands = Some(value);
        self
    }

    /// Fix the register size `R`.
    pub fn register_size(mut self, value: u8) -> Self {
        self.register_size = Some(value);
        self
    }

    /// Fix the weight resolution `OMEGA`.
    pub fn weight_resolution(mut self, value: u8) -> Self {
        self.weight_resolution = Some(value);
        self
    }

    /// Fix the weight update time constant `TINC_LOG`.
    pub fn weight_update_interval_log(mut self, value: u8) -> Self {
        self.weight_update_interval_log = Some(value);
        self
    }

    /// Fix the weight update bounds `V_MIN` and `V_MAX`.
    pub fn weight_exponents(mut self, v_min: i8, v_max: i8) -> Self {
        self.weight_exponent_min = Some(v_min);
        self.weight_exponent_max = Some(v_max);
        self
    }

    /// Fix the unary length limit `UMAX`.
    pub fn unary_length_limit(mut self, value: u8) -> Self {
        self.unary_length_limit = Some(value);
        self
    }

    /// Fix the rescaling counter size.
    pub fn counter_size(mut self, value: u8) -> Self {
        self.counter_size = Some(value);
        self
    }

    /// Fix the initial count exponent.
    pub fn initial_count_exponent(mut self, value: u8) -> Self {
        self.initial_count_exponent = Some(value);
        self
    }

    /// Fix the accumulator initialization constant `K`.
    pub fn accumulator_init_constant(mut self, value: u8) -> Self {
        self.accumulator_init_constant = Some(value);
        self
    }

    pub fn prediction_mode(mut self, value: PredictionMode) -> Self {
        self.prediction_mode = Some(value);
        self
    }

    pub fn local_sum_mode(mut self, value: LocalSumMode) -> Self {
        self.local_sum_mode = Some(value);
        self
    }

    pub fn entropy_coder(mut self, value: EntropyCoder) -> Self {
        self.entropy_coder = Some(value);
        self
    }

    pub fn output_word_size(mut self, value: OutputWordSize) -> Self {
        self.output_word_size = Some(value);
        self
    }

    pub fn output_endianness(mut self, value: Endianness) -> Self {
        self.output_endianness = Some(value);
        self
    }

    /// Fix the number of pipelines of the implementation under test.
    pub fn pipelines(mut self, value: u8) -> Self {
        self.pipelines = Some(value);
        self
    }

    /// Converts into a complete [`Configuration`], requiring every field to be fixed.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::MissingField`] for the first absent field, or any validation error
    /// of [`Configuration::new`].
    pub fn into_complete(self) -> Result<Configuration, ConfigurationError> {
        Configuration::new(ConfigurationFields {
            dynamic_range: require("D", self.dynamic_range)?,
            prediction_bands: require("P", self.prediction_bands)?,
            register_size: require("R", self.register_size)?,
            weight_resolution: require("OMEGA", self.weight_resolution)?,
            weight_update_interval_log: require("TINC_LOG", self.weight_update_interval_log)?,
            weight_exponent_min: require("V_MIN", self.weight_exponent_min)?,
            weight_exponent_max: require("V_MAX", self.weight_exponent_max)?,
            unary_length_limit: require("UMAX", self.unary_length_limit)?,
            counter_size: require("COUNTER_SIZE", self.counter_size)?,
            initial_count_exponent: require("INITIAL_COUNT", self.initial_count_exponent)?,
            accumulator_init_constant: require("K", self.accumulator_init_constant)?,
            prediction_mode: require("mode", self.prediction_mode)?,
            local_sum_mode: require("locsum_mode", self.local_sum_mode)?,
            entropy_coder: require("encoder", self.entropy_coder)?,
            output_word_size: require("out_word_size", self.output_word_size)?,
            output_endianness: require("out_endianness", self.output_endianness)?,
            pipelines: require("PIPELINES", self.pipelines)?,
        })
    }
}

impl From<Configuration> for PartialConfiguration {
    fn from(config: Configuration) -> Self {
        Self {
            dynamic_range: Some(config.dynamic_range),
            prediction_bands: Some(config.prediction_bands),
            register_size: Some(config.register_size),
            weight_resolution: Some(config.weight_resolution),
            weight_update_interval_log: Some(config.weight_update_interval_log),
            weight_exponent_min: Some(config.weight_exponent_min),
            weight_exponent_max: Some(config.weight_exponent_max),
            unary_length_limit: Some(config.unary_length_limit),
            counter_size: Some(config.counter_size),
            initial_count_exponent: Some(config.initial_count_exponent),
            accumulator_init_constant: Some(config.accumulator_init_constant),
            prediction_mode: Some(config.prediction_mode),
            local_sum_mode: Some(config.local_sum_mode),
            entropy_coder: Some(config.entropy_coder),
            output_word_size: Some(config.output_word_size),
            output_endianness: Some(config.output_endianness),
            pipelines: Some(config.pipelines),
        }
    }
}

fn require<T>(field: &'static str, value: Option<T>) -> Result<T, ConfigurationError> {
    value.ok_or(ConfigurationError::MissingField(field))
}
