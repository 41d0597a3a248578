use crate::config::{Configuration, EntropyCoder, LocalSumMode, PredictionMode};
use crate::cube::{CubeDimensions, StorageOrder};
use core::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Configuration file of the reference encoder: one `KEY=value` line per entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderConfig {
    entries: Vec<(&'static str, i64)>,
}

impl EncoderConfig {
    /// Maps a configuration, the image dimensions and the image sample order to encoder keys.
    pub fn from_configuration(
        config: &Configuration,
        dimensions: CubeDimensions,
        order: StorageOrder,
    ) -> Self {
        let interleaving_depth = match order {
            StorageOrder::Bip => dimensions.nz as i64,
            StorageOrder::Bsq | StorageOrder::Bil => 0,
        };

        let entries = vec![
            ("DYNAMIC_RANGE", config.dynamic_range.into()),
            ("SAMPLE_ENCODING_ORDER", (order == StorageOrder::Bsq).into()),
            ("SUBFRAME_INTERLEAVING_DEPTH", interleaving_depth),
            ("OUTPUT_WORD_SIZE", config.output_word_size.bytes() as i64),
            (
                "ENTROPY_CODER_TYPE",
                (config.entropy_coder == EntropyCoder::BlockAdaptive).into(),
            ),
            ("NUMBER_PREDICTION_BANDS", config.prediction_bands.into()),
            (
                "PREDICTION_MODE",
                (config.prediction_mode == PredictionMode::Reduced).into(),
            ),
            (
                "LOCAL_SUM_MODE",
                (config.local_sum_mode == LocalSumMode::Column).into(),
            ),
            ("REGISTER_SIZE", config.register_size.into()),
            ("WEIGHT_COMPONENT_RESOLUTION", config.weight_resolution.into()),
            ("WEIGHT_UPDATE_SECI", config.weight_update_interval_log.into()),
            ("WEIGHT_UPDATE_SE", config.weight_exponent_min.into()),
            ("WEIGHT_UPDATE_SEFP", config.weight_exponent_max.into()),
            ("WEIGHT_INITIALIZATION_METHOD", 0),
            ("WEIGHT_INITIALIZATION_TF", 0),
            ("WEIGHT_INITIALIZATION_RESOLUTION", 0),
            ("UNARY_LENGTH_LIMIT", config.unary_length_limit.into()),
            ("RESCALING_COUNTER_SIZE", config.counter_size.into()),
            ("INITIAL_COUNT_EXPONENT", config.initial_count_exponent.into()),
            ("ACCUMULATOR_INITIALIZATION_TF", 0),
            (
                "ACCUMULATOR_INITIALIZATION_CONSTANT",
                config.accumulator_init_constant.into(),
            ),
        ];

        Self { entries }
    }

    /// Entries in the order they are written.
    pub fn entries(&self) -> &[(&'static str, i64)] {
        &self.entries
    }

    /// Value of `key`, if present.
    pub fn get(&self, key: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|(name, _)| *name == key)
            .map(|&(_, value)| value)
    }

    pub fn write(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_string())
    }
}

impl fmt::Display for EncoderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.entries {
            writeln!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::reference_fields;
    use crate::config::{ConfigurationFields, OutputWordSize};
    use rstest::rstest;

    fn reference() -> Configuration {
        Configuration::new(reference_fields()).unwrap()
    }

    #[test]
    fn renders_reference_configuration() {
        let config =
            EncoderConfig::from_configuration(&reference(), CubeDimensions::new(10, 10, 9), StorageOrder::Bip);

        let expected = "\
DYNAMIC_RANGE=16
SAMPLE_ENCODING_ORDER=0
SUBFRAME_INTERLEAVING_DEPTH=9
OUTPUT_WORD_SIZE=8
ENTROPY_CODER_TYPE=0
NUMBER_PREDICTION_BANDS=0
PREDICTION_MODE=0
LOCAL_SUM_MODE=0
REGISTER_SIZE=40
WEIGHT_COMPONENT_RESOLUTION=13
WEIGHT_UPDATE_SECI=6
WEIGHT_UPDATE_SE=-1
WEIGHT_UPDATE_SEFP=3
WEIGHT_INITIALIZATION_METHOD=0
WEIGHT_INITIALIZATION_TF=0
WEIGHT_INITIALIZATION_RESOLUTION=0
UNARY_LENGTH_LIMIT=18
RESCALING_COUNTER_SIZE=6
INITIAL_COUNT_EXPONENT=1
ACCUMULATOR_INITIALIZATION_TF=0
ACCUMULATOR_INITIALIZATION_CONSTANT=3
";
        assert_eq!(config.to_string(), expected);
    }

    #[rstest]
    #[case(StorageOrder::Bip, 0, 9)]
    #[case(StorageOrder::Bsq, 1, 0)]
    #[case(StorageOrder::Bil, 0, 0)]
    fn order_dependent_keys(
        #[case] order: StorageOrder,
        #[case] encoding_order: i64,
        #[case] interleaving_depth: i64,
    ) {
        let config =
            EncoderConfig::from_configuration(&reference(), CubeDimensions::new(10, 10, 9), order);

        assert_eq!(config.get("SAMPLE_ENCODING_ORDER"), Some(encoding_order));
        assert_eq!(config.get("SUBFRAME_INTERLEAVING_DEPTH"), Some(interleaving_depth));
    }

    #[test]
    fn enumerations_map_to_codes() {
        let fields = ConfigurationFields {
            prediction_mode: PredictionMode::Reduced,
            local_sum_mode: LocalSumMode::Column,
            entropy_coder: EntropyCoder::BlockAdaptive,
            output_word_size: OutputWordSize::Two,
            ..reference_fields()
        };
        let config = EncoderConfig::from_configuration(
            &Configuration::new(fields).unwrap(),
            CubeDimensions::new(10, 10, 9),
            StorageOrder::Bip,
        );

        assert_eq!(config.get("PREDICTION_MODE"), Some(1));
        assert_eq!(config.get("LOCAL_SUM_MODE"), Some(1));
        assert_eq!(config.get("ENTROPY_CODER_TYPE"), Some(1));
        assert_eq!(config.get("OUTPUT_WORD_SIZE"), Some(2));
        assert_eq!(config.get("NOT_A_KEY"), None);
    }
}
