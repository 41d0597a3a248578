//! Random sampling of legal configurations.
//!
//! Several ranges depend on fields resolved earlier, so fields are resolved in a fixed order:
//!
//! 1. `D` and `OMEGA` before `R`, since `R >= max(32, D + OMEGA + 2)`.
//! 2. `V_MIN` before `V_MAX`, since `V_MAX >= V_MIN`.
//! 3. `COUNTER_SIZE` before `INITIAL_COUNT`, since `INITIAL_COUNT < COUNTER_SIZE`.
//! 4. `D` before `K`, since `K <= D - 2`.
//!
//! Fixed values are never altered. A fixed value that leaves a dependent range empty, or that
//! violates an invariant by itself, is rejected with a [`ConfigurationError`].

use crate::config::*;
use core::ops::RangeInclusive;
use derive_enum_all_values::AllValues;
use rand::distributions::uniform::SampleUniform;
use rand::Rng;

/// Number of pipelines drawn when the caller does not fix it.
pub const SAMPLED_PIPELINES: RangeInclusive<u8> = 1..=8;

/// Completes `fixed` into a full [`Configuration`], drawing every absent field uniformly from
/// its legal range.
///
/// # Errors
///
/// [`ConfigurationError`] if the fixed fields cannot be part of any legal configuration.
pub fn sample<R: Rng>(
    fixed: &PartialConfiguration,
    rng: &mut R,
) -> Result<Configuration, ConfigurationError> {
    let dynamic_range = fixed
        .dynamic_range
        .unwrap_or_else(|| rng.gen_range(DYNAMIC_RANGE));
    let weight_resolution = fixed
        .weight_resolution
        .unwrap_or_else(|| rng.gen_range(WEIGHT_RESOLUTION));

    let register_size = resolve(
        "R",
        fixed.register_size,
        min_register_size(dynamic_range, weight_resolution),
        MAX_REGISTER_SIZE,
        rng,
    )?;

    let weight_exponent_min = fixed
        .weight_exponent_min
        .unwrap_or_else(|| rng.gen_range(WEIGHT_EXPONENT));
    let weight_exponent_max = resolve(
        "V_MAX",
        fixed.weight_exponent_max,
        weight_exponent_min,
        *WEIGHT_EXPONENT.end(),
        rng,
    )?;

    let counter_size = fixed
        .counter_size
        .unwrap_or_else(|| rng.gen_range(COUNTER_SIZE));
    let initial_count_exponent = resolve(
        "INITIAL_COUNT",
        fixed.initial_count_exponent,
        1,
        counter_size.saturating_sub(1),
        rng,
    )?;

    let accumulator_init_constant = resolve(
        "K",
        fixed.accumulator_init_constant,
        0,
        max_accumulator_constant(dynamic_range),
        rng,
    )?;

    let fields = ConfigurationFields {
        dynamic_range,
        prediction_bands: fixed
            .prediction_bands
            .unwrap_or_else(|| rng.gen_range(PREDICTION_BANDS)),
        register_size,
        weight_resolution,
        weight_update_interval_log: fixed
            .weight_update_interval_log
            .unwrap_or_else(|| rng.gen_range(WEIGHT_UPDATE_INTERVAL_LOG)),
        weight_exponent_min,
        weight_exponent_max,
        unary_length_limit: fixed
            .unary_length_limit
            .unwrap_or_else(|| rng.gen_range(UNARY_LENGTH_LIMIT)),
        counter_size,
        initial_count_exponent,
        accumulator_init_constant,
        prediction_mode: fixed
            .prediction_mode
            .unwrap_or_else(|| choose(PredictionMode::all_values(), rng)),
        local_sum_mode: fixed
            .local_sum_mode
            .unwrap_or_else(|| choose(LocalSumMode::all_values(), rng)),
        entropy_coder: fixed
            .entropy_coder
            .unwrap_or_else(|| choose(EntropyCoder::all_values(), rng)),
        output_word_size: fixed
            .output_word_size
            .unwrap_or_else(|| choose(OutputWordSize::all_values(), rng)),
        output_endianness: fixed
            .output_endianness
            .unwrap_or_else(|| choose(Endianness::all_values(), rng)),
        pipelines: fixed
            .pipelines
            .unwrap_or_else(|| rng.gen_range(SAMPLED_PIPELINES)),
    };

    Configuration::new(fields)
}

/// Takes the fixed value if present, otherwise draws from `[min, max]`.
///
/// A fixed value is passed through even when it lies outside `[min, max]`; validation reports it.
fn resolve<T, R>(
    field: &'static str,
    fixed: Option<T>,
    min: T,
    max: T,
    rng: &mut R,
) -> Result<T, ConfigurationError>
where
    T: SampleUniform + PartialOrd + Copy + Into<i64>,
    R: Rng,
{
    if let Some(value) = fixed {
        return Ok(value);
    }

    if min > max {
        return Err(ConfigurationError::EmptyRange {
            field,
            min: min.into(),
            max: max.into(),
        });
    }

    Ok(rng.gen_range(min..=max))
}

fn choose<T: Copy, R: Rng>(values: &[T], rng: &mut R) -> T {
    values[rng.gen_range(0..values.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    fn assert_invariants(config: &Configuration) {
        let minimum = 32.max(config.dynamic_range + config.weight_resolution + 2);
        assert!(config.register_size >= minimum, "{config:?}");
        assert!(config.register_size <= 64, "{config:?}");
        assert!(config.weight_exponent_min <= config.weight_exponent_max);
        assert!(config.initial_count_exponent < config.counter_size);
        assert!(config.accumulator_init_constant <= config.dynamic_range - 2);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(0xdead_beef)]
    #[case(u64::MAX)]
    fn unconstrained_samples_are_legal(#[case] seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..500 {
            let config = sample(&PartialConfiguration::new(), &mut rng).unwrap();
            assert_invariants(&config);
        }
    }

    #[rstest]
    #[case(0)]
    #[case(42)]
    #[case(1337)]
    fn fixed_fields_are_preserved(#[case] seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let fixed = PartialConfiguration::fuzz_defaults()
            .prediction_bands(0)
            .weight_resolution(19)
            .counter_size(9)
            .prediction_mode(PredictionMode::Reduced)
            .pipelines(3);

        for _ in 0..200 {
            let config = sample(&fixed, &mut rng).unwrap();
            assert_invariants(&config);
            assert_eq!(config.dynamic_range, 16);
            assert_eq!(config.prediction_bands, 0);
            assert_eq!(config.weight_resolution, 19);
            assert_eq!(config.counter_size, 9);
            assert_eq!(config.prediction_mode, PredictionMode::Reduced);
            assert_eq!(config.entropy_coder, EntropyCoder::SampleAdaptive);
            assert_eq!(config.output_word_size, OutputWordSize::Eight);
            assert_eq!(config.output_endianness, Endianness::Little);
            assert_eq!(config.pipelines, 3);
            // D + OMEGA + 2 = 37
            assert!(config.register_size >= 37);
        }
    }

    #[test]
    fn fully_fixed_configuration_passes_through() {
        let expected = Configuration::new(crate::config::tests::reference_fields()).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let config = sample(&PartialConfiguration::from(expected), &mut rng).unwrap();
        assert_eq!(config, expected);
    }

    #[test]
    fn dependent_ranges_follow_fixed_values() {
        let mut rng = StdRng::seed_from_u64(99);
        let fixed = PartialConfiguration::new()
            .dynamic_range(2)
            .counter_size(4);

        for _ in 0..200 {
            let config = sample(&fixed, &mut rng).unwrap();
            assert_eq!(config.accumulator_init_constant, 0);
            assert!((1..=3).contains(&config.initial_count_exponent));
        }

        let fixed = PartialConfiguration::new().weight_exponents(9, 9);
        let config = sample(&fixed, &mut rng).unwrap();
        assert_eq!(config.weight_exponent_max, 9);

        let fixed = PartialConfiguration {
            weight_exponent_min: Some(9),
            ..Default::default()
        };
        for _ in 0..20 {
            assert_eq!(sample(&fixed, &mut rng).unwrap().weight_exponent_max, 9);
        }
    }

    #[test]
    fn every_variant_is_reachable() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut word_sizes = Vec::new();
        let mut coders = Vec::new();
        for _ in 0..500 {
            let config = sample(&PartialConfiguration::new(), &mut rng).unwrap();
            if !word_sizes.contains(&config.output_word_size) {
                word_sizes.push(config.output_word_size);
            }
            if !coders.contains(&config.entropy_coder) {
                coders.push(config.entropy_coder);
            }
        }

        assert_eq!(word_sizes.len(), OutputWordSize::all_values().len());
        assert_eq!(coders.len(), EntropyCoder::all_values().len());
    }

    #[test]
    fn rejects_fixed_register_below_minimum() {
        let mut rng = StdRng::seed_from_u64(11);
        let fixed = PartialConfiguration::new()
            .dynamic_range(16)
            .weight_resolution(19)
            .register_size(32);

        assert_eq!(
            sample(&fixed, &mut rng),
            Err(ConfigurationError::RegisterSizeTooSmall {
                register_size: 32,
                minimum: 37
            })
        );
    }

    #[test]
    fn rejects_counter_size_that_leaves_no_initial_count() {
        let mut rng = StdRng::seed_from_u64(11);
        let fixed = PartialConfiguration::new().counter_size(1);

        assert_eq!(
            sample(&fixed, &mut rng),
            Err(ConfigurationError::EmptyRange {
                field: "INITIAL_COUNT",
                min: 1,
                max: 0
            })
        );
    }

    #[test]
    fn rejects_fixed_dynamic_range_below_accumulator_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let fixed = PartialConfiguration::new().dynamic_range(1);

        assert!(sample(&fixed, &mut rng).is_err());
    }

    #[test]
    fn rejects_inverted_fixed_weight_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let fixed = PartialConfiguration::new().weight_exponents(5, 2);

        assert_eq!(
            sample(&fixed, &mut rng),
            Err(ConfigurationError::InvertedWeightBounds { v_min: 5, v_max: 2 })
        );
    }
}
