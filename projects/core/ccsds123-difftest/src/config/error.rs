//! Error types for configuration validation.

use thiserror::Error;

/// Errors raised while building or validating a [`Configuration`].
///
/// All of these are fatal for a fuzz run: they are reported before any trial starts.
///
/// [`Configuration`]: crate::config::Configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A numeric field lies outside of its legal range.
    #[error("{field} = {value} is out of range, must be within [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// The register cannot hold the widest intermediate predictor value.
    #[error("R = {register_size} is too small, must be at least max(32, D + OMEGA + 2) = {minimum}")]
    RegisterSizeTooSmall { register_size: u8, minimum: u8 },

    /// `V_MIN` is greater than `V_MAX`.
    #[error("weight update bounds are inverted: V_MIN = {v_min} > V_MAX = {v_max}")]
    InvertedWeightBounds { v_min: i8, v_max: i8 },

    /// `INITIAL_COUNT` must be strictly smaller than `COUNTER_SIZE`.
    #[error("INITIAL_COUNT = {initial_count} must be smaller than COUNTER_SIZE = {counter_size}")]
    InitialCountTooLarge { initial_count: u8, counter_size: u8 },

    /// `K` must not exceed `D - 2`.
    #[error("K = {k} is too large, must be at most D - 2 = {maximum}")]
    AccumulatorConstantTooLarge { k: u8, maximum: u8 },

    /// The output word size is not one of 1, 2, 4 or 8 bytes.
    #[error("invalid output word size {0}, valid sizes are 1, 2, 4, 8")]
    InvalidOutputWordSize(u8),

    /// A field required for a complete configuration was not supplied.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// A textual field holds a value that maps to no known variant.
    #[error("unknown value '{value}' for {field}")]
    UnknownValue { field: &'static str, value: String },

    /// A fixed value left nothing to draw from for a dependent field.
    #[error("no legal value for {field}: range [{min}, {max}] is empty")]
    EmptyRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    /// The configuration file does not describe any image.
    #[error("configuration file contains no images")]
    NoImages,
}
