//! Seed configuration for running mean transformers.
//!
//! A seed describes observations that happened before the current stream: the
//! stream continues a mean over `initial_count` prior values whose mean was
//! `initial_mean`. With the default seed `{0, 0}` the first emitted mean is the
//! first value itself.
//!
//! Seeds can be built programmatically, parsed from JSON, or captured from the
//! accumulator of a previous stream to resume accumulation.
//!
//! # Example
//!
//! ```rust
//! use streamweave_mean::config::MeanConfig;
//!
//! let seed = MeanConfig::from_json(r#"{"initial_mean": 10, "initial_count": 2}"#).unwrap();
//! assert_eq!(seed.initial_mean(), 10.0);
//! assert_eq!(seed.initial_count(), 2);
//!
//! assert!(MeanConfig::from_json(r#"{"initial_mean": "abc"}"#).is_err());
//! ```

use crate::accumulator::AccumulatorState;
use crate::error::MeanError;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};

pub(crate) const INITIAL_MEAN: &str = "initial_mean";
pub(crate) const INITIAL_COUNT: &str = "initial_count";

/// Validated seed for a running mean.
///
/// Fields are private so that every instance has passed validation: the mean is
/// finite and the count is a non-negative integer below `u64::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MeanConfig {
  initial_mean: f64,
  initial_count: u64,
}

/// Unvalidated wire shape of [`MeanConfig`].
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMeanConfig {
  #[serde(default)]
  initial_mean: Option<serde_json::Value>,
  #[serde(default)]
  initial_count: Option<serde_json::Value>,
}

impl MeanConfig {
  /// Creates a seed from any primitive numeric mean and count.
  pub fn new<M, C>(initial_mean: M, initial_count: C) -> Result<Self, MeanError>
  where
    M: ToPrimitive,
    C: ToPrimitive,
  {
    Ok(Self {
      initial_mean: validate_mean(initial_mean)?,
      initial_count: validate_count(initial_count)?,
    })
  }

  /// Returns a copy with the seed mean replaced.
  pub fn with_initial_mean<M: ToPrimitive>(mut self, value: M) -> Result<Self, MeanError> {
    self.initial_mean = validate_mean(value)?;
    Ok(self)
  }

  /// Returns a copy with the seed count replaced.
  pub fn with_initial_count<C: ToPrimitive>(mut self, value: C) -> Result<Self, MeanError> {
    self.initial_count = validate_count(value)?;
    Ok(self)
  }

  /// Captures the state of a previous accumulation as a seed.
  ///
  /// Fails if the state's mean is not finite, e.g. after a NaN was folded in,
  /// or if its count cannot take another observation.
  pub fn from_state(state: &AccumulatorState) -> Result<Self, MeanError> {
    Ok(Self {
      initial_mean: validate_mean(state.mean)?,
      initial_count: validate_count(state.count)?,
    })
  }

  /// Parses a seed from a JSON object with optional `initial_mean` and
  /// `initial_count` numeric fields.
  pub fn from_json(json: &str) -> Result<Self, MeanError> {
    let raw: RawMeanConfig =
      serde_json::from_str(json).map_err(|e| MeanError::Parse(e.to_string()))?;

    let mut config = Self::default();
    if let Some(value) = raw.initial_mean {
      config.initial_mean = validate_mean(json_number(INITIAL_MEAN, &value)?)?;
    }
    if let Some(value) = raw.initial_count {
      config.initial_count = validate_count(json_number(INITIAL_COUNT, &value)?)?;
    }
    Ok(config)
  }

  /// Seed mean.
  pub fn initial_mean(&self) -> f64 {
    self.initial_mean
  }

  /// Seed count.
  pub fn initial_count(&self) -> u64 {
    self.initial_count
  }

  /// The accumulator a new stream starts from.
  pub fn to_state(&self) -> AccumulatorState {
    AccumulatorState::new(self.initial_count, self.initial_mean)
  }
}

fn json_number(field: &'static str, value: &serde_json::Value) -> Result<f64, MeanError> {
  value
    .as_f64()
    .ok_or_else(|| MeanError::invalid_argument(field, format!("expected a number, got {value}")))
}

pub(crate) fn validate_mean<M: ToPrimitive>(value: M) -> Result<f64, MeanError> {
  match value.to_f64() {
    Some(mean) if mean.is_finite() => Ok(mean),
    Some(mean) => Err(MeanError::invalid_argument(
      INITIAL_MEAN,
      format!("initial mean must be a finite number, got {mean}"),
    )),
    None => Err(MeanError::invalid_argument(
      INITIAL_MEAN,
      "initial mean must be numeric",
    )),
  }
}

pub(crate) fn validate_count<C: ToPrimitive>(value: C) -> Result<u64, MeanError> {
  let Some(count) = value.to_f64() else {
    return Err(MeanError::invalid_argument(
      INITIAL_COUNT,
      "number of values must be numeric",
    ));
  };
  if !count.is_finite() {
    return Err(MeanError::invalid_argument(
      INITIAL_COUNT,
      format!("number of values must be finite, got {count}"),
    ));
  }
  if count < 0.0 || count.fract() != 0.0 {
    return Err(MeanError::invalid_argument(
      INITIAL_COUNT,
      format!("number of values must be a non-negative integer, got {count}"),
    ));
  }
  // Folding a value increments the count, so u64::MAX itself is out of range.
  match value.to_u64() {
    Some(count) if count < u64::MAX => Ok(count),
    _ => Err(MeanError::invalid_argument(
      INITIAL_COUNT,
      format!("number of values must be below {}, got {count}", u64::MAX),
    )),
  }
}
