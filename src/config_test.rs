//! Tests for seed configuration.

use crate::accumulator::AccumulatorState;
use crate::config::MeanConfig;
use crate::error::MeanError;

fn field_of(err: &MeanError) -> &'static str {
  match err {
    MeanError::InvalidArgument { field, .. } => field,
    other => panic!("expected InvalidArgument, got {other:?}"),
  }
}

#[test]
fn test_default_seed_is_zero() {
  let config = MeanConfig::default();
  assert_eq!(config.initial_mean(), 0.0);
  assert_eq!(config.initial_count(), 0);
  assert_eq!(config.to_state(), AccumulatorState::default());
}

#[test]
fn test_new_accepts_mixed_numeric_types() {
  let config = MeanConfig::new(10_i32, 2_u8).unwrap();
  assert_eq!(config.initial_mean(), 10.0);
  assert_eq!(config.initial_count(), 2);

  let config = MeanConfig::new(3.5_f32, 7.0_f64).unwrap();
  assert_eq!(config.initial_mean(), 3.5);
  assert_eq!(config.initial_count(), 7);
}

#[test]
fn test_non_finite_mean_rejected() {
  for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
    let err = MeanConfig::default().with_initial_mean(bad).unwrap_err();
    assert_eq!(field_of(&err), "initial_mean");
  }
}

#[test]
fn test_invalid_counts_rejected() {
  for bad in [f64::NAN, f64::INFINITY, -1.0, 2.5] {
    let err = MeanConfig::default().with_initial_count(bad).unwrap_err();
    assert_eq!(field_of(&err), "initial_count");
  }
  let err = MeanConfig::default().with_initial_count(-3_i64).unwrap_err();
  assert_eq!(field_of(&err), "initial_count");
}

#[test]
fn test_count_must_leave_room_for_one_more_value() {
  let err = MeanConfig::default().with_initial_count(u64::MAX).unwrap_err();
  assert_eq!(field_of(&err), "initial_count");
  assert!(MeanConfig::default().with_initial_count(1e20).is_err());

  let config = MeanConfig::new(0.5, u64::MAX - 1).unwrap();
  let state = AccumulatorState::fold(config.to_state(), 0.5);
  assert_eq!(state.count(), u64::MAX);
  assert_eq!(state.mean(), 0.5);
  assert!(MeanConfig::from_state(&state).is_err());
}

#[test]
fn test_integral_float_count_accepted() {
  let config = MeanConfig::default().with_initial_count(4.0).unwrap();
  assert_eq!(config.initial_count(), 4);
}

#[test]
fn test_failed_builder_leaves_nothing_half_set() {
  let config = MeanConfig::new(1.5, 3).unwrap();
  assert!(config.with_initial_mean(f64::NAN).is_err());
  assert_eq!(config.initial_mean(), 1.5);
}

#[test]
fn test_from_json_full() {
  let config = MeanConfig::from_json(r#"{"initial_mean": 10, "initial_count": 2}"#).unwrap();
  assert_eq!(config, MeanConfig::new(10.0, 2).unwrap());
}

#[test]
fn test_from_json_defaults_missing_fields() {
  let config = MeanConfig::from_json(r#"{"initial_mean": -0.5}"#).unwrap();
  assert_eq!(config.initial_mean(), -0.5);
  assert_eq!(config.initial_count(), 0);

  let config = MeanConfig::from_json("{}").unwrap();
  assert_eq!(config, MeanConfig::default());
}

#[test]
fn test_from_json_non_numeric_is_invalid_argument() {
  let err = MeanConfig::from_json(r#"{"initial_mean": "abc"}"#).unwrap_err();
  assert_eq!(field_of(&err), "initial_mean");

  let err = MeanConfig::from_json(r#"{"initial_count": true}"#).unwrap_err();
  assert_eq!(field_of(&err), "initial_count");

  let err = MeanConfig::from_json(r#"{"initial_count": 1.5}"#).unwrap_err();
  assert_eq!(field_of(&err), "initial_count");
}

#[test]
fn test_from_json_malformed_is_parse_error() {
  assert!(matches!(
    MeanConfig::from_json("not json"),
    Err(MeanError::Parse(_))
  ));
  assert!(matches!(
    MeanConfig::from_json(r#"{"initial_value": 1}"#),
    Err(MeanError::Parse(_))
  ));
}

#[test]
fn test_from_state_resumes_accumulation() {
  let state = [1.0, 2.0, 3.0]
    .into_iter()
    .fold(AccumulatorState::default(), AccumulatorState::fold);
  let config = MeanConfig::from_state(&state).unwrap();
  assert_eq!(config.initial_count(), 3);
  assert_eq!(config.initial_mean(), 2.0);
  assert_eq!(config.to_state(), state);
}

#[test]
fn test_from_state_rejects_contaminated_mean() {
  let state = AccumulatorState::fold(AccumulatorState::default(), f64::NAN);
  assert!(MeanConfig::from_state(&state).is_err());
}

#[test]
fn test_serialize() {
  let config = MeanConfig::new(2.5, 4).unwrap();
  assert_eq!(
    serde_json::to_string(&config).unwrap(),
    r#"{"initial_mean":2.5,"initial_count":4}"#
  );
}
