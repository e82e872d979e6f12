//! Tests for the accumulator module.

use crate::accumulator::AccumulatorState;

const TOLERANCE: f64 = 1e-12;

fn assert_close(actual: f64, expected: f64) {
  assert!(
    (actual - expected).abs() < TOLERANCE,
    "expected {expected}, got {actual}"
  );
}

#[test]
fn test_default_state() {
  let state = AccumulatorState::default();
  assert_eq!(state.count(), 0);
  assert_eq!(state.mean(), 0.0);
}

#[test]
fn test_fold_single_value() {
  let state = AccumulatorState::fold(AccumulatorState::default(), 7.5);
  assert_eq!(state.count(), 1);
  assert_eq!(state.mean(), 7.5);
}

#[test]
fn test_fold_matches_arithmetic_mean() {
  let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
  let mut state = AccumulatorState::default();

  for (i, &x) in values.iter().enumerate() {
    state = AccumulatorState::fold(state, x);
    let expected = values[..=i].iter().sum::<f64>() / (i + 1) as f64;
    assert_eq!(state.count(), (i + 1) as u64);
    assert_close(state.mean(), expected);
  }

  assert_close(state.mean(), 5.0);
}

#[test]
fn test_fold_from_seed() {
  let seeded = AccumulatorState::new(2, 10.0);
  let state = AccumulatorState::fold(seeded, 4.0);
  assert_eq!(state.count(), 3);
  assert_close(state.mean(), 8.0);
}

#[test]
fn test_update_in_place_matches_fold() {
  let mut in_place = AccumulatorState::new(5, -1.25);
  let folded = AccumulatorState::fold(in_place, 3.0);
  in_place.update(3.0);
  assert_eq!(in_place, folded);
}

#[test]
fn test_nan_contaminates_subsequent_means() {
  let mut state = AccumulatorState::default();
  state.update(f64::NAN);
  assert!(state.mean().is_nan());

  for x in [1.0, 2.0, 3.0] {
    state.update(x);
    assert!(state.mean().is_nan());
  }
  assert_eq!(state.count(), 4);
}

#[test]
fn test_infinity_propagates() {
  let mut state = AccumulatorState::default();
  state.update(f64::INFINITY);
  assert!(state.mean().is_infinite());

  // inf - inf is NaN
  state.update(1.0);
  assert!(state.mean().is_nan());
}

#[test]
fn test_long_constant_stream_stays_exact() {
  let mut state = AccumulatorState::default();
  for _ in 0..100_000 {
    state.update(0.1);
  }
  assert_close(state.mean(), 0.1);
}

#[test]
fn test_state_serde_round_trip() {
  let state = AccumulatorState::new(42, 3.25);
  let json = serde_json::to_string(&state).unwrap();
  assert_eq!(json, r#"{"count":42,"mean":3.25}"#);
  let restored: AccumulatorState = serde_json::from_str(&json).unwrap();
  assert_eq!(restored, state);
}
