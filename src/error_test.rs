//! Tests for the error module: configuration errors, error strategies and
//! stream error context.

use crate::error::{
  ComponentInfo, ErrorAction, ErrorContext, ErrorStrategy, MeanError, StreamError, StringError,
};
use crate::stateful_transformer::StateError;
use std::error::Error;

fn stream_error(item: Option<f64>) -> StreamError<f64> {
  StreamError::new(
    Box::new(MeanError::NonFiniteInput { value: f64::NAN }),
    ErrorContext {
      timestamp: chrono::Utc::now(),
      item,
      component_name: "mean".to_string(),
      component_type: "RunningMeanTransformer".to_string(),
    },
    ComponentInfo::new("mean".to_string(), "RunningMeanTransformer".to_string()),
  )
}

#[test]
fn test_mean_error_invalid_argument_display() {
  let err = MeanError::invalid_argument("initial_mean", "value must be a finite number");
  assert_eq!(
    err.to_string(),
    "initial_mean: invalid input argument. value must be a finite number"
  );
  assert!(matches!(
    err,
    MeanError::InvalidArgument {
      field: "initial_mean",
      ..
    }
  ));
}

#[test]
fn test_mean_error_already_streaming_display() {
  let err = MeanError::AlreadyStreaming {
    field: "initial_count",
  };
  assert!(err.to_string().starts_with("initial_count:"));
  assert!(err.to_string().contains("already consumed"));
}

#[test]
fn test_mean_error_parse_display() {
  let err = MeanError::Parse("expected value at line 1 column 1".to_string());
  assert_eq!(
    err.to_string(),
    "failed to parse mean configuration: expected value at line 1 column 1"
  );
}

#[test]
fn test_mean_error_from_state_error() {
  let err: MeanError = StateError::LockPoisoned.into();
  assert_eq!(err, MeanError::State(StateError::LockPoisoned));
  assert_eq!(
    err.to_string(),
    "running mean state unavailable: State lock is poisoned"
  );
}

#[test]
fn test_error_strategy_default_variants() {
  let stop: ErrorStrategy<f64> = ErrorStrategy::Stop;
  let retry: ErrorStrategy<f64> = ErrorStrategy::Retry(3);
  assert_eq!(stop.clone(), ErrorStrategy::Stop);
  assert_eq!(retry.clone(), ErrorStrategy::Retry(3));
  assert_ne!(retry, ErrorStrategy::Retry(4));
  assert_ne!(stop, ErrorStrategy::Skip);
}

#[test]
fn test_error_strategy_debug() {
  assert_eq!(
    format!("{:?}", ErrorStrategy::<f64>::Retry(2)),
    "ErrorStrategy::Retry(2)"
  );
  let custom = ErrorStrategy::<f64>::new_custom(|_| ErrorAction::Skip);
  assert_eq!(format!("{:?}", custom), "ErrorStrategy::Custom");
}

#[test]
fn test_error_strategy_custom_handler() {
  let strategy = ErrorStrategy::<f64>::new_custom(|error| {
    if error.retries < 2 {
      ErrorAction::Retry
    } else {
      ErrorAction::Stop
    }
  });

  let mut error = stream_error(Some(f64::NAN));
  if let ErrorStrategy::Custom(handler) = &strategy {
    assert_eq!(handler(&error), ErrorAction::Retry);
    error.retries = 2;
    assert_eq!(handler(&error), ErrorAction::Stop);
  } else {
    panic!("expected custom strategy");
  }
}

#[test]
fn test_stream_error_display_and_source() {
  let error = stream_error(Some(f64::INFINITY));
  assert_eq!(
    error.to_string(),
    "Error in mean (RunningMeanTransformer): non-finite input value: NaN"
  );
  assert!(error.source().is_some());
  assert_eq!(error.retries, 0);
}

#[test]
fn test_stream_error_clone_keeps_message() {
  let mut error = stream_error(None);
  error.retries = 1;
  let cloned = error.clone();
  assert_eq!(cloned.source.to_string(), error.source.to_string());
  assert_eq!(cloned.component, error.component);
  assert_eq!(cloned.retries, 1);
}

#[test]
fn test_string_error() {
  let err = StringError("boom".to_string());
  assert_eq!(err.to_string(), "boom");
}

#[test]
fn test_error_context_and_component_defaults() {
  let context: ErrorContext<f64> = ErrorContext::default();
  assert_eq!(context.item, None);
  assert_eq!(context.component_name, "default");

  let info = ComponentInfo::default();
  assert_eq!(info.name, "default");
  assert_eq!(info.type_name, "default");
}
