//! # Error Handling
//!
//! Error types for the running mean transformer.
//!
//! Two kinds of failure exist:
//!
//! - **Configuration errors** ([`MeanError`]): raised synchronously by the seed
//!   setters and by [`MeanConfig`](crate::config::MeanConfig) parsing. They never
//!   occur while a stream is running.
//! - **Stream errors** ([`StreamError`]): only produced when input validation is
//!   enabled on a transformer. How the stream reacts is decided by the
//!   transformer's [`ErrorStrategy`].
//!
//! Without input validation a NaN entering the stream is not an error at all:
//! it flows through the fold and every mean emitted after it is NaN.
//!
//! ## Error Strategies
//!
//! - **Stop**: end the output stream at the offending item (default)
//! - **Skip**: drop the offending item and keep going
//! - **Retry(n)**: retry up to n times before stopping
//! - **Custom**: user-defined handler deciding per error
//!
//! ## Example
//!
//! ```rust
//! use streamweave_mean::error::{ErrorAction, ErrorStrategy};
//!
//! let strategy = ErrorStrategy::<f64>::new_custom(|error| {
//!   if error.retries < 2 {
//!     ErrorAction::Retry
//!   } else {
//!     ErrorAction::Skip
//!   }
//! });
//! assert!(matches!(strategy, ErrorStrategy::Custom(_)));
//! ```

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::stateful_transformer::StateError;

/// Errors raised while configuring a running mean transformer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeanError {
  /// A seed value was rejected.
  #[error("{field}: invalid input argument. {reason}")]
  InvalidArgument {
    /// The seed field being set (`initial_mean` or `initial_count`).
    field: &'static str,
    /// Why the value was rejected.
    reason: String,
  },
  /// A seed was changed after the transformer started consuming values.
  #[error("{field}: cannot reseed a transformer that has already consumed values")]
  AlreadyStreaming {
    /// The seed field being set.
    field: &'static str,
  },
  /// A configuration document could not be parsed.
  #[error("failed to parse mean configuration: {0}")]
  Parse(String),
  /// A stream value failed input validation.
  #[error("non-finite input value: {value}")]
  NonFiniteInput {
    /// The rejected value.
    value: f64,
  },
  /// The accumulator store could not be accessed.
  #[error("running mean state unavailable: {0}")]
  State(#[from] StateError),
}

impl MeanError {
  pub(crate) fn invalid_argument(field: &'static str, reason: impl Into<String>) -> Self {
    Self::InvalidArgument {
      field,
      reason: reason.into(),
    }
  }
}

/// Action to take when an error occurs while transforming a stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorAction {
  /// Stop processing immediately.
  Stop,
  /// Skip the item that caused the error and continue processing.
  Skip,
  /// Retry the operation that caused the error.
  Retry,
}

type CustomErrorHandler<T> = Arc<dyn Fn(&StreamError<T>) -> ErrorAction + Send + Sync>;

/// Strategy for handling errors in a transformer.
pub enum ErrorStrategy<T> {
  /// Stop processing immediately when an error occurs.
  ///
  /// This is the default strategy.
  Stop,
  /// Skip items that cause errors and continue processing.
  Skip,
  /// Retry failed operations up to the specified number of times.
  Retry(usize),
  /// Custom error handling logic.
  Custom(CustomErrorHandler<T>),
}

impl<T: fmt::Debug + Clone + Send + Sync> Clone for ErrorStrategy<T> {
  fn clone(&self) -> Self {
    match self {
      ErrorStrategy::Stop => ErrorStrategy::Stop,
      ErrorStrategy::Skip => ErrorStrategy::Skip,
      ErrorStrategy::Retry(n) => ErrorStrategy::Retry(*n),
      ErrorStrategy::Custom(handler) => ErrorStrategy::Custom(handler.clone()),
    }
  }
}

impl<T: fmt::Debug + Clone + Send + Sync> fmt::Debug for ErrorStrategy<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ErrorStrategy::Stop => write!(f, "ErrorStrategy::Stop"),
      ErrorStrategy::Skip => write!(f, "ErrorStrategy::Skip"),
      ErrorStrategy::Retry(n) => write!(f, "ErrorStrategy::Retry({})", n),
      ErrorStrategy::Custom(_) => write!(f, "ErrorStrategy::Custom"),
    }
  }
}

impl<T: fmt::Debug + Clone + Send + Sync> PartialEq for ErrorStrategy<T> {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (ErrorStrategy::Stop, ErrorStrategy::Stop) => true,
      (ErrorStrategy::Skip, ErrorStrategy::Skip) => true,
      (ErrorStrategy::Retry(n1), ErrorStrategy::Retry(n2)) => n1 == n2,
      (ErrorStrategy::Custom(_), ErrorStrategy::Custom(_)) => true,
      _ => false,
    }
  }
}

impl<T: fmt::Debug + Clone + Send + Sync> ErrorStrategy<T> {
  /// Creates a custom error handling strategy from a handler function.
  pub fn new_custom<F>(f: F) -> Self
  where
    F: Fn(&StreamError<T>) -> ErrorAction + Send + Sync + 'static,
  {
    Self::Custom(Arc::new(f))
  }
}

/// Error that occurred during stream processing.
#[derive(Debug)]
pub struct StreamError<T> {
  /// The original error that occurred.
  pub source: Box<dyn Error + Send + Sync>,
  /// Context about when and where the error occurred.
  pub context: ErrorContext<T>,
  /// Information about the component that encountered the error.
  pub component: ComponentInfo,
  /// Number of times this error has been retried.
  pub retries: usize,
}

impl<T: fmt::Debug + Clone + Send + Sync> Clone for StreamError<T> {
  fn clone(&self) -> Self {
    Self {
      source: Box::new(StringError(self.source.to_string())),
      context: self.context.clone(),
      component: self.component.clone(),
      retries: self.retries,
    }
  }
}

/// A simple error type that wraps a string message.
#[derive(Debug)]
pub struct StringError(pub String);

impl fmt::Display for StringError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl Error for StringError {}

impl<T: fmt::Debug + Clone + Send + Sync> StreamError<T> {
  /// Creates a new `StreamError` with `retries` set to 0.
  pub fn new(
    source: Box<dyn Error + Send + Sync>,
    context: ErrorContext<T>,
    component: ComponentInfo,
  ) -> Self {
    Self {
      source,
      context,
      component,
      retries: 0,
    }
  }
}

impl<T: fmt::Debug + Clone + Send + Sync> fmt::Display for StreamError<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Error in {} ({}): {}",
      self.component.name, self.component.type_name, self.source
    )
  }
}

impl<T: fmt::Debug + Clone + Send + Sync> Error for StreamError<T> {
  fn source(&self) -> Option<&(dyn Error + 'static)> {
    Some(self.source.as_ref())
  }
}

/// Context information about when and where an error occurred.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorContext<T> {
  /// The timestamp when the error occurred.
  pub timestamp: chrono::DateTime<chrono::Utc>,
  /// The item being processed when the error occurred, if available.
  pub item: Option<T>,
  /// The name of the component that encountered the error.
  pub component_name: String,
  /// The type of the component that encountered the error.
  pub component_type: String,
}

impl<T: fmt::Debug + Clone + Send + Sync> Default for ErrorContext<T> {
  fn default() -> Self {
    Self {
      timestamp: chrono::Utc::now(),
      item: None,
      component_name: "default".to_string(),
      component_type: "default".to_string(),
    }
  }
}

/// Identifying information about a component, used in logs and errors.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentInfo {
  /// The name of the component.
  pub name: String,
  /// The type name of the component.
  pub type_name: String,
}

impl Default for ComponentInfo {
  fn default() -> Self {
    Self {
      name: "default".to_string(),
      type_name: "default".to_string(),
    }
  }
}

impl ComponentInfo {
  /// Creates a new `ComponentInfo` with the given name and type name.
  pub fn new(name: String, type_name: String) -> Self {
    Self { name, type_name }
  }
}
