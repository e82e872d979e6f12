//! # Transformer Trait
//!
//! The `Transformer` trait is the sequence-transform contract: a component that
//! turns an input stream into an output stream. Pipelines compose transformers
//! by feeding one transformer's output stream into the next one's input; the
//! pipeline owns backpressure and termination, the transformer only defines the
//! per-item mapping.
//!
//! Every transformer carries a [`TransformerConfig`] holding its name (used in
//! logs and error reports) and the [`ErrorStrategy`] applied when an item fails.
//!
//! ## Example
//!
//! ```rust
//! use streamweave_mean::transformer::Transformer;
//! use streamweave_mean::transformers::RunningMeanTransformer;
//! use futures::{stream, StreamExt};
//!
//! # async fn example() {
//! let mut transformer = RunningMeanTransformer::new();
//! let input = Box::pin(stream::iter(vec![1.0, 2.0, 3.0]));
//! let means: Vec<f64> = transformer.transform(input).await.collect().await;
//! assert_eq!(means, vec![1.0, 1.5, 2.0]);
//! # }
//! ```

use crate::error::{ComponentInfo, ErrorAction, ErrorContext, ErrorStrategy, StreamError};
use crate::{input::Input, output::Output};
use async_trait::async_trait;

/// Configuration shared by all transformers: error handling and naming.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformerConfig<M: std::fmt::Debug + Clone + Send + Sync> {
  /// The error handling strategy to use when errors occur.
  pub error_strategy: ErrorStrategy<M>,
  /// Optional name for identifying this transformer in logs.
  pub name: Option<String>,
}

impl<M: std::fmt::Debug + Clone + Send + Sync> Default for TransformerConfig<M> {
  fn default() -> Self {
    Self {
      error_strategy: ErrorStrategy::Stop,
      name: None,
    }
  }
}

impl<M: std::fmt::Debug + Clone + Send + Sync> TransformerConfig<M> {
  /// Sets the error handling strategy.
  pub fn with_error_strategy(mut self, strategy: ErrorStrategy<M>) -> Self {
    self.error_strategy = strategy;
    self
  }

  /// Sets the name.
  pub fn with_name(mut self, name: String) -> Self {
    self.name = Some(name);
    self
  }

  /// Returns the current error handling strategy.
  pub fn error_strategy(&self) -> ErrorStrategy<M> {
    self.error_strategy.clone()
  }

  /// Returns the current name, if set.
  pub fn name(&self) -> Option<String> {
    self.name.clone()
  }

  /// Determines the [`ErrorAction`] for `error` from the configured strategy.
  ///
  /// `Retry(n)` asks for a retry while `error.retries < n` and stops after.
  pub fn handle_error(&self, error: &StreamError<M>) -> ErrorAction {
    match &self.error_strategy {
      ErrorStrategy::Stop => ErrorAction::Stop,
      ErrorStrategy::Skip => ErrorAction::Skip,
      ErrorStrategy::Retry(n) if error.retries < *n => ErrorAction::Retry,
      ErrorStrategy::Retry(_) => ErrorAction::Stop,
      ErrorStrategy::Custom(handler) => handler(error),
    }
  }
}

/// Builds an [`ErrorContext`] for `item` raised by `component`, stamped with
/// the current time.
pub fn error_context<T>(item: Option<T>, component: &ComponentInfo) -> ErrorContext<T>
where
  T: std::fmt::Debug + Clone + Send + Sync,
{
  ErrorContext {
    timestamp: chrono::Utc::now(),
    item,
    component_name: component.name.clone(),
    component_type: component.type_name.clone(),
  }
}

/// Trait for components that transform data streams.
///
/// Implementations must emit items in the order the input stream yields them.
/// Whether one input maps to exactly one output is up to the transformer; the
/// running mean guarantees it unless input validation drops an item.
#[async_trait]
pub trait Transformer: Input + Output
where
  Self::Input: std::fmt::Debug + Clone + Send + Sync,
{
  /// Transforms a stream of input items into a stream of output items.
  async fn transform(&mut self, input: Self::InputStream) -> Self::OutputStream;

  /// Replaces the configuration. Streams already produced keep the
  /// configuration they were started with.
  fn set_config(&mut self, config: TransformerConfig<Self::Input>) {
    self.set_config_impl(config);
  }

  /// Returns a reference to the transformer's configuration.
  fn config(&self) -> &TransformerConfig<Self::Input> {
    self.get_config_impl()
  }

  /// Returns the name and type of this transformer.
  fn component_info(&self) -> ComponentInfo {
    ComponentInfo {
      name: self
        .config()
        .name()
        .unwrap_or_else(|| "transformer".to_string()),
      type_name: std::any::type_name::<Self>().to_string(),
    }
  }

  /// Stores the configuration.
  fn set_config_impl(&mut self, config: TransformerConfig<Self::Input>);

  /// Returns the stored configuration.
  fn get_config_impl(&self) -> &TransformerConfig<Self::Input>;
}
