//! Transformer implementations for RunningMeanTransformer.

use crate::accumulator::AccumulatorState;
use crate::error::{ComponentInfo, ErrorAction, MeanError, StreamError};
use crate::input::Input;
use crate::output::Output;
use crate::stateful_transformer::{
  InMemoryStateStore, StateResult, StateStore, StateStoreExt, StatefulTransformer,
};
use crate::transformer::{Transformer, TransformerConfig, error_context};
use crate::transformers::running_mean::running_mean_transformer::{
  Phase, RunningMeanTransformer, read_phase,
};
use async_trait::async_trait;
use futures::future;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::sync::{Arc, PoisonError, RwLock};

/// Outcome of processing one input value.
enum Step {
  Emit(f64),
  Skip,
  Stop,
}

/// Per-stream bookkeeping carried through `scan`.
#[derive(Default)]
struct StreamState {
  started: bool,
  contaminated: bool,
}

/// Fixes the seed when a stream receives its first value and loads it into the
/// stream's accumulator, so setters called between `transform` and the first
/// poll take effect.
fn begin(
  phase: &RwLock<Phase>,
  store: &InMemoryStateStore<AccumulatorState>,
  component: &ComponentInfo,
) -> StateResult<()> {
  let mut phase = phase.write().unwrap_or_else(PoisonError::into_inner);
  if !phase.streaming {
    phase.streaming = true;
    tracing::debug!(
      component = %component.name,
      initial_mean = phase.seed.initial_mean(),
      initial_count = phase.seed.initial_count(),
      "First value received, seed is fixed"
    );
  }
  store.set(phase.seed.to_state())
}

/// Routes a non-finite input through the configured error strategy.
fn reject(config: &TransformerConfig<f64>, component: &ComponentInfo, value: f64) -> Step {
  let error = StreamError::new(
    Box::new(MeanError::NonFiniteInput { value }),
    error_context(Some(value), component),
    component.clone(),
  );

  match config.handle_error(&error) {
    ErrorAction::Skip => {
      tracing::warn!(
        component = %component.name,
        value,
        "Non-finite input, skipping item"
      );
      Step::Skip
    }
    ErrorAction::Stop => {
      tracing::warn!(
        component = %component.name,
        value,
        "Non-finite input, stopping stream"
      );
      Step::Stop
    }
    ErrorAction::Retry => {
      tracing::warn!(
        component = %component.name,
        value,
        "Non-finite input cannot succeed on retry, stopping stream"
      );
      Step::Stop
    }
  }
}

impl Input for RunningMeanTransformer {
  type Input = f64;
  type InputStream = Pin<Box<dyn Stream<Item = f64> + Send>>;
}

impl Output for RunningMeanTransformer {
  type Output = f64;
  type OutputStream = Pin<Box<dyn Stream<Item = f64> + Send>>;
}

#[async_trait]
impl Transformer for RunningMeanTransformer {
  async fn transform(&mut self, input: Self::InputStream) -> Self::OutputStream {
    // Every stream accumulates in its own store; the transformer exposes the
    // most recent one.
    let store = Arc::new(InMemoryStateStore::new(read_phase(&self.phase).seed.to_state()));
    self.state_store = Arc::clone(&store);

    let phase = Arc::clone(&self.phase);
    let config = self.config.clone();
    let component = self.component_info();
    let validate_input = self.validate_input;

    tracing::debug!(
      component = %component.name,
      validate_input,
      "Starting running mean stream"
    );

    input
      .scan(StreamState::default(), move |stream, x| {
        if !stream.started {
          stream.started = true;
          if let Err(e) = begin(&phase, &store, &component) {
            tracing::error!(component = %component.name, error = %e, "Failed to load seed");
            return future::ready(None);
          }
        }

        let step = if validate_input && !x.is_finite() {
          reject(&config, &component, x)
        } else {
          match store.update(move |current| AccumulatorState::fold(current.unwrap_or_default(), x)) {
            Ok(state) => {
              if !stream.contaminated && !state.mean.is_finite() {
                stream.contaminated = true;
                tracing::warn!(
                  component = %component.name,
                  value = x,
                  count = state.count,
                  "Running mean is no longer finite; all later means will be affected"
                );
              }
              Step::Emit(state.mean)
            }
            Err(e) => {
              tracing::error!(component = %component.name, error = %e, "Failed to update running mean");
              Step::Stop
            }
          }
        };

        future::ready(match step {
          Step::Emit(mean) => Some(Some(mean)),
          Step::Skip => Some(None),
          Step::Stop => None,
        })
      })
      .filter_map(future::ready)
      .boxed()
  }

  fn set_config_impl(&mut self, config: TransformerConfig<f64>) {
    self.config = config;
  }

  fn get_config_impl(&self) -> &TransformerConfig<f64> {
    &self.config
  }

  fn component_info(&self) -> ComponentInfo {
    ComponentInfo {
      name: self
        .config
        .name
        .clone()
        .unwrap_or_else(|| "running_mean_transformer".to_string()),
      type_name: std::any::type_name::<Self>().to_string(),
    }
  }
}

impl StatefulTransformer for RunningMeanTransformer {
  type State = AccumulatorState;
  type Store = Arc<InMemoryStateStore<AccumulatorState>>;

  fn state_store(&self) -> &Self::Store {
    &self.state_store
  }

  fn initial_state(&self) -> AccumulatorState {
    self.seed().to_state()
  }
}
