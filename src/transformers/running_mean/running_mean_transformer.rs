//! Builder and configuration for the RunningMeanTransformer.

use crate::accumulator::AccumulatorState;
use crate::config::{INITIAL_COUNT, INITIAL_MEAN, MeanConfig};
use crate::error::{ErrorStrategy, MeanError};
use crate::stateful_transformer::{InMemoryStateStore, StateStore};
use crate::transformer::TransformerConfig;
use num_traits::ToPrimitive;
use std::sync::{Arc, PoisonError, RwLock};

/// Seed and phase, shared by a transformer and every stream it produces.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Phase {
  pub(crate) seed: MeanConfig,
  pub(crate) streaming: bool,
}

pub(crate) type SharedPhase = Arc<RwLock<Phase>>;

/// Reads the phase. It is plain data, so a poisoned lock still holds a
/// consistent value.
pub(crate) fn read_phase(phase: &RwLock<Phase>) -> Phase {
  *phase.read().unwrap_or_else(PoisonError::into_inner)
}

/// A stateful transformer that emits the running mean of a stream of numbers.
///
/// Each input value is folded into an [`AccumulatorState`] and the updated mean
/// is emitted; the observation count stays internal. One value in gives exactly
/// one mean out, in arrival order.
///
/// The accumulator may be seeded with a prior `(count, mean)` pair before the
/// first value is consumed. A stream that has been produced but not yet polled
/// still follows the setters: it loads the seed when its first value arrives.
/// From then on the seed is fixed and the setters return
/// [`MeanError::AlreadyStreaming`].
///
/// Values are not validated by default: a NaN turns every later mean into NaN.
/// See [`with_input_validation`](Self::with_input_validation) to reject
/// non-finite values through the configured [`ErrorStrategy`] instead.
///
/// # Example
///
/// ```rust
/// use streamweave_mean::transformers::RunningMeanTransformer;
/// use streamweave_mean::transformer::Transformer;
/// use futures::StreamExt;
///
/// # async fn example() -> Result<(), streamweave_mean::error::MeanError> {
/// let mut transformer = RunningMeanTransformer::new();
/// transformer.set_initial_mean(10)?.set_initial_count(2)?;
///
/// let input = Box::pin(futures::stream::iter(vec![4.0]));
/// let means: Vec<f64> = transformer.transform(input).await.collect().await;
/// assert_eq!(means, vec![8.0]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RunningMeanTransformer {
  /// Configuration for the transformer.
  pub(crate) config: TransformerConfig<f64>,
  /// Seed every produced stream starts from, and whether one has started.
  pub(crate) phase: SharedPhase,
  /// Accumulator of the most recently produced stream.
  pub(crate) state_store: Arc<InMemoryStateStore<AccumulatorState>>,
  /// Whether non-finite inputs are routed through the error strategy.
  pub(crate) validate_input: bool,
}

impl Clone for RunningMeanTransformer {
  fn clone(&self) -> Self {
    Self {
      config: self.config.clone(),
      phase: Arc::new(RwLock::new(read_phase(&self.phase))),
      state_store: Arc::new((*self.state_store).clone()),
      validate_input: self.validate_input,
    }
  }
}

impl RunningMeanTransformer {
  /// Creates a new RunningMeanTransformer seeded with `{count: 0, mean: 0}`.
  pub fn new() -> Self {
    Self::with_seed(MeanConfig::default())
  }

  /// Creates a new RunningMeanTransformer from a validated seed.
  pub fn with_seed(seed: MeanConfig) -> Self {
    Self {
      config: TransformerConfig::default(),
      phase: Arc::new(RwLock::new(Phase {
        seed,
        streaming: false,
      })),
      state_store: Arc::new(InMemoryStateStore::new(seed.to_state())),
      validate_input: false,
    }
  }

  /// Sets the name for this transformer.
  pub fn with_name(mut self, name: String) -> Self {
    self.config.name = Some(name);
    self
  }

  /// Sets the error strategy for this transformer.
  ///
  /// Only consulted when input validation is enabled.
  pub fn with_error_strategy(mut self, strategy: ErrorStrategy<f64>) -> Self {
    self.config.error_strategy = strategy;
    self
  }

  /// Enables or disables stream-time validation of input values.
  ///
  /// When enabled, a NaN or infinite value is not folded. It is reported as a
  /// stream error and the error strategy decides whether the value is skipped
  /// or the stream stops. Retrying cannot change the value, so a `Retry`
  /// decision stops the stream.
  pub fn with_input_validation(mut self, enabled: bool) -> Self {
    self.validate_input = enabled;
    self
  }

  /// Returns the seed mean.
  pub fn initial_mean(&self) -> f64 {
    self.seed().initial_mean()
  }

  /// Sets the seed mean.
  ///
  /// # Errors
  ///
  /// [`MeanError::InvalidArgument`] if `value` is not a finite number,
  /// [`MeanError::AlreadyStreaming`] if values have already been consumed.
  pub fn set_initial_mean<M: ToPrimitive>(&mut self, value: M) -> Result<&mut Self, MeanError> {
    self.reseed(INITIAL_MEAN, |seed| seed.with_initial_mean(value))?;
    Ok(self)
  }

  /// Returns the seed count.
  pub fn initial_count(&self) -> u64 {
    self.seed().initial_count()
  }

  /// Sets the number of prior observations the seed mean represents.
  ///
  /// # Errors
  ///
  /// [`MeanError::InvalidArgument`] if `value` is not a non-negative integer
  /// below `u64::MAX`, [`MeanError::AlreadyStreaming`] if values have already
  /// been consumed.
  pub fn set_initial_count<C: ToPrimitive>(&mut self, value: C) -> Result<&mut Self, MeanError> {
    self.reseed(INITIAL_COUNT, |seed| seed.with_initial_count(value))?;
    Ok(self)
  }

  /// Returns the current seed.
  pub fn seed(&self) -> MeanConfig {
    read_phase(&self.phase).seed
  }

  /// Returns `true` once any produced stream has received a value.
  pub fn is_streaming(&self) -> bool {
    read_phase(&self.phase).streaming
  }

  // The phase lock is held across the check and the store update so a stream
  // receiving its first value concurrently sees either the old seed or the new
  // one, never a half-applied change.
  fn reseed<F>(&self, field: &'static str, change: F) -> Result<(), MeanError>
  where
    F: FnOnce(MeanConfig) -> Result<MeanConfig, MeanError>,
  {
    let mut phase = self.phase.write().unwrap_or_else(PoisonError::into_inner);
    if phase.streaming {
      return Err(MeanError::AlreadyStreaming { field });
    }
    let seed = change(phase.seed)?;
    self.state_store.set(seed.to_state())?;
    phase.seed = seed;

    tracing::debug!(
      initial_mean = seed.initial_mean(),
      initial_count = seed.initial_count(),
      "running mean reseeded"
    );
    Ok(())
  }
}

impl Default for RunningMeanTransformer {
  fn default() -> Self {
    Self::new()
  }
}
