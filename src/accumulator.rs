//! Incremental mean accumulator.
//!
//! [`AccumulatorState`] is the whole state needed to fold one more observation
//! into a running mean: the number of observations seen and their mean. The
//! update uses the incremental form `mean += (x - mean) / count` rather than
//! keeping a running sum, which keeps the magnitude of the state bounded by the
//! magnitude of the data on long streams.
//!
//! # Example
//!
//! ```rust
//! use streamweave_mean::accumulator::AccumulatorState;
//!
//! let state = [2.0, 4.0, 6.0]
//!   .into_iter()
//!   .fold(AccumulatorState::default(), AccumulatorState::fold);
//!
//! assert_eq!(state.count(), 3);
//! assert_eq!(state.mean(), 4.0);
//! ```

use serde::{Deserialize, Serialize};

/// Running `(count, mean)` pair.
///
/// A state with `count == 0` carries its seed mean unchanged; it is not a
/// statistically meaningful mean until at least one value has been folded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AccumulatorState {
  /// Number of observations folded so far, including any seeded count.
  pub count: u64,
  /// Mean of all folded observations.
  pub mean: f64,
}

impl AccumulatorState {
  /// Creates a state representing `count` prior observations with the given mean.
  pub fn new(count: u64, mean: f64) -> Self {
    Self { count, mean }
  }

  /// Folds `x` into `state`, returning the updated state.
  ///
  /// No validation is performed. A NaN or infinite `x` yields a non-finite mean
  /// that stays non-finite for every later observation.
  #[must_use]
  pub fn fold(mut state: Self, x: f64) -> Self {
    state.update(x);
    state
  }

  /// In-place variant of [`AccumulatorState::fold`].
  ///
  /// The count must be below `u64::MAX`; seeds built through
  /// [`MeanConfig`](crate::config::MeanConfig) always are.
  #[inline]
  pub fn update(&mut self, x: f64) {
    self.count += 1;
    let delta = x - self.mean;
    self.mean += delta / self.count as f64;
  }

  /// Number of observations folded so far.
  pub fn count(&self) -> u64 {
    self.count
  }

  /// Current running mean.
  pub fn mean(&self) -> f64 {
    self.mean
  }
}
