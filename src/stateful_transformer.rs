//! Stateful transformer trait and state storage.
//!
//! [`StatefulTransformer`] extends [`Transformer`] with access to state that
//! persists across stream items, such as the running mean's accumulator. State
//! lives behind a [`StateStore`]; [`InMemoryStateStore`] is the only backend.
//!
//! A store only holds the current value. What "initial" means is up to the
//! transformer, which may change it while configuring (a reseeded running mean
//! resets to the new seed, not the one the store was created with).
//!
//! # Example
//!
//! ```rust
//! use streamweave_mean::AccumulatorState;
//! use streamweave_mean::stateful_transformer::{InMemoryStateStore, StateStore, StateStoreExt};
//!
//! let store = InMemoryStateStore::new(AccumulatorState::default());
//! store
//!   .update(|current| AccumulatorState::fold(current.unwrap_or_default(), 4.0))
//!   .unwrap();
//! assert_eq!(store.get().unwrap(), Some(AccumulatorState::new(1, 4.0)));
//!
//! store.set(AccumulatorState::new(2, 10.0)).unwrap();
//! assert_eq!(store.get().unwrap().map(|s| s.mean()), Some(10.0));
//! ```

use std::sync::{Arc, RwLock};

use crate::transformer::Transformer;

/// Error type for state operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StateError {
  /// Another thread panicked while holding the state lock.
  #[error("State lock is poisoned")]
  LockPoisoned,
}

/// Result type for state operations.
pub type StateResult<T> = Result<T, StateError>;

/// Trait for state storage backends.
///
/// The update function is boxed to keep the trait dyn compatible.
pub trait StateStore<S>: Send + Sync
where
  S: Clone + Send + Sync,
{
  /// Get a copy of the current state, `None` if nothing has been stored.
  fn get(&self) -> StateResult<Option<S>>;

  /// Replace the state.
  fn set(&self, state: S) -> StateResult<()>;

  /// Update the state using a boxed function and return the new state.
  fn update_with(&self, f: Box<dyn FnOnce(Option<S>) -> S + Send>) -> StateResult<S>;
}

/// Extension trait for state updates with unboxed closures.
pub trait StateStoreExt<S>: StateStore<S>
where
  S: Clone + Send + Sync + 'static,
{
  /// Update the state using a closure.
  fn update<F>(&self, f: F) -> StateResult<S>
  where
    F: FnOnce(Option<S>) -> S + Send + 'static,
  {
    self.update_with(Box::new(f))
  }
}

impl<S, T> StateStoreExt<S> for T
where
  S: Clone + Send + Sync + 'static,
  T: StateStore<S>,
{
}

// Lets a transformer hand out the same store it shares with its output stream.
impl<S, T> StateStore<S> for Arc<T>
where
  S: Clone + Send + Sync,
  T: StateStore<S>,
{
  fn get(&self) -> StateResult<Option<S>> {
    (**self).get()
  }

  fn set(&self, state: S) -> StateResult<()> {
    (**self).set(state)
  }

  fn update_with(&self, f: Box<dyn FnOnce(Option<S>) -> S + Send>) -> StateResult<S> {
    (**self).update_with(f)
  }
}

/// In-memory state store using `RwLock` for thread-safe access.
#[derive(Debug)]
pub struct InMemoryStateStore<S>
where
  S: Clone + Send + Sync,
{
  state: RwLock<Option<S>>,
}

impl<S> InMemoryStateStore<S>
where
  S: Clone + Send + Sync,
{
  /// Create a store holding `initial`.
  pub fn new(initial: S) -> Self {
    Self {
      state: RwLock::new(Some(initial)),
    }
  }
}

impl<S> Clone for InMemoryStateStore<S>
where
  S: Clone + Send + Sync,
{
  fn clone(&self) -> Self {
    // The clone is an independent store starting from the current state.
    let current = self.state.read().ok().and_then(|guard| guard.clone());
    Self {
      state: RwLock::new(current),
    }
  }
}

impl<S> StateStore<S> for InMemoryStateStore<S>
where
  S: Clone + Send + Sync,
{
  fn get(&self) -> StateResult<Option<S>> {
    let guard = self.state.read().map_err(|_| StateError::LockPoisoned)?;
    Ok(guard.clone())
  }

  fn set(&self, state: S) -> StateResult<()> {
    let mut guard = self.state.write().map_err(|_| StateError::LockPoisoned)?;
    *guard = Some(state);
    Ok(())
  }

  fn update_with(&self, f: Box<dyn FnOnce(Option<S>) -> S + Send>) -> StateResult<S> {
    let mut guard = self.state.write().map_err(|_| StateError::LockPoisoned)?;
    let new_state = f(guard.take());
    *guard = Some(new_state.clone());
    Ok(new_state)
  }
}

/// Trait for transformers that maintain state across stream items.
///
/// `state()` reads whatever the transformer's store currently holds;
/// `reset_state()` puts [`initial_state`](Self::initial_state) back.
pub trait StatefulTransformer: Transformer
where
  Self::Input: std::fmt::Debug + Clone + Send + Sync,
{
  /// The type of state maintained by this transformer.
  type State: Clone + Send + Sync + 'static;

  /// The type of state store used by this transformer.
  type Store: StateStore<Self::State>;

  /// Get a reference to the state store.
  fn state_store(&self) -> &Self::Store;

  /// The state a fresh stream starts from.
  fn initial_state(&self) -> Self::State;

  /// Get the current state value.
  fn state(&self) -> StateResult<Option<Self::State>> {
    self.state_store().get()
  }

  /// Reset the state to [`initial_state`](Self::initial_state).
  fn reset_state(&self) -> StateResult<()> {
    self.state_store().set(self.initial_state())
  }
}
