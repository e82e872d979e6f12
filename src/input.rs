//! Input trait for components that consume streams.
//!
//! A transformer declares the item type it accepts and the concrete stream type
//! it is handed. For the running mean both are fixed to `f64` and a pinned,
//! boxed stream:
//!
//! ```rust
//! use streamweave_mean::input::Input;
//! use futures::Stream;
//! use std::pin::Pin;
//!
//! struct Sink;
//!
//! impl Input for Sink {
//!   type Input = f64;
//!   type InputStream = Pin<Box<dyn Stream<Item = f64> + Send>>;
//! }
//! ```

use futures::Stream;

/// Trait for components that consume an input stream.
pub trait Input
where
  Self::Input: Send + 'static,
{
  /// The type of items consumed.
  type Input;
  /// The stream type yielding items of type `Self::Input`.
  type InputStream: Stream<Item = Self::Input> + Send + 'static;
}
