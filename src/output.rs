//! Output trait for components that produce streams.
//!
//! The counterpart of [`Input`](crate::input::Input). A transformer's output
//! stream type must be `Send + 'static` so it can be handed to whatever drives
//! the pipeline downstream.

use futures::Stream;

/// Trait for components that produce an output stream.
pub trait Output
where
  Self::Output: Send + 'static,
{
  /// The type of items produced.
  type Output;
  /// The stream type yielding items of type `Self::Output`.
  type OutputStream: Stream<Item = Self::Output> + Send + 'static;
}
