//! # StreamWeave Mean
//!
//! Running arithmetic mean over an unbounded stream of numbers, packaged as a
//! composable stream transformer.
//!
//! Each value entering the [`RunningMeanTransformer`] is folded into a
//! `(count, mean)` accumulator using the incremental update
//! `mean += (x - mean) / count`, and the new mean is emitted downstream. Memory
//! and per-item work are constant.
//!
//! ## Quick Start
//!
//! ```rust
//! use streamweave_mean::{RunningMeanTransformer, Transformer};
//! use futures::StreamExt;
//!
//! # async fn example() {
//! let mut transformer = RunningMeanTransformer::new();
//! let input = Box::pin(futures::stream::iter(vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]));
//! let means: Vec<f64> = transformer.transform(input).await.collect().await;
//! assert_eq!(means.last(), Some(&5.0));
//! # }
//! ```
//!
//! ## Seeding
//!
//! A transformer can continue a mean computed elsewhere by seeding it with the
//! prior mean and observation count, either through the setters on the
//! transformer or with a [`MeanConfig`]. Seeds are fixed once the first value is
//! consumed.

#![deny(missing_docs)]

/// Incremental `(count, mean)` accumulator.
pub mod accumulator;
/// Seed configuration.
pub mod config;
/// Error types and error handling strategies.
pub mod error;
/// Input side of the transformer contract.
pub mod input;
/// Output side of the transformer contract.
pub mod output;
/// State storage and the stateful transformer trait.
pub mod stateful_transformer;
/// Core transformer trait and configuration.
pub mod transformer;
/// Built-in transformers.
pub mod transformers;

pub use accumulator::AccumulatorState;
pub use config::MeanConfig;
pub use error::{ErrorAction, ErrorStrategy, MeanError};
pub use input::Input;
pub use output::Output;
pub use stateful_transformer::{InMemoryStateStore, StateStore, StatefulTransformer};
pub use transformer::{Transformer, TransformerConfig};
pub use transformers::RunningMeanTransformer;

#[cfg(test)]
mod accumulator_test;
#[cfg(test)]
mod config_test;
#[cfg(test)]
mod error_test;
