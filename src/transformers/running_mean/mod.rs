//! Running mean stateful transformer.
//!
//! This module provides a stateful transformer that emits the arithmetic mean
//! of every value seen so far, one mean per input value.

mod running_mean_transformer;
mod transformer;

pub use running_mean_transformer::RunningMeanTransformer;
