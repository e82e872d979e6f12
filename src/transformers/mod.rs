//! # Transformers Module
//!
//! Transformer implementations built on the [`Transformer`](crate::transformer::Transformer)
//! and [`StatefulTransformer`](crate::stateful_transformer::StatefulTransformer) traits.
//!
//! - **Running mean**: [`RunningMeanTransformer`] emits the arithmetic mean of all
//!   values seen so far, optionally seeded from prior observations.
//!
//! ## Error Handling
//!
//! Transformers carry an [`ErrorStrategy`](crate::error::ErrorStrategy) in their
//! [`TransformerConfig`](crate::transformer::TransformerConfig):
//!
//! - **Stop**: Stop processing on error
//! - **Skip**: Skip items that cause errors
//! - **Retry**: Retry failed items with configurable retry count
//! - **Custom**: Custom error handling logic
pub mod running_mean;

pub use running_mean::RunningMeanTransformer;
