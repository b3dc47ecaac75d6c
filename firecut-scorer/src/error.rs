//! Error types raised while loading scoring configuration.

use firecut_core::{Factor, SelectorError, WeightsError};
use thiserror::Error;

/// Errors raised while building or reading a [`ScoringConfig`](crate::ScoringConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration document could not be read or parsed.
    #[error("failed to parse scoring configuration")]
    Parse {
        /// Source error from `serde_json`.
        #[source]
        source: serde_json::Error,
    },
    /// The factor weights were invalid.
    #[error("invalid factor weights")]
    Weights(#[from] WeightsError),
    /// An attribute selector was invalid.
    #[error("invalid attribute selector for {factor}")]
    Selector {
        /// Factor the selector was meant for.
        factor: Factor,
        /// Source validation error.
        #[source]
        source: SelectorError,
    },
    /// The factor does not read magnitudes from attributes.
    #[error("{factor} has fixed magnitudes and takes no attribute selector")]
    NoSelector {
        /// Factor named by the caller.
        factor: Factor,
    },
}
