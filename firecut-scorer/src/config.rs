//! Tunable inputs of a scoring run.
//!
//! A [`ScoringConfig`] holds the factor weights and the attribute selectors
//! used to read magnitudes from reference features. It is usually read from
//! JSON; sections left out fall back to the documented defaults. Decay radii
//! and utility base priorities are fixed and cannot be configured.
//!
//! ```
//! use firecut_core::Factor;
//! use firecut_scorer::ScoringConfig;
//!
//! # fn main() -> Result<(), firecut_scorer::ConfigError> {
//! let config = ScoringConfig::from_json_str(
//!     r#"{
//!         "weights": {
//!             "mortality": 0.4,
//!             "community": 0.15,
//!             "egress": 0.15,
//!             "population": 0.15,
//!             "utility": 0.15
//!         },
//!         "selectors": {
//!             "population": { "tokens": ["residents"], "default": 0.0 }
//!         }
//!     }"#,
//! )?;
//! assert_eq!(config.weights.weight(Factor::Mortality), 0.4);
//! assert_eq!(config.selectors.population.tokens(), ["residents"]);
//! assert_eq!(config.selectors.egress.default_value(), 10.0);
//! # Ok(())
//! # }
//! ```

use std::io::Read;

use firecut_core::{AttributeSelector, Factor, FactorScores, FactorWeights};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Attribute selectors for the factors that read magnitudes from features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AttributeSelectors {
    /// Tree mortality magnitude.
    pub mortality: AttributeSelector,
    /// Community feature importance.
    pub community: AttributeSelector,
    /// Egress route priority.
    pub egress: AttributeSelector,
    /// Population density.
    pub population: AttributeSelector,
}

impl AttributeSelectors {
    /// Selector used for `factor`, or `None` when the factor's magnitudes
    /// are fixed.
    #[must_use]
    pub const fn get(&self, factor: Factor) -> Option<&AttributeSelector> {
        match factor {
            Factor::Mortality => Some(&self.mortality),
            Factor::Community => Some(&self.community),
            Factor::Egress => Some(&self.egress),
            Factor::Population => Some(&self.population),
            Factor::Utility => None,
        }
    }

    const fn get_mut(&mut self, factor: Factor) -> Option<&mut AttributeSelector> {
        match factor {
            Factor::Mortality => Some(&mut self.mortality),
            Factor::Community => Some(&mut self.community),
            Factor::Egress => Some(&mut self.egress),
            Factor::Population => Some(&mut self.population),
            Factor::Utility => None,
        }
    }
}

impl Default for AttributeSelectors {
    fn default() -> Self {
        Self {
            mortality: AttributeSelector::mortality(),
            community: AttributeSelector::community(),
            egress: AttributeSelector::egress(),
            population: AttributeSelector::population(),
        }
    }
}

/// Weights and attribute selectors for one scoring run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringConfig {
    /// Validated factor weights.
    pub weights: FactorWeights,
    /// Attribute selectors per factor.
    pub selectors: AttributeSelectors,
}

impl ScoringConfig {
    /// Parse a configuration from a JSON string.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON, unknown keys,
    /// invalid weights or invalid selectors.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|source| ConfigError::Parse { source })
    }

    /// Read a configuration from a JSON document.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] when reading fails or the document is
    /// invalid.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ConfigError> {
        serde_json::from_reader(reader).map_err(|source| ConfigError::Parse { source })
    }

    /// Replace the weights after validating them.
    ///
    /// # Errors
    /// Returns [`ConfigError::Weights`] when the weights are rejected.
    pub fn with_weights(mut self, weights: FactorScores) -> Result<Self, ConfigError> {
        self.weights = FactorWeights::try_from(weights)?;
        Ok(self)
    }

    /// Replace the selector used for `factor`.
    ///
    /// # Errors
    /// Returns [`ConfigError::NoSelector`] for [`Factor::Utility`] and
    /// [`ConfigError::Selector`] when the selector is rejected.
    pub fn with_selector<I, S>(
        mut self,
        factor: Factor,
        tokens: I,
        default: f64,
    ) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let slot = self
            .selectors
            .get_mut(factor)
            .ok_or(ConfigError::NoSelector { factor })?;
        *slot = AttributeSelector::new(tokens, default)
            .map_err(|source| ConfigError::Selector { factor, source })?;
        Ok(self)
    }
}
