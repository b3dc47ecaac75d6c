//! Feature attributes and the policy used to read a magnitude from them.
//!
//! Reference layers arrive with arbitrary column names. Rather than scanning
//! columns ad hoc inside each scorer, every factor is handed an
//! [`AttributeSelector`]: an ordered list of lowercase name fragments and a
//! fallback value used when no attribute yields a number.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Attribute set attached to a reference feature.
///
/// Keys keep the order in which they were read from the source layer, so
/// magnitude resolution is deterministic.
///
/// # Examples
/// ```
/// use firecut_core::Attributes;
/// use serde_json::json;
///
/// let attributes = Attributes::from_iter([("NAME", json!("Station 4")), ("Priority", json!(7))]);
/// assert_eq!(attributes.len(), 2);
/// assert_eq!(attributes.get("priority"), None);
/// assert_eq!(attributes.get("Priority"), Some(&json!(7)));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Attributes {
    entries: Vec<(String, Value)>,
}

impl Attributes {
    /// Construct an empty attribute set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace an attribute, keeping the original position on
    /// replacement.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let name = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Return the value stored under exactly `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Iterate over `(key, value)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Report whether the set holds no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for (key, value) in iter {
            attributes.insert(key, value);
        }
        attributes
    }
}

/// Errors returned by [`AttributeSelector::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectorError {
    /// No name fragments were supplied.
    #[error("attribute selector must include at least one name fragment")]
    NoTokens,
    /// A name fragment was empty or whitespace.
    #[error("attribute selector fragments must not be blank")]
    BlankToken,
    /// The fallback value was NaN or infinite.
    #[error("attribute selector default must be finite, got {default}")]
    NonFiniteDefault {
        /// Offending default value.
        default: f64,
    },
}

/// Policy for reading a numeric magnitude from a feature's attributes.
///
/// The first attribute, in source order, whose lowercase name contains any
/// of the fragments and whose value parses as a finite number wins. If none
/// does, [`AttributeSelector::default_value`] is returned.
///
/// # Examples
/// ```
/// use firecut_core::{AttributeSelector, Attributes};
/// use serde_json::json;
///
/// let selector = AttributeSelector::egress();
/// let route = Attributes::from_iter([("ROUTE_CLASS", json!("3"))]);
/// assert_eq!(selector.resolve(&route), 3.0);
/// assert_eq!(selector.resolve(&Attributes::new()), 10.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "SelectorRepr", into = "SelectorRepr")
)]
pub struct AttributeSelector {
    tokens: Vec<String>,
    default: f64,
}

/// Fallback for factors where missing data means no known risk.
pub const NO_RISK_DEFAULT: f64 = 0.0;

/// Fallback for factors where missing data is treated as high impact.
pub const HIGH_IMPACT_DEFAULT: f64 = 10.0;

impl AttributeSelector {
    /// Build a selector from name fragments and a fallback value.
    ///
    /// Fragments are matched case-insensitively.
    ///
    /// # Errors
    /// Returns [`SelectorError`] when no fragments are given, a fragment is
    /// blank, or the fallback is not finite.
    pub fn new<I, S>(tokens: I, default: f64) -> Result<Self, SelectorError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let fragments: Vec<String> = tokens
            .into_iter()
            .map(|token| token.as_ref().trim().to_lowercase())
            .collect();
        if fragments.is_empty() {
            return Err(SelectorError::NoTokens);
        }
        if fragments.iter().any(String::is_empty) {
            return Err(SelectorError::BlankToken);
        }
        if !default.is_finite() {
            return Err(SelectorError::NonFiniteDefault { default });
        }
        Ok(Self {
            tokens: fragments,
            default,
        })
    }

    fn preset(tokens: &[&str], default: f64) -> Self {
        Self {
            tokens: tokens.iter().map(|&token| token.to_owned()).collect(),
            default,
        }
    }

    /// Selector for tree mortality magnitude.
    #[must_use]
    pub fn mortality() -> Self {
        Self::preset(&["mort", "value", "rate"], NO_RISK_DEFAULT)
    }

    /// Selector for community feature importance.
    #[must_use]
    pub fn community() -> Self {
        Self::preset(&["import", "prior", "weight"], HIGH_IMPACT_DEFAULT)
    }

    /// Selector for egress route priority.
    #[must_use]
    pub fn egress() -> Self {
        Self::preset(&["prior", "import", "class"], HIGH_IMPACT_DEFAULT)
    }

    /// Selector for population density.
    #[must_use]
    pub fn population() -> Self {
        Self::preset(&["pop", "dens", "people"], HIGH_IMPACT_DEFAULT)
    }

    /// Lowercase name fragments in preference order.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Value returned when no attribute resolves.
    #[must_use]
    pub const fn default_value(&self) -> f64 {
        self.default
    }

    fn matches(&self, key: &str) -> bool {
        let lowered = key.to_lowercase();
        self.tokens.iter().any(|token| lowered.contains(token.as_str()))
    }

    /// Resolve the magnitude for a feature's attributes.
    #[must_use]
    pub fn resolve(&self, attributes: &Attributes) -> f64 {
        attributes
            .iter()
            .filter(|(key, _)| self.matches(key))
            .find_map(|(_, value)| parse_number(value))
            .unwrap_or(self.default)
    }
}

fn parse_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

/// Plain representation used when reading selectors from configuration.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SelectorRepr {
    tokens: Vec<String>,
    default: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<SelectorRepr> for AttributeSelector {
    type Error = SelectorError;

    fn try_from(repr: SelectorRepr) -> Result<Self, Self::Error> {
        Self::new(repr.tokens, repr.default)
    }
}

#[cfg(feature = "serde")]
impl From<AttributeSelector> for SelectorRepr {
    fn from(selector: AttributeSelector) -> Self {
        Self {
            tokens: selector.tokens,
            default: selector.default,
        }
    }
}
