//! Risk factors contributing to a cell's cutting priority.
//!
//! The enum offers compile-time safety when addressing per-factor scores and
//! weights.
//!
//! # Examples
//! ```
//! use firecut_core::Factor;
//!
//! assert_eq!(Factor::Mortality.as_str(), "tree_mortality");
//! assert_eq!(Factor::Utility.to_string(), "electric_utilities");
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the five independently scored risk dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Factor {
    /// Dead and dying trees covering the cell.
    Mortality,
    /// Proximity to community facilities.
    Community,
    /// Proximity to evacuation routes.
    Egress,
    /// Exposure of populated areas.
    Population,
    /// Proximity to electric utility infrastructure.
    Utility,
}

impl Factor {
    /// Every factor in scoring order.
    pub const ALL: [Self; 5] = [
        Self::Mortality,
        Self::Community,
        Self::Egress,
        Self::Population,
        Self::Utility,
    ];

    /// Return the factor's stable snake-case name.
    ///
    /// # Examples
    /// ```
    /// use firecut_core::Factor;
    ///
    /// assert_eq!(Factor::Egress.as_str(), "egress_routes");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mortality => "tree_mortality",
            Self::Community => "community_features",
            Self::Egress => "egress_routes",
            Self::Population => "populated_areas",
            Self::Utility => "electric_utilities",
        }
    }

    /// Return a human-readable label for summaries.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mortality => "Tree Mortality",
            Self::Community => "Community Features",
            Self::Egress => "Egress Routes",
            Self::Population => "Populated Areas",
            Self::Utility => "Electric Utilities",
        }
    }
}

impl std::fmt::Display for Factor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per factor.
///
/// Used for raw scores, normalised scores and weights alike.
///
/// # Examples
/// ```
/// use firecut_core::{Factor, FactorScores};
///
/// let mut scores = FactorScores::default();
/// scores.set(Factor::Egress, 5.0);
/// assert_eq!(scores.get(Factor::Egress), 5.0);
/// assert_eq!(scores.get(Factor::Utility), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FactorScores {
    /// Tree mortality value.
    pub mortality: f64,
    /// Community feature value.
    pub community: f64,
    /// Egress route value.
    pub egress: f64,
    /// Populated area value.
    pub population: f64,
    /// Electric utility value.
    pub utility: f64,
}

impl FactorScores {
    /// Return the value recorded for `factor`.
    #[must_use]
    pub const fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Mortality => self.mortality,
            Factor::Community => self.community,
            Factor::Egress => self.egress,
            Factor::Population => self.population,
            Factor::Utility => self.utility,
        }
    }

    /// Overwrite the value recorded for `factor`.
    pub const fn set(&mut self, factor: Factor, value: f64) {
        match factor {
            Factor::Mortality => self.mortality = value,
            Factor::Community => self.community = value,
            Factor::Egress => self.egress = value,
            Factor::Population => self.population = value,
            Factor::Utility => self.utility = value,
        }
    }

    /// Iterate over `(factor, value)` pairs in scoring order.
    pub fn iter(&self) -> impl Iterator<Item = (Factor, f64)> + '_ {
        Factor::ALL.into_iter().map(|factor| (factor, self.get(factor)))
    }
}
