//! Reference features and the layers that group them.
//!
//! Layers are read-only inputs to the scorers. They are expected to arrive
//! already reprojected into the grid's coordinate reference system.

use geo::Geometry;

use crate::Attributes;

/// A point, line or polygon with free-form attributes.
///
/// # Examples
/// ```
/// use geo::{Geometry, Point};
/// use firecut_core::{Attributes, ReferenceFeature};
///
/// let substation = ReferenceFeature::new(Point::new(10.0, 20.0), Attributes::new());
/// assert!(matches!(substation.geometry, Geometry::Point(_)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceFeature {
    /// Feature geometry in the grid's coordinate reference system.
    pub geometry: Geometry<f64>,
    /// Attributes read from the source layer.
    pub attributes: Attributes,
}

impl ReferenceFeature {
    /// Construct a feature from any `geo` geometry.
    #[must_use]
    pub fn new(geometry: impl Into<Geometry<f64>>, attributes: Attributes) -> Self {
        Self {
            geometry: geometry.into(),
            attributes,
        }
    }

    /// Construct a feature without attributes.
    #[must_use]
    pub fn bare(geometry: impl Into<Geometry<f64>>) -> Self {
        Self::new(geometry, Attributes::new())
    }
}

/// A named, ordered collection of reference features.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReferenceLayer {
    name: String,
    features: Vec<ReferenceFeature>,
}

impl ReferenceLayer {
    /// Construct a layer.
    #[must_use]
    pub fn new(name: impl Into<String>, features: Vec<ReferenceFeature>) -> Self {
        Self {
            name: name.into(),
            features,
        }
    }

    /// Construct a layer holding no features.
    #[must_use]
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    /// Layer name used in log output.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Features in source order.
    #[must_use]
    pub fn features(&self) -> &[ReferenceFeature] {
        &self.features
    }

    /// Number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Report whether the layer holds no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Append a feature.
    pub fn push(&mut self, feature: ReferenceFeature) {
        self.features.push(feature);
    }
}

/// Electric utility sub-layers, each with a fixed base priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UtilityKind {
    /// High-voltage transmission lines.
    Transmission,
    /// Sub-transmission lines.
    SubTransmission,
    /// Distribution circuits.
    Distribution,
    /// Substations.
    Substation,
    /// Pole-top substations.
    PoleTop,
}

impl UtilityKind {
    /// Every utility kind in evaluation order.
    pub const ALL: [Self; 5] = [
        Self::Transmission,
        Self::SubTransmission,
        Self::Distribution,
        Self::Substation,
        Self::PoleTop,
    ];

    /// Hazard magnitude of infrastructure of this kind.
    ///
    /// # Examples
    /// ```
    /// use firecut_core::UtilityKind;
    ///
    /// assert_eq!(UtilityKind::PoleTop.base_priority(), 7.0);
    /// ```
    #[must_use]
    pub const fn base_priority(self) -> f64 {
        match self {
            Self::Transmission | Self::Substation => 10.0,
            Self::SubTransmission => 8.0,
            Self::PoleTop => 7.0,
            Self::Distribution => 6.0,
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Transmission => "Transmission",
            Self::SubTransmission => "Sub-Transmission",
            Self::Distribution => "Distribution",
            Self::Substation => "Substations",
            Self::PoleTop => "Pole-Top Subs",
        }
    }
}

/// The five utility sub-layers scored jointly.
#[derive(Debug, Clone, PartialEq)]
pub struct UtilityLayers {
    /// Transmission lines.
    pub transmission: ReferenceLayer,
    /// Sub-transmission lines.
    pub sub_transmission: ReferenceLayer,
    /// Distribution circuits.
    pub distribution: ReferenceLayer,
    /// Substations.
    pub substations: ReferenceLayer,
    /// Pole-top substations.
    pub pole_top: ReferenceLayer,
}

impl UtilityLayers {
    /// Return the layer holding infrastructure of `kind`.
    #[must_use]
    pub const fn layer(&self, kind: UtilityKind) -> &ReferenceLayer {
        match kind {
            UtilityKind::Transmission => &self.transmission,
            UtilityKind::SubTransmission => &self.sub_transmission,
            UtilityKind::Distribution => &self.distribution,
            UtilityKind::Substation => &self.substations,
            UtilityKind::PoleTop => &self.pole_top,
        }
    }

    /// Mutable access to the layer holding infrastructure of `kind`.
    pub const fn layer_mut(&mut self, kind: UtilityKind) -> &mut ReferenceLayer {
        match kind {
            UtilityKind::Transmission => &mut self.transmission,
            UtilityKind::SubTransmission => &mut self.sub_transmission,
            UtilityKind::Distribution => &mut self.distribution,
            UtilityKind::Substation => &mut self.substations,
            UtilityKind::PoleTop => &mut self.pole_top,
        }
    }

    /// Iterate over `(kind, layer)` pairs in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (UtilityKind, &ReferenceLayer)> {
        UtilityKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.layer(kind)))
    }
}

impl Default for UtilityLayers {
    fn default() -> Self {
        Self {
            transmission: ReferenceLayer::empty("transmission"),
            sub_transmission: ReferenceLayer::empty("sub_transmission"),
            distribution: ReferenceLayer::empty("dist_circuits"),
            substations: ReferenceLayer::empty("substations"),
            pole_top: ReferenceLayer::empty("pole_top_subs"),
        }
    }
}

/// All reference layers consumed by a scoring run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLayers {
    /// Tree mortality polygons.
    pub mortality: ReferenceLayer,
    /// Community features.
    pub community: ReferenceLayer,
    /// Egress routes.
    pub egress: ReferenceLayer,
    /// Populated area polygons.
    pub populated: ReferenceLayer,
    /// Electric utility sub-layers.
    pub utilities: UtilityLayers,
}

impl Default for ReferenceLayers {
    fn default() -> Self {
        Self {
            mortality: ReferenceLayer::empty("tree_mortality"),
            community: ReferenceLayer::empty("community_features"),
            egress: ReferenceLayer::empty("egress_routes"),
            populated: ReferenceLayer::empty("populated_areas"),
            utilities: UtilityLayers::default(),
        }
    }
}
