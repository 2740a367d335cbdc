//! Telescope parameters.
//!
//! Lengths share one (arbitrary) unit, angles are in radians. Every field has a
//! default, so partial JSON documents are accepted.

use std::io::Read;

use facette::{ConfigurationError, Float, Result};
use serde::{Deserialize, Serialize};

/// Shape of every facet of the primary mirror
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FacetProfile {
    /// Facets are arcs of the circle of curvature
    #[default]
    Spherical,
    /// Facets are parts of the parabola with the same vertex and focus
    Parabolic,
}

impl FacetProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            FacetProfile::Spherical => "spherical",
            FacetProfile::Parabolic => "parabolic",
        }
    }
}

/// The segmented primary mirror
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    /// Radius of curvature, the focus lies halfway between the mirror and
    /// its center of curvature
    pub radius: Float,
    /// Half width of the mirror, measured across the optical axis
    pub aperture: Float,
    /// Number of facets the aperture is divided into
    pub facet_count: usize,
    /// Fraction of its slot each facet covers, in `(0, 1]`
    pub density: Float,
    pub profile: FacetProfile,
    /// Rotation of the whole mirror around the center of curvature
    pub rotation: Float,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            radius: 202.,
            aperture: 60.,
            facet_count: 8,
            density: 1.,
            profile: FacetProfile::Spherical,
            rotation: 0.,
        }
    }
}

impl MirrorConfig {
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(ConfigurationError::InvalidConfiguration(msg));

        if !(self.radius > 0.) || !self.radius.is_finite() {
            return Err(ConfigurationError::NonPositiveRadius(self.radius));
        }
        if !(self.aperture > 0. && self.aperture < self.radius) {
            return invalid(format!(
                "aperture must lie in (0, {}), got {}",
                self.radius, self.aperture
            ));
        }
        if self.facet_count == 0 {
            return invalid("a mirror needs at least one facet".into());
        }
        if !(self.density > 0. && self.density <= 1.) {
            return invalid(format!("density must lie in (0, 1], got {}", self.density));
        }
        if !self.rotation.is_finite() {
            return invalid(format!("rotation must be finite, got {}", self.rotation));
        }
        Ok(())
    }
}

/// The fan of parallel rays coming from a star
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RayFanConfig {
    /// Angle between the incoming light and the optical axis
    pub incidence: Float,
    /// Number of rays on each side of the chief ray
    pub count: usize,
    /// Fraction of the aperture covered by the fan
    pub span: Float,
    pub max_bounces: usize,
    /// Where to sample the wavefront along each path, in multiples of the
    /// mirror's radius
    pub wavefront_distance: Float,
}

impl Default for RayFanConfig {
    fn default() -> Self {
        Self {
            incidence: 0.,
            count: 20,
            span: 0.99,
            max_bounces: facette::DEFAULT_MAX_BOUNCES,
            wavefront_distance: 2.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TelescopeConfig {
    pub mirror: MirrorConfig,
    pub rays: RayFanConfig,
}

impl TelescopeConfig {
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn from_reader(reader: impl Read) -> serde_json::Result<Self> {
        serde_json::from_reader(reader)
    }
}
