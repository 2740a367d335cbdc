use core::f64::consts::{FRAC_PI_2, PI};
use std::sync::{Arc, PoisonError, RwLock};

use facette::{vector, Composite, Float, Result, Vector2};
use facette_shapes::{CircularArc, Facet, Parabola};

use crate::{FacetProfile, MirrorConfig};

/// The geometry of a whole segmented mirror
pub type MirrorGeometry = Composite<Facet>;

/// Builds one facet per slot of the mirror's aperture.
///
/// The mirror's center of curvature is the origin, and, before rotation, its
/// vertex lies at `(0, radius)`, so that light coming from negative `y`s is
/// focused around `(0, radius / 2)`.
pub fn build_geometry(config: &MirrorConfig) -> Result<MirrorGeometry> {
    config.validate()?;

    let n = config.facet_count;

    let geometry: MirrorGeometry = match config.profile {
        FacetProfile::Spherical => {
            let half_angle = (config.aperture / config.radius).asin();
            let first = FRAC_PI_2 - half_angle + config.rotation;

            facet_spans(first, 2. * half_angle, n, config.density)
                .map(|span| {
                    CircularArc::try_new(Vector2::zeros(), config.radius, &span).map(Facet::from)
                })
                .collect::<Result<_>>()?
        }
        FacetProfile::Parabolic => {
            let (sin, cos) = config.rotation.sin_cos();
            let vertex = vector::rotate(&Vector2::new(0., config.radius), cos, sin);

            facet_spans(-config.aperture, 2. * config.aperture, n, config.density)
                .map(|span| {
                    Parabola::try_new(vertex, config.radius / 2., PI + config.rotation, &span)
                        .map(Facet::from)
                })
                .collect::<Result<_>>()?
        }
    };

    log::debug!(
        "built {} {} facets, radius {}, aperture {}",
        geometry.len(),
        config.profile.as_str(),
        config.radius,
        config.aperture,
    );

    Ok(geometry)
}

/// Splits `[start, start + width]` into `n` slots, and returns the part of each
/// slot a facet covers, centered in it.
///
/// With a density of `1`, neighbouring spans share the exact same bound, so
/// no ray can slip between two facets.
fn facet_spans(
    start: Float,
    width: Float,
    n: usize,
    density: Float,
) -> impl Iterator<Item = [Float; 2]> {
    let slot = width / n as Float;
    let (lo, hi) = ((1. - density) / 2., (1. + density) / 2.);

    (0..n).map(move |i| {
        let a = start + i as Float * slot;
        let b = start + (i + 1) as Float * slot;
        [a * (1. - lo) + b * lo, a * (1. - hi) + b * hi]
    })
}

/// A mirror geometry that can be replaced while other threads trace against it.
///
/// Readers take a snapshot with [`Self::load`] and keep using it for as long as
/// they need, replacing the geometry never mutates a snapshot.
#[derive(Debug, Default)]
pub struct SharedGeometry {
    current: RwLock<Arc<MirrorGeometry>>,
}

impl SharedGeometry {
    pub fn new(geometry: MirrorGeometry) -> Self {
        Self {
            current: RwLock::new(Arc::new(geometry)),
        }
    }

    pub fn from_config(config: &MirrorConfig) -> Result<Self> {
        build_geometry(config).map(Self::new)
    }

    /// The current geometry
    pub fn load(&self) -> Arc<MirrorGeometry> {
        // the lock only guards a pointer swap, it can't be left in a bad state
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Replaces the current geometry, returning the previous one.
    pub fn store(&self, geometry: MirrorGeometry) -> Arc<MirrorGeometry> {
        let new = Arc::new(geometry);
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        core::mem::replace(&mut *current, new)
    }

    /// Builds a geometry from `config` and swaps it in.
    ///
    /// On error, the current geometry is left untouched.
    pub fn rebuild(&self, config: &MirrorConfig) -> Result<()> {
        let geometry = build_geometry(config)?;
        log::info!(
            "replacing mirror geometry: {} {} facets",
            geometry.len(),
            config.profile.as_str()
        );
        self.store(geometry);
        Ok(())
    }
}
