//! Segmented telescope mirrors, and the fans of parallel rays used to probe them.

mod config;
mod geometry;
mod rays;

pub use config::*;
pub use geometry::*;
pub use rays::*;

use facette::{vector, Float, Path, Ray, RayTracer, Result, Shape, Vector2};
use rayon::prelude::*;

/// Catmull-Rom
pub const WAVEFRONT_TENSION: Float = 0.5;

/// The result of tracing a fan of rays through a mirror.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    /// One path per incident ray, in the same order
    pub paths: Vec<Path>,
    /// The point reached by each ray after travelling the same distance
    pub wavefront: Vec<Vector2>,
}

impl Observation {
    /// Traces every ray in `rays` in parallel, then samples each path at
    /// `wavefront_distance`.
    pub fn trace<M: Shape + Sync + ?Sized>(
        geometry: &M,
        rays: &[Ray],
        tracer: &RayTracer,
        wavefront_distance: Float,
    ) -> Self {
        let paths: Vec<Path> = rays
            .par_iter()
            .map(|&ray| tracer.trace(geometry, ray))
            .collect();

        let wavefront = paths
            .iter()
            .map(|path| path.march(wavefront_distance))
            .collect();

        Self { paths, wavefront }
    }

    /// Number of rays that didn't bounce off anything
    #[must_use]
    pub fn lost_rays(&self) -> usize {
        self.paths.iter().filter(|path| path.is_lost()).count()
    }

    /// The wavefront, as a smooth curve sampled `segments` times between
    /// consecutive points.
    #[must_use]
    pub fn smoothed_wavefront(&self, segments: usize) -> Vec<Vector2> {
        vector::cardinal_spline(&self.wavefront, WAVEFRONT_TENSION, segments)
    }

    /// Largest distance between a point of the wavefront and `point`
    #[must_use]
    pub fn spread_around(&self, point: &Vector2) -> Float {
        self.wavefront
            .iter()
            .map(|p| vector::distance(p, point))
            .fold(0., Float::max)
    }
}

/// Builds the mirror described by `config`, and traces its ray fan through it.
pub fn observe(config: &TelescopeConfig) -> Result<Observation> {
    let geometry = build_geometry(&config.mirror)?;
    Ok(observe_geometry(&geometry, config))
}

/// Traces the ray fan of `config` through an already built geometry.
pub fn observe_geometry<M: Shape + Sync + ?Sized>(
    geometry: &M,
    config: &TelescopeConfig,
) -> Observation {
    let TelescopeConfig { mirror, rays: fan } = config;

    let rays = incident_rays(mirror, fan);
    let tracer = RayTracer::new(fan.max_bounces, mirror.radius);

    log::info!(
        "tracing {} rays at incidence {} through a {} mirror",
        rays.len(),
        fan.incidence,
        mirror.profile.as_str(),
    );

    let observation = Observation::trace(
        geometry,
        &rays,
        &tracer,
        fan.wavefront_distance * mirror.radius,
    );

    let lost = observation.lost_rays();
    if lost > 0 {
        log::warn!("{lost} of {} rays missed the mirror", rays.len());
    }
    log::debug!(
        "wavefront spread around the focus: {}",
        observation.spread_around(&focal_point(mirror, fan.incidence))
    );

    observation
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn parabolic() -> TelescopeConfig {
        TelescopeConfig {
            mirror: MirrorConfig {
                profile: FacetProfile::Parabolic,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn parabolic_mirror_focuses_a_plane_wave() {
        let config = parabolic();
        let focus = focal_point(&config.mirror, 0.);
        let observation = observe(&config).unwrap();

        assert_eq!(observation.paths.len(), 41);
        assert_eq!(observation.lost_rays(), 0);

        for path in &observation.paths {
            assert_eq!(path.bounces(), 1);
            let closest = vector::project(&focus, &[path[1], path[2]]);
            assert_relative_eq!(closest, focus, epsilon = 1e-6);
        }

        // every ray travels the same distance to the focus
        assert!(observation.spread_around(&focus) < 1e-6);
    }

    #[test]
    fn spherical_mirror_has_spherical_aberration() {
        let config = TelescopeConfig::default();
        let focus = focal_point(&config.mirror, 0.);
        let observation = observe(&config).unwrap();

        assert_eq!(observation.lost_rays(), 0);

        // the chief ray is focused, marginal rays are not
        let chief = observation.wavefront[config.rays.count];
        assert_relative_eq!(chief, focus, epsilon = 1e-9);
        assert!(observation.spread_around(&focus) > 1e-3);
    }

    #[test]
    fn sparse_mirrors_lose_rays() {
        let mut config = TelescopeConfig::default();
        config.mirror.facet_count = 4;
        config.mirror.density = 0.5;

        let observation = observe(&config).unwrap();
        assert!(observation.lost_rays() > 0);

        for path in observation.paths.iter().filter(|path| path.is_lost()) {
            assert_eq!(path.len(), 2);
            assert_relative_eq!(
                vector::distance(&path[0], &path[1]),
                facette::LOST_RAY_EXTENT * config.mirror.radius,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn shared_geometry_can_be_observed() {
        let config = parabolic();
        let shared = SharedGeometry::from_config(&config.mirror).unwrap();

        let observation = observe_geometry(&*shared.load(), &config);
        assert_eq!(observation, observe(&config).unwrap());
    }

    #[test]
    fn smoothed_wavefront_interpolates() {
        let observation = observe(&TelescopeConfig::default()).unwrap();
        let smooth = observation.smoothed_wavefront(4);

        assert_eq!(smooth.len(), 4 * (observation.wavefront.len() - 1));
        for (i, p) in observation.wavefront[..observation.wavefront.len() - 1]
            .iter()
            .enumerate()
        {
            assert_relative_eq!(smooth[4 * i], *p);
        }
    }

    #[test]
    fn invalid_configs_are_reported() {
        let mut config = TelescopeConfig::default();
        config.mirror.aperture = 500.;
        assert!(observe(&config).is_err());
    }
}
