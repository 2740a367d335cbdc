use facette::{vector, Float, Ray, Vector2};

use crate::{MirrorConfig, RayFanConfig};

/// `2 * fan.count + 1` parallel rays, tilted by `fan.incidence`, starting one
/// radius below the center of curvature.
///
/// Rays are ordered across the aperture, and the chief ray is in the middle.
pub fn incident_rays(mirror: &MirrorConfig, fan: &RayFanConfig) -> Vec<Ray> {
    let (sin, cos) = fan.incidence.sin_cos();
    let direction = Vector2::new(-sin, cos);
    let count = fan.count as isize;
    let y = -2. * mirror.radius;

    (-count..=count)
        .map(|i| {
            let x = if count == 0 {
                0.
            } else {
                mirror.aperture * i as Float * fan.span / count as Float
            };

            let offset = vector::rotate(&Vector2::new(x, y), cos, sin);
            Ray {
                origin: offset + Vector2::new(0., mirror.radius),
                direction,
            }
        })
        .collect()
}

/// Where a perfect mirror would focus light coming at `incidence`
pub fn focal_point(mirror: &MirrorConfig, incidence: Float) -> Vector2 {
    let (sin, cos) = incidence.sin_cos();
    Vector2::new(-sin, cos) * (mirror.radius / 2.)
}
