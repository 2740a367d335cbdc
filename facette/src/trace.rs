use crate::{Float, Hit, Path, Ray, Shape};

/// Default cap on the number of reflections of a single ray.
pub const DEFAULT_MAX_BOUNCES: usize = 10;

/// Length, in units of [`RayTracer::scale`], of the terminal segment of a ray
/// that never hit anything.
pub const LOST_RAY_EXTENT: Float = 3.;

/// Length, in units of [`RayTracer::scale`], of the terminal segment drawn after
/// a ray's last reflection.
pub const ESCAPED_RAY_EXTENT: Float = 0.75;

/// Lazily bounces a ray off some geometry, yielding every hit in order.
///
/// Stops at the first miss. This can go on forever, e. g. inside a closed
/// concave mirror, so callers should cap the number of items they take.
#[derive(Clone, Debug)]
pub struct Bounces<'a, M: ?Sized> {
    ray: Ray,
    geometry: &'a M,
}

impl<'a, M: Shape + ?Sized> Bounces<'a, M> {
    #[inline]
    pub fn new(geometry: &'a M, ray: Ray) -> Self {
        Self { ray, geometry }
    }

    /// The ray as it leaves the last hit point (or the initial ray)
    #[inline]
    pub fn ray(&self) -> &Ray {
        &self.ray
    }
}

impl<M: Shape + ?Sized> Iterator for Bounces<'_, M> {
    type Item = Hit;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let hit = self.geometry.intersect(&self.ray)?;
        self.ray.origin = hit.point;
        self.ray.reflect_dir(&hit.normal);
        Some(hit)
    }
}

/// Traces rays into bounded [`Path`]s.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayTracer {
    max_bounces: usize,
    scale: Float,
}

impl Default for RayTracer {
    fn default() -> Self {
        Self {
            max_bounces: DEFAULT_MAX_BOUNCES,
            scale: 1.,
        }
    }
}

impl RayTracer {
    #[inline]
    #[must_use]
    pub fn new(max_bounces: usize, scale: Float) -> Self {
        Self { max_bounces, scale }
    }

    #[inline]
    #[must_use]
    pub fn max_bounces(self, max_bounces: usize) -> Self {
        Self {
            max_bounces,
            ..self
        }
    }

    /// Sets the distance scale used for the extrapolated end of escaping rays,
    /// usually the size of the scene.
    #[inline]
    #[must_use]
    pub fn scale(self, scale: Float) -> Self {
        Self { scale, ..self }
    }

    #[inline]
    #[must_use]
    pub fn get_max_bounces(&self) -> usize {
        self.max_bounces
    }

    #[inline]
    #[must_use]
    pub fn get_scale(&self) -> Float {
        self.scale
    }

    /// Bounce `ray` off `geometry` until it escapes, or reflects `max_bounces` times.
    ///
    /// An escaping ray gets an extra, extrapolated, end point, far away if it
    /// never hit anything, just past its last reflection otherwise.
    /// A truncated ray ends at its last hit point.
    ///
    /// The returned path never has more than `max_bounces + 2` points.
    #[must_use]
    pub fn trace<M: Shape + ?Sized>(&self, geometry: &M, ray: Ray) -> Path {
        let mut path = Path::new(ray.origin);
        let mut bounces = Bounces::new(geometry, ray);

        loop {
            if path.bounces() >= self.max_bounces {
                log::trace!("ray from {:?} truncated after {} bounces", ray.origin, path.bounces());
                break;
            }

            match bounces.next() {
                Some(hit) => path.push_bounce(hit.point),
                None => {
                    let extent = if path.is_lost() {
                        LOST_RAY_EXTENT
                    } else {
                        ESCAPED_RAY_EXTENT
                    };
                    let Ray { origin, direction } = bounces.ray();
                    path.terminate(origin + direction.normalize() * (extent * self.scale));
                    break;
                }
            }
        }

        path
    }
}

/// [`RayTracer::trace`] with a scale of `1`
#[inline]
#[must_use]
pub fn trace<M: Shape + ?Sized>(ray: Ray, geometry: &M, max_bounces: usize) -> Path {
    RayTracer::default()
        .max_bounces(max_bounces)
        .trace(geometry, ray)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{tests::Fixed, Composite, Hit, Vector2};
    use approx::assert_relative_eq;

    /// An infinite horizontal mirror at height `y`
    struct Floor(Float);

    impl Shape for Floor {
        fn intersect(&self, ray: &Ray) -> Option<Hit> {
            let t = (self.0 - ray.origin.y) / ray.direction.y;
            (t > crate::MIN_HIT_DISTANCE).then(|| Hit::new(ray.at(t), [0., 1.]))
        }
    }

    #[test]
    fn missing_ray_goes_far() {
        let path = RayTracer::default()
            .scale(10.)
            .trace(&Fixed(None), Ray::new([1., 1.], [0., 2.]));

        assert_eq!(path.points(), &[Vector2::new(1., 1.), Vector2::new(1., 31.)]);
        assert!(path.is_lost());
        assert!(path.is_terminated());
    }

    #[test]
    fn escaping_ray_stops_shortly_after_last_bounce() {
        let path = RayTracer::default()
            .scale(4.)
            .trace(&Floor(0.), Ray::new([0., 2.], [1., -1.]));

        assert_eq!(path.bounces(), 1);
        assert_eq!(path.len(), 3);
        assert_relative_eq!(path[1], Vector2::new(2., 0.));
        assert_relative_eq!((path[2] - path[1]).norm(), 3.);
        assert_relative_eq!(path[2].x - path[1].x, path[2].y - path[1].y);
    }

    #[test]
    fn parallel_mirrors_are_truncated() {
        let corridor = Composite::new([Floor(0.), Floor(1.)]);
        let path = trace(Ray::new([0., 0.5], [1., 1.]), &corridor, 7);

        assert_eq!(path.len(), 8);
        assert_eq!(path.bounces(), 7);
        assert!(!path.is_terminated());
        assert_relative_eq!(path[7], Vector2::new(6.5, 1.));
    }

    #[test]
    fn zero_bounce_cap_keeps_only_the_origin() {
        let path = trace(Ray::new([0., 0.5], [1., 1.]), &Floor(1.), 0);
        assert_eq!(path.points(), &[Vector2::new(0., 0.5)]);
    }

    #[test]
    fn bounces_iterator_reflects() {
        let corridor = [Floor(0.), Floor(1.)];
        let hits = Vec::from_iter(
            Bounces::new(&corridor, Ray::new([0., 0.5], [1., -1.])).take(3),
        );

        assert_eq!(hits.len(), 3);
        assert_relative_eq!(hits[0].point, Vector2::new(0.5, 0.));
        assert_relative_eq!(hits[1].point, Vector2::new(1.5, 1.));
        assert_relative_eq!(hits[2].point, Vector2::new(2.5, 0.));
    }
}
