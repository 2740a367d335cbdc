//! 2D reflective ray tracing over segmented mirror surfaces.
//!
//! Shapes implement [`Shape`], returning the first point where a [`Ray`] meets
//! them together with an (outward, not necessarily unit) normal. A [`Composite`]
//! groups shapes and answers with the hit closest to the ray's origin.
//! [`RayTracer`] bounces a ray off some geometry until it escapes or reaches a
//! bounce cap, and [`march`] samples the resulting [`Path`] by arc length.

use std::{rc::Rc, sync::Arc};

mod error;
mod path;
mod trace;
pub mod vector;

pub use error::*;
pub use nalgebra;
pub use path::*;
pub use trace::*;

pub type Float = f64;

pub type Vector2 = nalgebra::Vector2<Float>;

pub type Vector3 = nalgebra::Vector3<Float>;

/// Intersections closer than this (in units of the ray's direction) to the ray's
/// origin are discarded, so that a ray leaving a surface doesn't hit it again
/// because of roundoff errors.
pub const MIN_HIT_DISTANCE: Float = 1e-4;

/// A light ray, represented as a half-line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// The starting point of the half-line
    pub origin: Vector2,
    /// The direction of the half-line, must be non-zero but not necessarily unit
    pub direction: Vector2,
}

impl Ray {
    #[inline]
    #[must_use]
    pub fn new(origin: impl Into<Vector2>, direction: impl Into<Vector2>) -> Self {
        Self {
            origin: origin.into(),
            direction: direction.into(),
        }
    }

    /// Like [`Self::new`] but normalizes `direction`.
    ///
    /// Returns `None` if `direction` is (almost) zero.
    #[inline]
    #[must_use]
    pub fn try_new_normalize(
        origin: impl Into<Vector2>,
        direction: impl Into<Vector2>,
    ) -> Option<Self> {
        let direction = direction.into();
        let norm = direction.norm();
        (norm > Float::EPSILON).then(|| Self::new(origin, direction / norm))
    }

    /// Get the point at parameter `t` (can be negative) along the ray
    #[inline]
    #[must_use]
    pub fn at(&self, t: Float) -> Vector2 {
        self.origin + self.direction * t
    }

    /// Reflect the ray's direction w.r.t. the line orthogonal to `normal`
    #[inline]
    pub fn reflect_dir(&mut self, normal: &Vector2) {
        self.direction = vector::reflect(&self.direction, normal);
    }
}

/// The point where a ray meets a shape, and the shape's normal there.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub point: Vector2,
    /// Faces outwards of the shape, not necessarily of unit length
    pub normal: Vector2,
}

impl Hit {
    #[inline]
    #[must_use]
    pub fn new(point: impl Into<Vector2>, normal: impl Into<Vector2>) -> Self {
        Self {
            point: point.into(),
            normal: normal.into(),
        }
    }
}

/// Returns the hit in `hits` closest to `origin`.
///
/// Ties are broken by iteration order: the first one wins.
#[inline]
#[must_use]
pub fn closest_hit(origin: &Vector2, hits: impl IntoIterator<Item = Hit>) -> Option<Hit> {
    hits.into_iter()
        .map(|hit| (vector::sq_distance(origin, &hit.point), hit))
        .fold(None, |closest: Option<(Float, Hit)>, (d, hit)| match closest {
            Some((closest_d, _)) if closest_d <= d => closest,
            _ => Some((d, hit)),
        })
        .map(|(_, hit)| hit)
}

/// The core trait of this library: something a ray can bounce off.
///
/// Implementations must be deterministic, and must not return hits at a parameter
/// `t <= `[`MIN_HIT_DISTANCE`] along the ray.
pub trait Shape {
    /// Returns the first point (in increasing ray parameter order) where `ray`
    /// meets `self`, and the normal there, or `None` if it misses.
    fn intersect(&self, ray: &Ray) -> Option<Hit>;
}

impl<T: Shape> Shape for [T] {
    #[inline]
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        closest_hit(
            &ray.origin,
            self.iter().filter_map(|shape| shape.intersect(ray)),
        )
    }
}

impl<T: Shape, const N: usize> Shape for [T; N] {
    #[inline]
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        self.as_slice().intersect(ray)
    }
}

impl<T: Shape> Shape for Vec<T> {
    #[inline]
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        self.as_slice().intersect(ray)
    }
}

// A blanket impl over `Deref` would make the trait impossible to implement
// for new smart pointer types downstream.

impl<T: Shape + ?Sized> Shape for Box<T> {
    #[inline]
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        self.as_ref().intersect(ray)
    }
}

impl<T: Shape + ?Sized> Shape for Arc<T> {
    #[inline]
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        self.as_ref().intersect(ray)
    }
}

impl<T: Shape + ?Sized> Shape for Rc<T> {
    #[inline]
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        self.as_ref().intersect(ray)
    }
}

impl<T: Shape + ?Sized> Shape for &T {
    #[inline]
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        (*self).intersect(ray)
    }
}

/// An ordered group of shapes, seen as a single one.
///
/// Intersecting a composite yields the hit, among its children's, closest to the
/// ray's origin. Children are owned, so composites nest into (acyclic) trees.
#[derive(Clone, Debug, PartialEq)]
pub struct Composite<T> {
    children: Vec<T>,
}

impl<T> Default for Composite<T> {
    fn default() -> Self {
        Self {
            children: Vec::new(),
        }
    }
}

impl<T> Composite<T> {
    #[inline]
    #[must_use]
    pub fn new(children: impl Into<Vec<T>>) -> Self {
        Self {
            children: children.into(),
        }
    }

    /// Appends `child` after the existing children.
    #[inline]
    #[must_use]
    pub fn with_child(mut self, child: impl Into<T>) -> Self {
        self.children.push(child.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[T] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn into_children(self) -> Vec<T> {
        self.children
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<T> FromIterator<T> for Composite<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(Vec::from_iter(iter))
    }
}

impl<T: Shape> Shape for Composite<T> {
    #[inline]
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        self.children.intersect(ray)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A shape that always returns the same hit
    pub(crate) struct Fixed(pub Option<Hit>);

    impl Shape for Fixed {
        fn intersect(&self, _ray: &Ray) -> Option<Hit> {
            self.0
        }
    }

    fn ray() -> Ray {
        Ray::new([0., 0.], [1., 0.])
    }

    #[test]
    fn composite_picks_closest_child() {
        let near = Hit::new([2., 0.], [-1., 0.]);
        let far = Hit::new([5., 0.], [-1., 0.]);
        let composite = Composite::new([Fixed(Some(far)), Fixed(None), Fixed(Some(near))]);

        assert_eq!(composite.intersect(&ray()), Some(near));
    }

    #[test]
    fn composite_ties_go_to_first_child() {
        let first = Hit::new([0., 3.], [0., -1.]);
        let second = Hit::new([3., 0.], [-1., 0.]);
        let composite = Composite::new([Fixed(Some(first)), Fixed(Some(second))]);

        assert_eq!(composite.intersect(&ray()), Some(first));
    }

    #[test]
    fn nested_composites_recurse() {
        let inner_hit = Hit::new([1., 0.], [-1., 0.]);
        let inner = Composite::new([Fixed(Some(inner_hit))]);
        let outer = Composite::new([
            Box::new(Fixed(Some(Hit::new([4., 0.], [-1., 0.])))) as Box<dyn Shape>,
            Box::new(inner),
        ]);

        assert_eq!(outer.intersect(&ray()), Some(inner_hit));
    }

    #[test]
    fn empty_composite_misses() {
        let composite = Composite::<Fixed>::default();
        assert!(composite.is_empty());
        assert_eq!(composite.intersect(&ray()), None);
    }

    #[test]
    fn try_new_normalize_rejects_zero_direction() {
        assert!(Ray::try_new_normalize([1., 1.], [0., 0.]).is_none());

        let ray = Ray::try_new_normalize([1., 1.], [3., 4.]).unwrap();
        assert_eq!(ray.direction, Vector2::new(0.6, 0.8));
    }
}
