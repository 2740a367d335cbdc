//! Vector arithmetic used by the intersection routines.
//!
//! Functions over `SVector<Float, D>` work for [`Vector2`] and [`Vector3`] alike,
//! the rest only make sense in the plane.
//!
//! Nothing here guards against degenerate input: normalizing or reflecting
//! against a zero vector yields non-finite coordinates.

use nalgebra::SVector;

use crate::{Float, Vector2};

#[inline]
#[must_use]
pub fn add<const D: usize>(a: &SVector<Float, D>, b: &SVector<Float, D>) -> SVector<Float, D> {
    a + b
}

#[inline]
#[must_use]
pub fn sub<const D: usize>(a: &SVector<Float, D>, b: &SVector<Float, D>) -> SVector<Float, D> {
    a - b
}

#[inline]
#[must_use]
pub fn dot<const D: usize>(a: &SVector<Float, D>, b: &SVector<Float, D>) -> Float {
    a.dot(b)
}

#[inline]
#[must_use]
pub fn scale<const D: usize>(l: Float, v: &SVector<Float, D>) -> SVector<Float, D> {
    v * l
}

#[inline]
#[must_use]
pub fn sq_norm<const D: usize>(v: &SVector<Float, D>) -> Float {
    v.norm_squared()
}

#[inline]
#[must_use]
pub fn norm<const D: usize>(v: &SVector<Float, D>) -> Float {
    v.norm()
}

/// `v / ||v||`, `v` must be non-zero.
#[inline]
#[must_use]
pub fn normalize<const D: usize>(v: &SVector<Float, D>) -> SVector<Float, D> {
    v / v.norm()
}

#[inline]
#[must_use]
pub fn distance<const D: usize>(a: &SVector<Float, D>, b: &SVector<Float, D>) -> Float {
    (a - b).norm()
}

#[inline]
#[must_use]
pub fn sq_distance<const D: usize>(a: &SVector<Float, D>, b: &SVector<Float, D>) -> Float {
    (a - b).norm_squared()
}

/// Linear interpolation: `lerp(a, b, 0) == a` and `lerp(a, b, 1) == b`
#[inline]
#[must_use]
pub fn lerp<const D: usize>(
    a: &SVector<Float, D>,
    b: &SVector<Float, D>,
    t: Float,
) -> SVector<Float, D> {
    a * (1. - t) + b * t
}

/// Determinant of the matrix `[a, b]` (the 2D cross product)
#[inline]
#[must_use]
pub fn det(a: &Vector2, b: &Vector2) -> Float {
    a.x * b.y - a.y * b.x
}

/// Rotate `v` by the angle whose cosine and sine are `cos` and `sin`.
///
/// Passing `-sin` rotates by the opposite angle.
#[inline]
#[must_use]
pub fn rotate(v: &Vector2, cos: Float, sin: Float) -> Vector2 {
    Vector2::new(v.x * cos - v.y * sin, v.y * cos + v.x * sin)
}

/// Orthogonal projection of `p` onto the infinite line through `segment`.
///
/// The result is not clamped to the segment.
#[inline]
#[must_use]
pub fn project(p: &Vector2, segment: &[Vector2; 2]) -> Vector2 {
    let [start, end] = segment;
    let dir = end - start;
    let coef = (p - start).dot(&dir) / dir.norm_squared();

    start + dir * coef
}

/// Reflect `incident` off a surface with the given `normal`.
///
/// `normal` must be non-zero, but needs not be of unit length.
#[inline]
#[must_use]
pub fn reflect(incident: &Vector2, normal: &Vector2) -> Vector2 {
    let percent = incident.dot(normal) / normal.norm_squared();
    incident - normal * (2. * percent)
}

/// Tessellate the cardinal spline passing through `points`.
///
/// `tension` is usually `0.5` (Catmull-Rom), each segment between two
/// consecutive points is sampled `segments` times, starting at its first point.
/// The last point of `points` isn't part of the output.
#[must_use]
pub fn cardinal_spline(points: &[Vector2], tension: Float, segments: usize) -> Vec<Vector2> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Vec::new();
    };

    // every point needs a predecessor and a successor
    let padded = Vec::from_iter(
        [*first]
            .into_iter()
            .chain(points.iter().copied())
            .chain([*last]),
    );

    let mut res = Vec::with_capacity(segments * (points.len() - 1));

    for window in padded.windows(4) {
        let [prev, p0, p1, next] = window else {
            unreachable!()
        };

        let t0 = (p1 - prev) * tension;
        let t1 = (next - p0) * tension;

        res.extend((0..segments).map(|i| {
            let s = i as Float / segments as Float;
            let s2 = s * s;
            let s3 = s2 * s;

            let c0 = 2. * s3 - 3. * s2 + 1.;
            let c1 = -2. * s3 + 3. * s2;
            let c2 = s3 - 2. * s2 + s;
            let c3 = s3 - s2;

            p0 * c0 + p1 * c1 + t0 * c2 + t1 * c3
        }));
    }

    res
}
