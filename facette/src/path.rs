use core::ops::Deref;

use crate::{vector, Float, Vector2};

/// The points visited by a ray: its origin, every point it bounced off,
/// and possibly a terminal point, extrapolated after it escaped.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    points: Vec<Vector2>,
    terminated: bool,
}

impl Path {
    #[inline]
    #[must_use]
    pub fn new(origin: impl Into<Vector2>) -> Self {
        Self {
            points: vec![origin.into()],
            terminated: false,
        }
    }

    /// Builds a path from raw points, the last one being a bounce point.
    ///
    /// Returns `None` if `points` is empty.
    #[inline]
    #[must_use]
    pub fn from_points(points: Vec<Vector2>) -> Option<Self> {
        (!points.is_empty()).then_some(Self {
            points,
            terminated: false,
        })
    }

    #[inline]
    pub(crate) fn push_bounce(&mut self, point: Vector2) {
        debug_assert!(!self.terminated);
        self.points.push(point);
    }

    #[inline]
    pub(crate) fn terminate(&mut self, point: Vector2) {
        debug_assert!(!self.terminated);
        self.points.push(point);
        self.terminated = true;
    }

    #[inline]
    #[must_use]
    pub fn points(&self) -> &[Vector2] {
        &self.points
    }

    #[inline]
    #[must_use]
    pub fn into_points(self) -> Vec<Vector2> {
        self.points
    }

    #[inline]
    #[must_use]
    pub fn origin(&self) -> &Vector2 {
        &self.points[0]
    }

    /// Whether the last point was extrapolated after the ray escaped,
    /// rather than being a bounce point.
    #[inline]
    #[must_use]
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// The number of reflections along this path
    #[inline]
    #[must_use]
    pub fn bounces(&self) -> usize {
        self.points.len() - 1 - usize::from(self.terminated)
    }

    /// A ray that never hit anything
    #[inline]
    #[must_use]
    pub fn is_lost(&self) -> bool {
        self.bounces() == 0
    }

    /// Total length of the polyline
    #[must_use]
    pub fn length(&self) -> Float {
        self.points
            .windows(2)
            .map(|w| vector::distance(&w[0], &w[1]))
            .sum()
    }

    /// See [`march`]
    #[inline]
    #[must_use]
    pub fn march(&self, distance: Float) -> Vector2 {
        march(distance, &self.points)
    }
}

impl Deref for Path {
    type Target = [Vector2];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.points
    }
}

/// Walks `distance` along `path`, starting from its first point.
///
/// If `path` is shorter than `distance`, its last segment is extended
/// as far as needed.
///
/// # Panics
///
/// if `path` is empty
#[must_use]
pub fn march(distance: Float, path: &[Vector2]) -> Vector2 {
    let mut remaining = distance;

    for segment in path.windows(2) {
        let [start, end] = segment else {
            unreachable!()
        };

        let len = vector::distance(start, end);
        if len >= remaining {
            let t = if len > 0. { remaining / len } else { 0. };
            return vector::lerp(start, end, t);
        }
        remaining -= len;
    }

    // We didn't reach the distance, extrapolate beyond the last point
    match path {
        [.., before_last, last] => {
            let dir = last - before_last;
            let len = dir.norm();
            if len > 0. {
                last + dir * (remaining / len)
            } else {
                *last
            }
        }
        [only] => *only,
        [] => panic!("cannot march along an empty path"),
    }
}
