use super::*;

/// Parts of a circle, each spanning the angles between a start and an end angle.
///
/// A "dotted" arc has several, disjoint, spans.
#[derive(Clone, Debug, PartialEq)]
pub struct CircularArc {
    center: Vector2,
    radius: Float,
    radius_sq: Float,
    spans: Vec<[Float; 2]>,
    /// Unit vectors pointing at the start and end angles of every span
    bounds: Vec<[Vector2; 2]>,
}

impl CircularArc {
    /// Creates an arc from a flat list of angles (in radians):
    /// `[start_1, end_1, start_2, end_2, ...]`
    ///
    /// Every span must be less than half a turn wide (counter-clockwise, from
    /// start to end), wider ones yield wrong intersections.
    pub fn try_new(center: impl Into<Vector2>, radius: Float, spans: &[Float]) -> Result<Self> {
        if !(radius > 0.) || !radius.is_finite() {
            return Err(ConfigurationError::NonPositiveRadius(radius));
        }

        let spans = span_pairs(spans)?;
        let bounds = spans
            .iter()
            .map(|span| span.map(|angle| Vector2::new(angle.cos(), angle.sin())))
            .collect();

        Ok(Self {
            center: center.into(),
            radius,
            radius_sq: radius * radius,
            spans,
            bounds,
        })
    }

    #[inline]
    #[must_use]
    pub fn center(&self) -> &Vector2 {
        &self.center
    }

    #[inline]
    #[must_use]
    pub fn radius(&self) -> Float {
        self.radius
    }

    /// `[start, end]` angle pairs
    #[inline]
    #[must_use]
    pub fn spans(&self) -> &[[Float; 2]] {
        &self.spans
    }

    /// Whether the direction `v` (from the center) points into one of the spans.
    ///
    /// This checks that `v` is counter-clockwise from the start and clockwise from the
    /// end of the span, which is only right for spans narrower than half a turn.
    #[inline]
    #[must_use]
    pub fn in_spans(&self, v: &Vector2) -> bool {
        self.bounds
            .iter()
            .any(|[start, end]| vector::det(start, v) >= 0. && vector::det(end, v) <= 0.)
    }

    /// Parameters `t` such that `ray.at(t)` lies on the full circle, smallest first.
    #[inline]
    #[must_use]
    pub fn intersections(&self, ray: &Ray) -> ArrayVec<Float, 2> {
        // substituting `V` for `P + t * D` in the circle equation:
        // `||V - C||^2 = r^2` results in a quadratic equation in `t`.

        let v = ray.origin - self.center;

        let a = ray.direction.norm_squared();
        let b = v.dot(&ray.direction);
        let c = v.norm_squared() - self.radius_sq;

        half_b_roots(a, b, c)
    }
}

impl Shape for CircularArc {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        self.intersections(ray)
            .into_iter()
            .filter(|&t| t > MIN_HIT_DISTANCE)
            .map(|t| {
                let point = ray.at(t);
                Hit {
                    point,
                    normal: point - self.center,
                }
            })
            .find(|hit| self.in_spans(&hit.normal))
    }
}
