use super::*;

/// Below this (in absolute value), the local `x` coordinate of a (unit) ray
/// direction is considered zero, i. e. the ray is parallel to the axis.
const AXIAL_EPS: Float = 1e-8;

/// Parts of a parabola, each spanning an interval of local `x` coordinates.
///
/// In its local frame, the parabola is `x² = 4 f y`: its vertex is at the origin
/// and its focus at `(0, f)`. The local frame is rotated by `angle`
/// (counter-clockwise) around `origin`.
#[derive(Clone, Debug, PartialEq)]
pub struct Parabola {
    origin: Vector2,
    focal_distance: Float,
    angle: Float,
    cos: Float,
    sin: Float,
    spans: Vec<[Float; 2]>,
}

impl Parabola {
    /// Creates a parabola from a flat list of local `x` bounds:
    /// `[lo_1, hi_1, lo_2, hi_2, ...]`
    pub fn try_new(
        origin: impl Into<Vector2>,
        focal_distance: Float,
        angle: Float,
        spans: &[Float],
    ) -> Result<Self> {
        if focal_distance == 0. || !focal_distance.is_finite() {
            return Err(ConfigurationError::ZeroFocalDistance(focal_distance));
        }

        let spans = span_pairs(spans)?;
        if let Some(&[lo, hi]) = spans.iter().find(|[lo, hi]| !(lo <= hi)) {
            return Err(ConfigurationError::UnorderedSpan { lo, hi });
        }

        let (sin, cos) = angle.sin_cos();

        Ok(Self {
            origin: origin.into(),
            focal_distance,
            angle,
            cos,
            sin,
            spans,
        })
    }

    /// The vertex of the parabola
    #[inline]
    #[must_use]
    pub fn origin(&self) -> &Vector2 {
        &self.origin
    }

    #[inline]
    #[must_use]
    pub fn focal_distance(&self) -> Float {
        self.focal_distance
    }

    #[inline]
    #[must_use]
    pub fn angle(&self) -> Float {
        self.angle
    }

    /// `[lo, hi]` local `x` intervals
    #[inline]
    #[must_use]
    pub fn spans(&self) -> &[[Float; 2]] {
        &self.spans
    }

    #[inline]
    #[must_use]
    pub fn focus(&self) -> Vector2 {
        self.to_world(&Vector2::new(0., self.focal_distance))
    }

    /// Height of the curve above its vertex, in the local frame
    #[inline]
    #[must_use]
    pub fn local_height(&self, x: Float) -> Float {
        x * x / (4. * self.focal_distance)
    }

    #[inline]
    #[must_use]
    pub fn in_spans(&self, local_x: Float) -> bool {
        self.spans
            .iter()
            .any(|&[lo, hi]| lo <= local_x && local_x <= hi)
    }

    #[inline]
    fn to_local(&self, p: &Vector2) -> Vector2 {
        vector::rotate(&(p - self.origin), self.cos, -self.sin)
    }

    #[inline]
    fn to_world(&self, p: &Vector2) -> Vector2 {
        vector::rotate(p, self.cos, self.sin) + self.origin
    }

    /// `ray`, in the local frame, with a unit direction
    #[inline]
    #[must_use]
    pub fn local_ray(&self, ray: &Ray) -> Ray {
        Ray {
            origin: self.to_local(&ray.origin),
            direction: vector::normalize(&vector::rotate(&ray.direction, self.cos, -self.sin)),
        }
    }

    /// Parameters `t` such that `local.at(t)` lies on the full parabola,
    /// smallest first, where `local` is a ray returned by [`Self::local_ray`].
    #[must_use]
    pub fn local_intersections(&self, local: &Ray) -> ArrayVec<Float, 2> {
        let f = self.focal_distance;
        let Ray {
            origin: o,
            direction: d,
        } = local;

        if d.x.abs() < AXIAL_EPS {
            // parallel to the axis, the equation is linear
            let mut roots = ArrayVec::new();
            roots.push((self.local_height(o.x) - o.y) / d.y);
            roots
        } else {
            let a = d.x * d.x;
            let b = d.x * o.x - 2. * f * d.y;
            let c = o.x * o.x - 4. * f * o.y;

            half_b_roots(a, b, c)
        }
    }
}

impl Shape for Parabola {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let local = self.local_ray(ray);

        self.local_intersections(&local)
            .into_iter()
            .filter(|&t| t > MIN_HIT_DISTANCE)
            .map(|t| local.at(t))
            .find(|p| self.in_spans(p.x))
            .map(|p| {
                let normal = Vector2::new(-p.x / (2. * self.focal_distance), 1.);
                Hit {
                    point: self.to_world(&p),
                    normal: vector::rotate(&normal, self.cos, self.sin),
                }
            })
    }
}
