//! Mirror facets: circular arcs, parabolic arcs, and trees of them.

mod arc;
mod facet;
mod parabola;

pub use arc::*;
pub use facet::*;
pub use parabola::*;

use arrayvec::ArrayVec;
use facette::*;

/// Real roots of `a t² + 2 b t + c = 0`, in increasing order.
///
/// `a` must be positive. A double root is returned twice.
#[inline]
#[must_use]
pub(crate) fn half_b_roots(a: Float, b: Float, c: Float) -> ArrayVec<Float, 2> {
    let discr = b.mul_add(b, -a * c);

    let mut roots = ArrayVec::new();
    if discr >= 0. {
        let root = discr.sqrt();
        // a > 0, so these are ordered
        roots.push((-b - root) / a);
        roots.push((-b + root) / a);
    }
    roots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roots_are_sorted() {
        // (t - 1)(t - 3) = t² - 4t + 3
        assert_eq!(half_b_roots(1., -2., 3.).as_slice(), &[1., 3.]);
        // 2(t + 3)(t - 1) = 2t² + 4t - 6
        assert_eq!(half_b_roots(2., 2., -6.).as_slice(), &[-3., 1.]);
    }

    #[test]
    fn no_roots_with_negative_discriminant() {
        assert!(half_b_roots(1., 0., 1.).is_empty());
    }
}
