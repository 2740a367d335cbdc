use facette::{Composite, Float, Ray, Vector2};
use facette_shapes::{CircularArc, Facet, Parabola};

use core::{f64::consts::PI, iter};
pub use rand;

pub trait Random: Sized {
    /// Generate a randomized version of this value using the provided `rng`
    ///
    /// This method must not fail. If creating a value is faillible, keep trying until success
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self;
}

/// Coordinates of random points lie in `[-MAX_COORD, MAX_COORD)`
pub const MAX_COORD: Float = 7.;

impl Random for Ray {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        let origin = rand_vect(rng, MAX_COORD);

        loop {
            if let Some(ray) = Ray::try_new_normalize(origin, rand_vect(rng, 1.0)) {
                break ray;
            }
        }
    }
}

/// `n` sorted values in `[lo, hi)`
fn sorted_bounds(rng: &mut (impl rand::Rng + ?Sized), n: usize, lo: Float, hi: Float) -> Vec<Float> {
    let mut bounds = Vec::from_iter(iter::repeat_with(|| rng.gen_range(lo..hi)).take(n));
    bounds.sort_by(Float::total_cmp);
    bounds
}

impl Random for CircularArc {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        const MAX_SPANS: usize = 3;

        loop {
            let center = rand_vect(rng, MAX_COORD);
            let radius = rng.gen_range(0.5..MAX_COORD);

            // spans are cut from one random half turn, so none is wider than that
            let num_spans = rng.gen_range(1..=MAX_SPANS);
            let start = rng.gen_range(0. ..2. * PI);
            let spans = sorted_bounds(rng, 2 * num_spans, start, start + PI);

            if let Ok(arc) = CircularArc::try_new(center, radius, &spans) {
                break arc;
            }
        }
    }
}

impl Random for Parabola {
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        const MAX_SPANS: usize = 2;

        loop {
            let origin = rand_vect(rng, MAX_COORD);
            let focal_distance = rng.gen_range(-3. ..3.);
            let angle = rng.gen_range(0. ..2. * PI);

            let num_spans = rng.gen_range(1..=MAX_SPANS);
            let spans = sorted_bounds(rng, 2 * num_spans, -MAX_COORD, MAX_COORD);

            if let Ok(parabola) = Parabola::try_new(origin, focal_distance, angle, &spans) {
                break parabola;
            }
        }
    }
}

impl Random for Facet {
    /// A single arc or parabola, or a group of them
    fn random(rng: &mut (impl rand::Rng + ?Sized)) -> Self {
        const MAX_CHILDREN: usize = 8;

        match rng.gen_range(0usize..3) {
            0 => CircularArc::random(rng).into(),
            1 => Parabola::random(rng).into(),
            _ => {
                let n = rng.gen_range(1..=MAX_CHILDREN);
                Composite::from_iter(iter::repeat_with(|| random_leaf(rng)).take(n)).into()
            }
        }
    }
}

fn random_leaf(rng: &mut (impl rand::Rng + ?Sized)) -> Facet {
    if rng.gen() {
        CircularArc::random(rng).into()
    } else {
        Parabola::random(rng).into()
    }
}

pub fn random_facets(n: usize, rng: &mut (impl rand::Rng + ?Sized)) -> Composite<Facet> {
    iter::repeat_with(|| Facet::random(rng)).take(n).collect()
}

/// A random geometry of `num_facets` facets, and `num_rays` rays to shoot at it
pub fn random_scene(
    num_facets: usize,
    num_rays: usize,
    rng: &mut (impl rand::Rng + ?Sized),
) -> (Facet, Vec<Ray>) {
    (
        random_facets(num_facets, rng).into(),
        iter::repeat_with(|| Ray::random(rng))
            .take(num_rays)
            .collect(),
    )
}

pub fn rand_vect(rng: &mut (impl rand::Rng + ?Sized), max_coord_mag: Float) -> Vector2 {
    // the rng generates floats in 0.0..1.0, scale and translate the range accordingly

    Vector2::from_fn(|_, _| (rng.gen::<Float>() - 0.5) * (max_coord_mag.abs() * 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn arc_spans_are_narrow_and_ordered() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let arc = CircularArc::random(&mut rng);
            assert!(arc.radius() > 0.);
            for [lo, hi] in arc.spans() {
                assert!(lo <= hi);
                assert!(hi - lo < PI);
            }
        }
    }

    #[test]
    fn rays_are_unit() {
        let mut rng = StdRng::seed_from_u64(0);

        for _ in 0..200 {
            let ray = Ray::random(&mut rng);
            assert!((ray.direction.norm() - 1.).abs() < 1e-12);
        }
    }

    #[test]
    fn scenes_have_the_requested_size() {
        let mut rng = StdRng::seed_from_u64(42);
        let (geometry, rays) = random_scene(12, 5, &mut rng);

        assert_eq!(rays.len(), 5);
        let Facet::Composite(group) = &geometry else {
            panic!("expected a composite, got {geometry:?}")
        };
        assert_eq!(group.len(), 12);
        assert!(geometry.leaf_count() >= 12);
    }

    #[test]
    fn seeded_scenes_are_reproducible() {
        let a = random_scene(6, 6, &mut StdRng::seed_from_u64(3));
        let b = random_scene(6, 6, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }
}
