use core::f64::consts::{FRAC_PI_2, PI};

use facette::{vector, Composite, Ray, RayTracer, Shape, Vector2, DEFAULT_MAX_BOUNCES};
use facette_shapes::{CircularArc, Facet, Parabola};
use proptest::prelude::*;

const RADIUS: f64 = 10.;

/// A whole circle, as four quarter spans
fn closed_circle() -> CircularArc {
    let spans = [0., FRAC_PI_2, FRAC_PI_2, PI, PI, 1.5 * PI, 1.5 * PI, 2. * PI];
    CircularArc::try_new([0., 0.], RADIUS, &spans).unwrap()
}

/// Two facing parabolic bowls sharing their focus, a classic retro-reflector
fn facing_bowls() -> Facet {
    let lower = Parabola::try_new([0., -5.], 5., 0., &[-20., 20.]).unwrap();
    let upper = Parabola::try_new([0., 5.], 5., PI, &[-20., 20.]).unwrap();

    Composite::<Facet>::default()
        .with_child(lower)
        .with_child(upper)
        .into()
}

fn inner_ray() -> impl Strategy<Value = Ray> {
    (0. ..RADIUS / 2., 0. ..2. * PI, 0. ..2. * PI, 0.1..10.).prop_map(|(r, a, b, len)| {
        Ray::new(
            [r * a.cos(), r * a.sin()],
            [len * b.cos(), len * b.sin()],
        )
    })
}

proptest! {
    #[test]
    fn trapped_rays_are_truncated(ray in inner_ray(), max_bounces in 0usize..200) {
        let circle = closed_circle();
        let path = RayTracer::default().scale(RADIUS).trace(&circle, ray);
        prop_assert_eq!(path.len(), DEFAULT_MAX_BOUNCES + 1);

        let path = RayTracer::default().max_bounces(max_bounces).trace(&circle, ray);
        prop_assert_eq!(path.len(), max_bounces + 1);
        prop_assert!(!path.is_terminated());

        for p in &path[1..] {
            prop_assert!((p.norm() - RADIUS).abs() < 1e-6);
        }
    }

    #[test]
    fn paths_are_bounded_between_bowls(
        x in -3. ..3f64,
        y in -2. ..2f64,
        angle in 0. ..2. * PI,
        max_bounces in 0usize..64,
    ) {
        let geometry = facing_bowls();
        let ray = Ray::new([x, y], [angle.cos(), angle.sin()]);
        let path = RayTracer::new(max_bounces, 20.).trace(&geometry, ray);

        prop_assert!(path.len() <= max_bounces + 2);
        prop_assert!(path.bounces() <= max_bounces);
    }
}

#[test]
fn composite_matches_exhaustive_search() {
    let children = [
        Facet::from(CircularArc::try_new([0., 0.], 3., &[PI, 2. * PI]).unwrap()),
        Facet::from(CircularArc::try_new([0., 0.], 6., &[PI, 2. * PI]).unwrap()),
        Facet::from(Parabola::try_new([0., -1.], 2., 0., &[-1., 1.]).unwrap()),
    ];
    let composite = Composite::new(children.clone());

    for x in [-2.5, -0.5, 0., 0.75, 2.] {
        let ray = Ray::new([x, -10.], [0., 1.]);

        let mut expected = None;
        let mut best = f64::INFINITY;
        for hit in children.iter().filter_map(|child| child.intersect(&ray)) {
            let d = vector::sq_distance(&ray.origin, &hit.point);
            if d < best {
                best = d;
                expected = Some(hit);
            }
        }

        assert!(expected.is_some());
        assert_eq!(composite.intersect(&ray), expected);
    }
}

#[test]
fn escaping_rays_get_an_end_point() {
    let circle = closed_circle();
    let outside = Ray::new([-20., 20.], [1., 0.]);
    let path = RayTracer::default().scale(RADIUS).trace(&circle, outside);

    assert!(path.is_lost());
    assert_eq!(path.len(), 2);
    assert_eq!(path[1], Vector2::new(10., 20.));
}
