use facette::{closest_hit, RayTracer, Shape};
use facette_random::{random_scene, rand::rngs::StdRng, rand::SeedableRng};
use facette_shapes::Facet;
use proptest::prelude::*;

fn leaves(facet: &Facet) -> Vec<&Facet> {
    match facet {
        Facet::Composite(group) => group.children().iter().flat_map(leaves).collect(),
        leaf => vec![leaf],
    }
}

proptest! {
    #[test]
    fn random_paths_are_bounded(seed in any::<u64>(), max_bounces in 0usize..32) {
        let mut rng = StdRng::seed_from_u64(seed);
        let (geometry, rays) = random_scene(10, 8, &mut rng);
        let tracer = RayTracer::new(max_bounces, 7.);

        for ray in rays {
            let path = tracer.trace(&geometry, ray);

            prop_assert!(path.len() <= max_bounces + 2);
            prop_assert!(path.bounces() <= max_bounces);
            prop_assert_eq!(path.origin(), &ray.origin);
        }
    }

    #[test]
    fn trees_match_flat_search(seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let (geometry, rays) = random_scene(6, 16, &mut rng);
        let flat = leaves(&geometry);

        for ray in rays {
            let expected = closest_hit(
                &ray.origin,
                flat.iter().filter_map(|leaf| leaf.intersect(&ray)),
            );
            prop_assert_eq!(geometry.intersect(&ray), expected);
        }
    }
}
