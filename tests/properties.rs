//! Quantified properties of the geometry and kinematics

use glam::Vec2;
use proptest::prelude::*;

use polyroids::sim::{Player, dist_to_segment, distance, point_in_polygon, polygons_overlap};

fn point() -> impl Strategy<Value = Vec2> {
    (-200.0f32..200.0, -200.0f32..200.0).prop_map(|(x, y)| Vec2::new(x, y))
}

fn polygon() -> impl Strategy<Value = Vec<Vec2>> {
    prop::collection::vec(point(), 3..16)
}

proptest! {
    #[test]
    fn player_stays_on_torus(
        x in -5000.0f32..5000.0,
        y in -5000.0f32..5000.0,
        vx in -100.0f32..100.0,
        vy in -100.0f32..100.0,
        width in 100.0f32..2000.0,
        height in 100.0f32..2000.0,
    ) {
        let mut player = Player::new(Vec2::new(x, y));
        player.vel = Vec2::new(vx, vy);
        for _ in 0..3 {
            player.update(width, height);
            prop_assert!(player.pos.x >= 0.0 && player.pos.x < width);
            prop_assert!(player.pos.y >= 0.0 && player.pos.y < height);
        }
    }

    #[test]
    fn sat_is_symmetric(a in polygon(), b in polygon()) {
        prop_assert_eq!(polygons_overlap(&a, &b), polygons_overlap(&b, &a));
    }

    #[test]
    fn polygon_overlaps_itself(a in polygon()) {
        prop_assert!(polygons_overlap(&a, &a));
    }

    #[test]
    fn segment_distance_bounded_by_endpoints(p in point(), a in point(), b in point()) {
        let d = dist_to_segment(p, a, b);
        prop_assert!(d >= 0.0);
        prop_assert!(d <= distance(p, a) + 1e-3);
        prop_assert!(d <= distance(p, b) + 1e-3);
    }

    #[test]
    fn point_in_polygon_is_deterministic(p in point(), poly in polygon()) {
        prop_assert_eq!(point_in_polygon(p, &poly), point_in_polygon(p, &poly));
    }
}
