//! Planar geometry used by the collision engine
//!
//! Polygons are ordered vertex rings: the last vertex connects back to the
//! first. Nothing here allocates.

use glam::Vec2;

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Distance from point `p` to the segment `a`-`b`
///
/// The projection parameter is clamped to [0, 1]. A zero-length segment is
/// treated as the single point `a`.
pub fn dist_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();

    let t = if len_sq > 0.0 {
        ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };

    distance(p, a + ab * t)
}

/// Ray-casting parity test: is `p` inside the polygon?
///
/// Points exactly on an edge land on a deterministic side that depends on
/// edge orientation; callers that care about touching contacts follow up
/// with [`dist_to_segment`].
pub fn point_in_polygon(p: Vec2, vertices: &[Vec2]) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let vi = vertices[i];
        let vj = vertices[j];
        if (vi.y > p.y) != (vj.y > p.y) {
            let x_cross = (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Iterate the edges of a closed polygon as (start, end) pairs
pub fn edges(poly: &[Vec2]) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    poly.iter()
        .copied()
        .zip(poly.iter().copied().cycle().skip(1))
}

/// Project every vertex onto `axis`, returning the (min, max) interval
fn project(poly: &[Vec2], axis: Vec2) -> (f32, f32) {
    poly.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
        let d = axis.dot(*v);
        (lo.min(d), hi.max(d))
    })
}

/// Separating Axis Theorem overlap test
///
/// Every edge normal of both polygons is tried as a separating axis. The test
/// is exact for convex polygons only. The jittered asteroid silhouette is
/// usually slightly concave, so for those shapes this is an approximation that
/// can report overlap when the hulls touch but the outlines do not.
///
/// Touching intervals (shared boundary) count as overlapping.
pub fn polygons_overlap(a: &[Vec2], b: &[Vec2]) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }

    for poly in [a, b] {
        for (p1, p2) in edges(poly) {
            let normal = Vec2::new(p2.y - p1.y, p1.x - p2.x);
            let (min_a, max_a) = project(a, normal);
            let (min_b, max_b) = project(b, normal);
            if max_a < min_b || max_b < min_a {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn regular_polygon(center: Vec2, radius: f32, sides: usize) -> Vec<Vec2> {
        (0..sides)
            .map(|i| {
                let a = i as f32 * 2.0 * PI / sides as f32;
                center + Vec2::new(a.cos(), a.sin()) * radius
            })
            .collect()
    }

    fn square(min: Vec2, side: f32) -> Vec<Vec2> {
        vec![
            min,
            min + Vec2::new(side, 0.0),
            min + Vec2::new(side, side),
            min + Vec2::new(0.0, side),
        ]
    }

    #[test]
    fn test_distance() {
        assert!((distance(Vec2::ZERO, Vec2::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_dist_to_segment_interior_projection() {
        let d = dist_to_segment(Vec2::new(5.0, 3.0), Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert!((d - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_dist_to_segment_clamps_to_endpoints() {
        let a = Vec2::ZERO;
        let b = Vec2::new(10.0, 0.0);
        // Beyond b
        let d = dist_to_segment(Vec2::new(13.0, 4.0), a, b);
        assert!((d - 5.0).abs() < 1e-6);
        // Before a
        let d = dist_to_segment(Vec2::new(-3.0, -4.0), a, b);
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_dist_to_segment_degenerate() {
        let a = Vec2::new(1.0, 1.0);
        let d = dist_to_segment(Vec2::new(4.0, 5.0), a, a);
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_point_in_hexagon() {
        let hex = regular_polygon(Vec2::ZERO, 10.0, 6);
        assert!(point_in_polygon(Vec2::ZERO, &hex));
        assert!(!point_in_polygon(Vec2::new(100.0, 100.0), &hex));
    }

    #[test]
    fn test_point_on_edge_is_deterministic() {
        let hex = regular_polygon(Vec2::ZERO, 10.0, 6);
        let mid = (hex[1] + hex[2]) * 0.5;
        let first = point_in_polygon(mid, &hex);
        for _ in 0..10 {
            assert_eq!(point_in_polygon(mid, &hex), first);
        }
    }

    #[test]
    fn test_point_in_concave_polygon() {
        // "C" shape opening to the right
        let c = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 3.0),
            Vec2::new(3.0, 3.0),
            Vec2::new(3.0, 7.0),
            Vec2::new(10.0, 7.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        assert!(point_in_polygon(Vec2::new(1.5, 5.0), &c));
        assert!(!point_in_polygon(Vec2::new(6.0, 5.0), &c));
    }

    #[test]
    fn test_degenerate_polygon_contains_nothing() {
        assert!(!point_in_polygon(Vec2::ZERO, &[Vec2::ZERO, Vec2::X]));
    }

    #[test]
    fn test_polygons_overlap() {
        let a = square(Vec2::ZERO, 10.0);
        let b = square(Vec2::new(5.0, 5.0), 10.0);
        let c = square(Vec2::new(20.0, 0.0), 10.0);
        assert!(polygons_overlap(&a, &b));
        assert!(!polygons_overlap(&a, &c));
    }

    #[test]
    fn test_polygons_touching_edges_overlap() {
        let a = square(Vec2::ZERO, 10.0);
        let b = square(Vec2::new(10.0, 0.0), 10.0);
        assert!(polygons_overlap(&a, &b));
    }

    #[test]
    fn test_polygon_contained_in_other() {
        let big = regular_polygon(Vec2::ZERO, 50.0, 16);
        let small = regular_polygon(Vec2::new(5.0, -5.0), 5.0, 3);
        assert!(polygons_overlap(&big, &small));
        assert!(polygons_overlap(&small, &big));
    }

    #[test]
    fn test_diagonal_separation() {
        // Triangles separated only along a diagonal axis
        let a = vec![Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)];
        let b = vec![Vec2::new(10.0, 10.0), Vec2::new(6.0, 10.0), Vec2::new(10.0, 6.0)];
        assert!(!polygons_overlap(&a, &b));
        assert!(!polygons_overlap(&b, &a));
    }
}
