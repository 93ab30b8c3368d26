// Separating-axis overlap test and minimum translation vector for convex polygons

use glam::Vec2;

use super::Polygon;

/// Edges shorter than this contribute no axis
const MIN_EDGE_LENGTH_SQ: f32 = 1e-12;

/// Smallest displacement that pushes one polygon out of another
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimumTranslation {
    /// Unit direction to move the first polygon
    pub normal: Vec2,
    /// Penetration depth along `normal`
    pub depth: f32,
}

impl MinimumTranslation {
    /// The full displacement vector (`normal * depth`)
    pub fn offset(&self) -> Vec2 {
        self.normal * self.depth
    }
}

/// Exact overlap test for two convex polygons
///
/// Polygons that only touch along an edge or at a vertex do not overlap.
pub fn overlap_convex(a: &Polygon, b: &Polygon) -> bool {
    separating_axes(a, b).all(|axis| interval_overlap(a, b, axis).is_some())
}

/// Compute the minimum translation that separates `a` from `b`
///
/// Returns `None` when the polygons do not overlap. The normal points away
/// from `b`, so moving `a` by [`MinimumTranslation::offset`] resolves the
/// overlap.
pub fn minimum_translation(a: &Polygon, b: &Polygon) -> Option<MinimumTranslation> {
    let mut best: Option<MinimumTranslation> = None;

    for axis in separating_axes(a, b) {
        let depth = interval_overlap(a, b, axis)?;
        if best.map_or(true, |m| depth < m.depth) {
            best = Some(MinimumTranslation {
                normal: axis,
                depth,
            });
        }
    }

    let mut mtv = best?;
    if (a.center() - b.center()).dot(mtv.normal) < 0.0 {
        mtv.normal = -mtv.normal;
    }
    Some(mtv)
}

/// Unit edge normals of both polygons
fn separating_axes<'a>(a: &'a Polygon, b: &'a Polygon) -> impl Iterator<Item = Vec2> + 'a {
    a.edges().chain(b.edges()).filter_map(|(start, end)| {
        let edge = end - start;
        if edge.length_squared() < MIN_EDGE_LENGTH_SQ {
            None
        } else {
            Some(edge.perp().normalize())
        }
    })
}

/// Overlap depth of the projections on `axis`, `None` if they are disjoint
///
/// When one interval contains the other, the distance to the nearer end is
/// added so that pushing out along this axis actually clears the shape.
fn interval_overlap(a: &Polygon, b: &Polygon, axis: Vec2) -> Option<f32> {
    let (min_a, max_a) = a.project(axis);
    let (min_b, max_b) = b.project(axis);

    if max_a <= min_b || max_b <= min_a {
        return None;
    }

    let mut overlap = max_a.min(max_b) - min_a.max(min_b);

    let a_contains_b = min_a <= min_b && max_a >= max_b;
    let b_contains_a = min_b <= min_a && max_b >= max_a;
    if a_contains_b || b_contains_a {
        let to_min = (min_a - min_b).abs();
        let to_max = (max_a - max_b).abs();
        overlap += to_min.min(to_max);
    }

    Some(overlap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::geometry::Transform2D;
    use approx::assert_abs_diff_eq;
    use parry2d::math::{Isometry, Point};
    use parry2d::query;
    use parry2d::shape::ConvexPolygon;

    fn square_at(x: f32, y: f32, size: f32) -> Polygon {
        let mut p = Polygon::rectangle(size, size);
        p.translate(Vec2::new(x, y));
        p
    }

    fn to_parry(polygon: &Polygon) -> ConvexPolygon {
        let points = polygon
            .vertices()
            .iter()
            .map(|v| Point::new(v.x, v.y))
            .collect();
        ConvexPolygon::from_convex_polyline(points).expect("valid convex polygon")
    }

    fn parry_intersects(a: &Polygon, b: &Polygon) -> bool {
        let identity = Isometry::identity();
        query::intersection_test(&identity, &to_parry(a), &identity, &to_parry(b))
            .expect("convex polygons are supported")
    }

    #[test]
    fn test_disjoint_squares() {
        let a = square_at(0.0, 0.0, 2.0);
        let b = square_at(10.0, 10.0, 2.0);
        assert!(!overlap_convex(&a, &b));
        assert!(minimum_translation(&a, &b).is_none());
    }

    #[test]
    fn test_touching_squares_do_not_overlap() {
        let a = square_at(0.0, 0.0, 2.0);
        let b = square_at(2.0, 0.0, 2.0);
        assert!(!overlap_convex(&a, &b));
    }

    #[test]
    fn test_mtv_pushes_first_polygon_out() {
        let a = square_at(1.5, 0.0, 2.0);
        let b = square_at(0.0, 0.0, 2.0);

        let mtv = minimum_translation(&a, &b).expect("squares overlap");
        assert_abs_diff_eq!(mtv.depth, 0.5, epsilon = 1e-5);
        assert_abs_diff_eq!(mtv.normal.x, 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(mtv.normal.y, 0.0, epsilon = 1e-5);

        let mut moved = a.clone();
        moved.translate(mtv.offset());
        assert!(!overlap_convex(&moved, &b));
    }

    #[test]
    fn test_mtv_for_contained_polygon_clears_container() {
        let outer = square_at(0.0, 0.0, 10.0);
        let inner = square_at(1.0, 4.0, 2.0);

        let mtv = minimum_translation(&inner, &outer).expect("contained polygon overlaps");
        let mut moved = inner.clone();
        moved.translate(mtv.offset());
        assert!(!overlap_convex(&moved, &outer));
        // Nearest exit is through the left wall: 1 + 2 units
        assert_abs_diff_eq!(mtv.depth, 3.0, epsilon = 1e-4);
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let diamond = Polygon::inscribed(4.0, 4.0, 4).transformed(&Transform2D {
            position: Vec2::new(2.5, 0.5),
            ..Transform2D::default()
        });
        let square = square_at(0.0, 0.0, 2.0);
        assert_eq!(
            overlap_convex(&diamond, &square),
            overlap_convex(&square, &diamond)
        );
    }

    #[test]
    fn test_rotated_rectangles_agree_with_parry() {
        let cases = [
            (0.0, Vec2::new(0.5, 0.5), 45.0),
            (30.0, Vec2::new(3.5, 0.0), 0.0),
            (45.0, Vec2::new(2.9, 2.9), 45.0),
            (10.0, Vec2::new(8.0, -6.0), 80.0),
            (60.0, Vec2::new(-1.0, 2.0), 15.0),
        ];

        for (rot_a, offset_b, rot_b) in cases {
            let a = Polygon::rectangle(3.0, 1.0).transformed(&Transform2D {
                origin: Vec2::new(1.5, 0.5),
                rotation: rot_a,
                ..Transform2D::default()
            });
            let b = Polygon::rectangle(2.0, 2.0).transformed(&Transform2D {
                position: offset_b,
                origin: Vec2::new(1.0, 1.0),
                rotation: rot_b,
                ..Transform2D::default()
            });

            assert_eq!(
                overlap_convex(&a, &b),
                parry_intersects(&a, &b),
                "disagreement for rotation {rot_a}/{rot_b} offset {offset_b:?}"
            );
        }
    }

    #[test]
    fn test_octagon_against_parry() {
        let octagon = Polygon::inscribed(4.0, 4.0, 8);
        let near = square_at(3.5, 1.5, 1.0);
        let far = square_at(4.5, 4.5, 1.0);

        assert!(overlap_convex(&octagon, &near));
        assert!(parry_intersects(&octagon, &near));
        assert!(!overlap_convex(&octagon, &far));
        assert!(!parry_intersects(&octagon, &far));
    }
}
