// Pairwise collision queries between actors

use glam::Vec2;

use super::Actor;
use crate::engine::geometry::{minimum_translation, overlap_convex, Polygon, Transform2D};

impl Actor {
    /// True when the two collision polygons overlap; touching does not count
    pub fn overlaps(&self, other: &Actor) -> bool {
        polygons_overlap(&self.bounding_polygon(), &other.bounding_polygon())
    }

    /// True when `other` comes within `distance` pixels of this actor
    ///
    /// This actor's polygon is scaled about its center so its bounding box
    /// grows by `distance` on every side, wherever the origin sits; `other`
    /// is left as is, so the test is not symmetric.
    pub fn is_within_distance(&self, distance: f32, other: &Actor) -> bool {
        let grown = self.grown_polygon(distance);
        polygons_overlap(&grown, &other.bounding_polygon())
    }

    fn grown_polygon(&self, distance: f32) -> Polygon {
        let scale = self.transform.scale;
        let grow = |extent: f32, scale: f32| {
            if extent == 0.0 {
                scale
            } else {
                (extent * scale + 2.0 * distance) / extent
            }
        };

        // Pivot on the middle of the actor, keeping that point where it was
        let middle = self.size / 2.0;
        let transform = Transform2D {
            position: self.transform.apply(middle) - middle,
            origin: middle,
            scale: Vec2::new(grow(self.size.x, scale.x), grow(self.size.y, scale.y)),
            ..self.transform
        };
        match &self.shape {
            Some(shape) => shape.transformed(&transform),
            None => Polygon::rectangle(self.size.x, self.size.y).transformed(&transform),
        }
    }

    /// Push this actor out of `other` along the minimum translation vector
    ///
    /// Returns the unit direction this actor was moved in, or `None` if the
    /// two did not overlap. Only the visual transform moves; a rigid-body
    /// actor is overwritten by its body on the next sync.
    pub fn prevent_overlap(&mut self, other: &Actor) -> Option<Vec2> {
        let own = self.bounding_polygon();
        let theirs = other.bounding_polygon();
        if !own.bounding_rect().overlaps(&theirs.bounding_rect()) {
            return None;
        }

        let mtv = minimum_translation(&own, &theirs)?;
        self.move_by(mtv.offset());
        Some(mtv.normal)
    }
}

/// Bounding-box reject, then the exact test
fn polygons_overlap(a: &Polygon, b: &Polygon) -> bool {
    a.bounding_rect().overlaps(&b.bounding_rect()) && overlap_convex(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn square(x: f32, y: f32, side: f32) -> Actor {
        let mut actor = Actor::new(x, y);
        actor.set_size(side, side);
        actor.set_origin_center();
        actor.set_boundary_rectangle();
        actor
    }

    #[test]
    fn test_two_by_two_overlap_scenario() {
        let first = square(0.0, 0.0, 2.0);
        let mut second = square(10.0, 10.0, 2.0);
        assert!(!first.overlaps(&second));

        second.set_position(1.0, 1.0);
        assert!(first.overlaps(&second));
        assert!(second.overlaps(&first));

        let normal = second.prevent_overlap(&first).expect("squares overlap");
        assert_abs_diff_eq!(normal.length(), 1.0, epsilon = 1e-5);
        assert!(!first.overlaps(&second));
        assert!(second.prevent_overlap(&first).is_none());
    }

    #[test]
    fn test_overlap_is_symmetric_for_rotated_shapes() {
        let mut a = square(0.0, 0.0, 10.0);
        a.set_rotation(45.0);
        let mut b = square(9.0, 0.0, 10.0);
        b.set_boundary_polygon(8);

        for offset in [0.0, 2.0, 4.0, 6.0] {
            b.set_position(9.0 + offset, 0.0);
            assert_eq!(a.overlaps(&b), b.overlaps(&a), "offset {offset}");
        }
    }

    #[test]
    fn test_rotated_diamond_misses_corner() {
        // Bounding boxes overlap, but the diamond's tip stops short of the square
        let mut diamond = square(0.0, 0.0, 10.0);
        diamond.set_rotation(45.0);
        let corner = square(11.0, 11.0, 10.0);

        assert!(diamond
            .bounding_polygon()
            .bounding_rect()
            .overlaps(&corner.bounding_polygon().bounding_rect()));
        assert!(!diamond.overlaps(&corner));
    }

    #[test]
    fn test_is_within_distance() {
        let ship = square(0.0, 0.0, 10.0);
        let rock = square(15.0, 0.0, 10.0);

        assert!(!ship.overlaps(&rock));
        assert!(!ship.is_within_distance(4.0, &rock));
        assert!(ship.is_within_distance(6.0, &rock));
    }

    #[test]
    fn test_is_within_distance_grows_on_both_sides() {
        // Default origin: the bottom-left corner
        let mut ship = Actor::new(0.0, 0.0);
        ship.set_size(10.0, 10.0);
        ship.set_boundary_rectangle();
        let right = square(15.0, 0.0, 10.0);
        let left = square(-15.0, 0.0, 10.0);

        assert!(ship.is_within_distance(6.0, &right));
        assert!(ship.is_within_distance(6.0, &left));
        assert!(!ship.is_within_distance(4.0, &right));
        assert!(!ship.is_within_distance(4.0, &left));
    }

    #[test]
    fn test_is_within_distance_is_asymmetric() {
        // Scaling a diamond pushes its tip out further than the distance itself
        let mut diamond = square(0.0, 0.0, 10.0);
        diamond.set_rotation(45.0);
        let block = square(14.0, 0.0, 10.0);

        assert!(diamond.is_within_distance(1.5, &block));
        assert!(!block.is_within_distance(1.5, &diamond));
    }

    #[test]
    fn test_prevent_overlap_pushes_away_from_other() {
        let wall = square(0.0, 0.0, 10.0);
        let mut ball = square(8.0, 0.0, 10.0);

        let normal = ball.prevent_overlap(&wall).expect("overlapping");
        assert_abs_diff_eq!(normal.x, 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(ball.x(), 10.0, epsilon = 1e-4);
    }
}
