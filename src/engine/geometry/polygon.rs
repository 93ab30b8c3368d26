// Convex collision polygons and the transform that places them in the world

use glam::Vec2;
use std::f32::consts::TAU;

use super::Rect;

/// Placement of a local-space shape in the world
///
/// Rotation and scale pivot around `origin`, which is expressed relative to
/// `position` (the shape's bottom-left corner before rotation).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub position: Vec2,
    pub origin: Vec2,
    /// Rotation in degrees, counter-clockwise
    pub rotation: f32,
    pub scale: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            origin: Vec2::ZERO,
            rotation: 0.0,
            scale: Vec2::ONE,
        }
    }
}

impl Transform2D {
    /// Map a local-space point into world space
    pub fn apply(&self, local: Vec2) -> Vec2 {
        let mut p = (local - self.origin) * self.scale;

        if self.rotation != 0.0 {
            let (sin, cos) = self.rotation.to_radians().sin_cos();
            p = Vec2::new(cos * p.x - sin * p.y, sin * p.x + cos * p.y);
        }

        p + self.position + self.origin
    }
}

/// Convex polygon with vertices in counter-clockwise order
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Vec2>,
}

impl Polygon {
    /// Create a polygon from its vertices
    ///
    /// # Panics
    /// Panics when given fewer than three vertices.
    pub fn new(vertices: Vec<Vec2>) -> Self {
        assert!(
            vertices.len() >= 3,
            "a polygon needs at least 3 vertices, got {}",
            vertices.len()
        );
        Self { vertices }
    }

    /// Axis-aligned rectangle with its bottom-left corner at the local origin
    pub fn rectangle(width: f32, height: f32) -> Self {
        Self::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(width, 0.0),
            Vec2::new(width, height),
            Vec2::new(0.0, height),
        ])
    }

    /// Regular n-gon inscribed in the ellipse bounded by `width` x `height`
    ///
    /// The first vertex sits at the right-most point of the ellipse, so a
    /// 4-sided shape comes out as a diamond.
    pub fn inscribed(width: f32, height: f32, sides: usize) -> Self {
        assert!(sides >= 3, "an inscribed polygon needs at least 3 sides");

        let half = Vec2::new(width / 2.0, height / 2.0);
        let vertices = (0..sides)
            .map(|i| {
                let angle = i as f32 * TAU / sides as f32;
                Vec2::new(half.x * angle.cos(), half.y * angle.sin()) + half
            })
            .collect();

        Self::new(vertices)
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    /// Return a copy of this polygon placed in the world by `transform`
    pub fn transformed(&self, transform: &Transform2D) -> Polygon {
        Polygon {
            vertices: self.vertices.iter().map(|v| transform.apply(*v)).collect(),
        }
    }

    /// Move every vertex by `offset`
    pub fn translate(&mut self, offset: Vec2) {
        for v in &mut self.vertices {
            *v += offset;
        }
    }

    pub fn bounding_rect(&self) -> Rect {
        Rect::enclosing(&self.vertices)
    }

    /// Average of the vertices
    pub fn center(&self) -> Vec2 {
        self.vertices.iter().copied().sum::<Vec2>() / self.vertices.len() as f32
    }

    /// Iterate over edges as `(start, end)` pairs, closing the loop
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Project onto a unit axis, returning the `(min, max)` interval
    pub fn project(&self, axis: Vec2) -> (f32, f32) {
        self.vertices
            .iter()
            .map(|v| v.dot(axis))
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p), hi.max(p))
            })
    }
}
