// Axis-aligned rectangles used for broad collision rejection

use glam::Vec2;

/// Axis-aligned rectangle anchored at its bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest rectangle containing every point
    ///
    /// Returns a zero-sized rectangle at the origin for an empty slice.
    pub fn enclosing(points: &[Vec2]) -> Self {
        let Some(first) = points.first() else {
            return Self::new(0.0, 0.0, 0.0, 0.0);
        };

        let (min, max) = points
            .iter()
            .skip(1)
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));

        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict overlap: rectangles that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}
