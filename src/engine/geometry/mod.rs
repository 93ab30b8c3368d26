// 2D geometry: rectangles, convex polygons, separating-axis tests

mod polygon;
mod rect;
mod sat;

pub use polygon::{Polygon, Transform2D};
pub use rect::Rect;
pub use sat::{minimum_translation, overlap_convex, MinimumTranslation};
