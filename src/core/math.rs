// Math utilities and helper functions

use glam::Vec2;

/// Clamp a value between min and max
///
/// Unlike `f32::clamp` this never panics when `min > max`; the lower bound wins.
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Unit vector pointing at `degrees`, counter-clockwise from +X
pub fn unit_at_angle(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.cos(), radians.sin())
}

/// Vector of the given length pointing at `degrees`
pub fn vector_at_angle(length: f32, degrees: f32) -> Vec2 {
    unit_at_angle(degrees) * length
}

/// Angle of a vector in degrees, normalized to `[0, 360)`
pub fn angle_of(v: Vec2) -> f32 {
    let degrees = v.y.atan2(v.x).to_degrees();
    if degrees < 0.0 {
        degrees + 360.0
    } else {
        degrees
    }
}

/// Rescale `v` to `length`, keeping its direction; a zero vector stays zero
pub fn with_length(v: Vec2, length: f32) -> Vec2 {
    let current = v.length();
    if current == 0.0 {
        Vec2::ZERO
    } else {
        v * (length / current)
    }
}
