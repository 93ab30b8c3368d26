// Level-wide configuration: world extents, unit scale and physics stepping

use glam::Vec2;

/// Presentation pixels per simulation meter
pub const PIXELS_PER_METER: f32 = 100.0;

/// Convert presentation pixels to simulation meters
pub fn to_meters(pixels: f32) -> f32 {
    pixels / PIXELS_PER_METER
}

/// Convert simulation meters to presentation pixels
pub fn to_pixels(meters: f32) -> f32 {
    meters * PIXELS_PER_METER
}

/// Rectangular extent of the playable level, anchored at (0, 0)
///
/// Built once when a level starts and handed by reference to anything that
/// clamps, wraps or follows actors. There are no setters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    width: f32,
    height: f32,
}

impl WorldBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Bounds matching a backdrop of the given size
    pub fn from_size(size: Vec2) -> Self {
        Self::new(size.x, size.y)
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Everything a level needs to know before spawning actors
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldConfig {
    /// World width in pixels
    pub width: f32,
    /// World height in pixels
    pub height: f32,
    /// Fixed physics timestep (seconds)
    pub timestep: f32,
    /// Solver velocity iterations per step
    pub velocity_iterations: usize,
    /// Solver position iterations per step
    pub position_iterations: usize,
    /// Gravity in m/s²
    pub gravity: Vec2,
}

/// 1080p playfield in zero gravity, stepped at 60 Hz
pub const DEFAULT_WORLD: WorldConfig = WorldConfig {
    width: 1920.0,
    height: 1080.0,
    timestep: 1.0 / 60.0,
    velocity_iterations: 6,
    position_iterations: 2,
    gravity: Vec2::ZERO,
};

impl Default for WorldConfig {
    fn default() -> Self {
        DEFAULT_WORLD
    }
}

impl WorldConfig {
    /// The immutable bounds value for this level
    pub fn bounds(&self) -> WorldBounds {
        WorldBounds::new(self.width, self.height)
    }
}
