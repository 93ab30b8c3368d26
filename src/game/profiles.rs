// Motion tuning for every actor in the level
// Kinematic values are in pixels and seconds, rigid-body values in meters

use crate::engine::actor::KinematicMotion;

/// Acceleration, braking and speed cap for a kinematic actor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionProfile {
    /// Thrust magnitude (pixels/second²)
    pub acceleration: f32,
    /// Braking on frames without thrust (pixels/second²)
    pub deceleration: f32,
    /// Speed cap (pixels/second)
    pub max_speed: f32,
}

impl MotionProfile {
    pub fn motion(&self) -> KinematicMotion {
        KinematicMotion::with_profile(self.acceleration, self.deceleration, self.max_speed)
    }
}

/// The ship drifts forever once pushed
pub const SHIP: MotionProfile = MotionProfile {
    acceleration: 400.0,
    deceleration: 0.0,
    max_speed: 1000.0,
};

/// Lasers fly straight at a constant speed
pub const LASER: MotionProfile = MotionProfile {
    acceleration: 0.0,
    deceleration: 0.0,
    max_speed: 2000.0,
};

/// Launch speed of a fresh laser (pixels/second)
pub const LASER_SPEED: f32 = 2000.0;

/// Seconds a laser lives, the last `LASER_FADE` of them fading out
pub const LASER_LIFETIME: f32 = 0.75;
pub const LASER_FADE: f32 = 0.5;

/// Turn rate of the ship (degrees/second)
pub const SHIP_ROTATION_SPEED: f32 = 240.0;

/// One-frame sideways burst used by the strafe thrusters (pixels/second²)
pub const STRAFE_ACCELERATION: f32 = 2000.0;

/// Shield points the ship starts with, and the cost of each rock hit
pub const SHIELD_POWER: i32 = 100;
pub const SHIELD_HIT_COST: i32 = 34;

/// Rock drift and spin: base value plus a random share of the spread
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RockProfile {
    /// Drift speed (meters/second)
    pub speed: f32,
    pub speed_spread: f32,
    /// Spin (degrees/second)
    pub spin: f32,
    pub spin_spread: f32,
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
}

pub const ROCK: RockProfile = RockProfile {
    speed: 0.5,
    speed_spread: 0.3,
    spin: 30.0,
    spin_spread: 30.0,
    density: 1.0,
    friction: 0.5,
    restitution: 0.1,
};
