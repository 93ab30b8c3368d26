// Kinematic motion: explicit velocity/acceleration integration

use glam::Vec2;

use super::{Actor, Motion};
use crate::core::math::{angle_of, clamp, unit_at_angle, vector_at_angle, with_length};

/// Default speed cap in pixels per second
pub const DEFAULT_MAX_SPEED: f32 = 1000.0;

/// Velocity state integrated by the actor itself, in pixels and seconds
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicMotion {
    velocity: Vec2,
    /// Accumulated thrust for the current frame; cleared by every step
    pending_acceleration: Vec2,
    acceleration: f32,
    deceleration: f32,
    max_speed: f32,
    max_speed_x: Option<f32>,
    max_speed_y: Option<f32>,
    /// Last direction set explicitly, used when velocity is zero
    heading: f32,
}

impl Default for KinematicMotion {
    fn default() -> Self {
        Self {
            velocity: Vec2::ZERO,
            pending_acceleration: Vec2::ZERO,
            acceleration: 0.0,
            deceleration: 0.0,
            max_speed: DEFAULT_MAX_SPEED,
            max_speed_x: None,
            max_speed_y: None,
            heading: 0.0,
        }
    }
}

impl KinematicMotion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Motion with acceleration, deceleration and speed cap set up front
    pub fn with_profile(acceleration: f32, deceleration: f32, max_speed: f32) -> Self {
        Self {
            acceleration,
            deceleration,
            max_speed,
            ..Self::default()
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
        if velocity != Vec2::ZERO {
            self.heading = angle_of(velocity);
        }
    }

    /// Speed in pixels per second
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn is_moving(&self) -> bool {
        self.speed() > 0.0
    }

    /// Set the speed, keeping the current direction
    ///
    /// With zero velocity there is no direction, so the motion heads along
    /// `fallback_angle` (degrees).
    pub fn set_speed_or(&mut self, speed: f32, fallback_angle: f32) {
        self.velocity = if self.velocity == Vec2::ZERO {
            vector_at_angle(speed, fallback_angle)
        } else {
            with_length(self.velocity, speed)
        };
    }

    /// Set the speed along the current direction, or the last set heading
    pub fn set_speed(&mut self, speed: f32) {
        self.set_speed_or(speed, self.heading);
    }

    /// Direction of motion in degrees; the last heading while at rest
    pub fn motion_angle(&self) -> f32 {
        if self.velocity == Vec2::ZERO {
            self.heading
        } else {
            angle_of(self.velocity)
        }
    }

    /// Point the velocity at `angle` degrees without changing speed
    pub fn set_motion_angle(&mut self, angle: f32) {
        self.heading = angle;
        self.velocity = vector_at_angle(self.speed(), angle);
    }

    pub fn acceleration(&self) -> f32 {
        self.acceleration
    }

    /// Thrust magnitude in pixels per second squared
    pub fn set_acceleration(&mut self, acceleration: f32) {
        self.acceleration = acceleration;
    }

    pub fn deceleration(&self) -> f32 {
        self.deceleration
    }

    /// Braking applied on frames without thrust
    pub fn set_deceleration(&mut self, deceleration: f32) {
        self.deceleration = deceleration;
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn set_max_speed(&mut self, max_speed: f32) {
        self.max_speed = max_speed.max(0.0);
    }

    /// Independent cap on horizontal speed
    pub fn set_max_speed_x(&mut self, cap: Option<f32>) {
        self.max_speed_x = cap.map(f32::abs);
    }

    /// Independent cap on vertical speed
    pub fn set_max_speed_y(&mut self, cap: Option<f32>) {
        self.max_speed_y = cap.map(f32::abs);
    }

    /// Add one frame of thrust at `angle` degrees
    ///
    /// Thrust accumulates until the next [`KinematicMotion::integrate`] and is
    /// then discarded, so callers push it every frame they want to accelerate.
    pub fn accelerate_at_angle(&mut self, angle: f32) {
        self.pending_acceleration += vector_at_angle(self.acceleration, angle);
    }

    /// Thrust accumulated for this frame
    pub fn pending_acceleration(&self) -> Vec2 {
        self.pending_acceleration
    }

    /// Integrate one step and return the displacement to apply
    pub fn integrate(&mut self, dt: f32) -> Vec2 {
        self.velocity += self.pending_acceleration * dt;

        let mut speed = self.speed();
        if self.pending_acceleration == Vec2::ZERO {
            speed -= self.deceleration * dt;
        }
        speed = clamp(speed, 0.0, self.max_speed);

        if self.velocity != Vec2::ZERO {
            self.heading = angle_of(self.velocity);
        }
        self.set_speed(speed);
        self.apply_axis_caps();

        self.pending_acceleration = Vec2::ZERO;
        self.velocity * dt
    }

    fn apply_axis_caps(&mut self) {
        if let Some(cap) = self.max_speed_x {
            self.velocity.x = clamp(self.velocity.x, -cap, cap);
        }
        if let Some(cap) = self.max_speed_y {
            self.velocity.y = clamp(self.velocity.y, -cap, cap);
        }
    }
}

impl Actor {
    /// Kinematic state, if this actor integrates its own motion
    pub fn kinematic(&self) -> Option<&KinematicMotion> {
        match &self.motion {
            Motion::Kinematic(motion) => Some(motion),
            _ => None,
        }
    }

    pub fn kinematic_mut(&mut self) -> Option<&mut KinematicMotion> {
        match &mut self.motion {
            Motion::Kinematic(motion) => Some(motion),
            _ => None,
        }
    }

    /// Integrate kinematic motion for one frame and move the actor
    ///
    /// No effect on stationary or rigid-body actors.
    pub fn apply_physics(&mut self, dt: f32) {
        if let Motion::Kinematic(motion) = &mut self.motion {
            let displacement = motion.integrate(dt);
            self.transform.position += displacement;
        }
    }

    /// Speed of a kinematic actor; zero for anything else
    pub fn speed(&self) -> f32 {
        self.kinematic().map_or(0.0, KinematicMotion::speed)
    }

    /// Set kinematic speed; from rest the actor heads where it faces
    pub fn set_speed(&mut self, speed: f32) {
        let facing = self.transform.rotation;
        if let Some(motion) = self.kinematic_mut() {
            motion.set_speed_or(speed, facing);
        }
    }

    /// Point the motion of a kinematic actor at `angle` degrees
    pub fn set_motion_angle(&mut self, angle: f32) {
        if let Some(motion) = self.kinematic_mut() {
            motion.set_motion_angle(angle);
        }
    }

    /// Queue one frame of thrust at `angle` degrees
    pub fn accelerate_at_angle(&mut self, angle: f32) {
        if let Some(motion) = self.kinematic_mut() {
            motion.accelerate_at_angle(angle);
        }
    }

    /// Queue one frame of thrust in the direction the actor faces
    pub fn accelerate_forward(&mut self) {
        let facing = self.transform.rotation;
        self.accelerate_at_angle(facing);
    }

    /// Unit vector of the direction the actor faces
    pub fn facing(&self) -> Vec2 {
        unit_at_angle(self.transform.rotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_set_speed_roundtrip() {
        let mut motion = KinematicMotion::new();
        motion.set_velocity(Vec2::new(3.0, 4.0));

        for speed in [0.0, 1.0, 12.5, 400.0] {
            motion.set_velocity(Vec2::new(3.0, 4.0));
            motion.set_speed(speed);
            assert_abs_diff_eq!(motion.speed(), speed, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_set_speed_from_rest_uses_fallback_angle() {
        let mut motion = KinematicMotion::new();
        motion.set_speed_or(10.0, 90.0);
        assert_abs_diff_eq!(motion.velocity().x, 0.0, epsilon = 1e-4);
        assert_abs_diff_eq!(motion.velocity().y, 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_motion_angle_at_rest_keeps_heading() {
        let mut motion = KinematicMotion::new();
        motion.set_motion_angle(135.0);
        assert_eq!(motion.speed(), 0.0);
        assert_eq!(motion.motion_angle(), 135.0);

        motion.set_speed(2.0);
        assert_abs_diff_eq!(motion.motion_angle(), 135.0, epsilon = 1e-3);
    }

    #[test]
    fn test_speed_never_exceeds_max() {
        let mut motion = KinematicMotion::with_profile(10_000.0, 0.0, 50.0);
        for frame in 0..120 {
            motion.accelerate_at_angle(frame as f32 * 7.0);
            motion.integrate(DT);
            assert!(motion.speed() <= 50.0 + 1e-3);
        }
    }

    #[test]
    fn test_thrust_for_two_seconds_saturates_at_max_speed() {
        let mut motion = KinematicMotion::with_profile(50.0, 0.0, 50.0);
        let mut previous = 0.0;

        for _ in 0..120 {
            motion.accelerate_at_angle(0.0);
            motion.integrate(DT);
            let speed = motion.speed();
            assert!(speed <= 50.0 + 1e-3, "speed {speed} exceeded the cap");
            assert!(speed + 1e-4 >= previous, "speed dropped while thrusting");
            previous = speed;
        }

        assert_abs_diff_eq!(motion.speed(), 50.0, epsilon = 1e-3);
    }

    #[test]
    fn test_deceleration_only_without_thrust() {
        let mut motion = KinematicMotion::with_profile(1.0, 100.0, 1000.0);
        motion.set_velocity(Vec2::new(100.0, 0.0));

        // Tiny thrust still suppresses the much larger deceleration
        motion.accelerate_at_angle(0.0);
        motion.integrate(0.1);
        assert_abs_diff_eq!(motion.speed(), 100.1, epsilon = 1e-3);

        motion.integrate(0.1);
        assert_abs_diff_eq!(motion.speed(), 90.1, epsilon = 1e-3);
    }

    #[test]
    fn test_deceleration_stops_at_zero() {
        let mut motion = KinematicMotion::with_profile(0.0, 100.0, 1000.0);
        motion.set_velocity(Vec2::new(0.0, 5.0));
        motion.integrate(1.0);
        assert_eq!(motion.speed(), 0.0);
        assert_abs_diff_eq!(motion.motion_angle(), 90.0, epsilon = 1e-3);
    }

    #[test]
    fn test_acceleration_is_cleared_each_step() {
        let mut motion = KinematicMotion::with_profile(10.0, 0.0, 1000.0);
        motion.accelerate_at_angle(0.0);
        motion.accelerate_at_angle(0.0);
        assert_abs_diff_eq!(motion.pending_acceleration().x, 20.0);

        motion.integrate(1.0);
        assert_eq!(motion.pending_acceleration(), Vec2::ZERO);
        assert_abs_diff_eq!(motion.speed(), 20.0, epsilon = 1e-3);

        // Without fresh thrust the speed holds (no deceleration configured)
        motion.integrate(1.0);
        assert_abs_diff_eq!(motion.speed(), 20.0, epsilon = 1e-3);
    }

    #[test]
    fn test_axis_caps() {
        let mut motion = KinematicMotion::new();
        motion.set_max_speed_x(Some(3.0));
        motion.set_max_speed_y(Some(1.0));
        motion.set_velocity(Vec2::new(-10.0, 10.0));
        motion.integrate(DT);
        assert_eq!(motion.velocity(), Vec2::new(-3.0, 1.0));
    }

    #[test]
    fn test_integrate_returns_displacement() {
        let mut motion = KinematicMotion::new();
        motion.set_velocity(Vec2::new(60.0, -30.0));
        let step = motion.integrate(0.5);
        assert_abs_diff_eq!(step.x, 30.0, epsilon = 1e-3);
        assert_abs_diff_eq!(step.y, -15.0, epsilon = 1e-3);
    }
}
