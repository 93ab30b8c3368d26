// Rigid-body motion: the physics world owns the body, the actor mirrors it

use glam::Vec2;
use log::{debug, error, warn};
use rapier2d::prelude::{vector, Isometry};

use super::{Actor, ActorError, Motion};
use crate::core::math::{clamp, unit_at_angle, vector_at_angle, with_length};
use crate::engine::config::{to_meters, to_pixels};
use crate::engine::physics::{
    BodyDef, BodyKind, ColliderHandle, FixtureDef, FixtureShape, PhysicsWorld, RigidBody,
    RigidBodyHandle,
};

/// Default force used by `move_forward`, in newtons
pub const DEFAULT_ACCELERATION: f32 = 2.0;

/// Optional limits on a body's linear velocity, in meters per second
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpeedCaps {
    pub max_speed: Option<f32>,
    pub max_x: Option<f32>,
    pub max_y: Option<f32>,
}

/// Clamp each axis to its cap, then the overall speed
///
/// The overall cap is checked last and keeps the direction of travel.
pub fn clamp_velocity(velocity: Vec2, caps: &SpeedCaps) -> Vec2 {
    let mut v = velocity;
    if let Some(max_x) = caps.max_x {
        v.x = clamp(v.x, -max_x, max_x);
    }
    if let Some(max_y) = caps.max_y {
        v.y = clamp(v.y, -max_y, max_y);
    }
    if let Some(max_speed) = caps.max_speed {
        if v.length() > max_speed {
            v = with_length(v, max_speed);
        }
    }
    v
}

/// Body and fixture description plus the handle once the body exists
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBodyMotion {
    body_def: BodyDef,
    fixture_def: FixtureDef,
    /// Further fixtures on the same body, e.g. a foot sensor
    extra_fixtures: Vec<FixtureDef>,
    body: Option<RigidBodyHandle>,
    extra_colliders: Vec<ColliderHandle>,
    caps: SpeedCaps,
    acceleration: f32,
}

impl Default for RigidBodyMotion {
    fn default() -> Self {
        Self {
            body_def: BodyDef::new(BodyKind::Dynamic),
            fixture_def: FixtureDef::default(),
            extra_fixtures: Vec::new(),
            body: None,
            extra_colliders: Vec::new(),
            caps: SpeedCaps::default(),
            acceleration: DEFAULT_ACCELERATION,
        }
    }
}

impl RigidBodyMotion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body_handle(&self) -> Option<RigidBodyHandle> {
        self.body
    }

    pub fn body_def(&self) -> &BodyDef {
        &self.body_def
    }

    pub fn fixture_def(&self) -> &FixtureDef {
        &self.fixture_def
    }

    /// Another fixture to create alongside the main one
    pub fn add_fixture(&mut self, fixture: FixtureDef) {
        self.warn_if_created("Extra fixture");
        self.extra_fixtures.push(fixture);
    }

    /// Colliders created from the extra fixtures, in the order they were added
    pub fn extra_colliders(&self) -> &[ColliderHandle] {
        &self.extra_colliders
    }

    fn warn_if_created(&self, setting: &str) {
        if self.body.is_some() {
            warn!("{setting} changed after the body was created; it has no effect");
        }
    }

    pub fn set_body_kind(&mut self, kind: BodyKind) {
        self.warn_if_created("Body kind");
        self.body_def.kind = kind;
    }

    pub fn set_static(&mut self) {
        self.set_body_kind(BodyKind::Static);
    }

    pub fn set_kinematic(&mut self) {
        self.set_body_kind(BodyKind::Kinematic);
    }

    pub fn set_dynamic(&mut self) {
        self.set_body_kind(BodyKind::Dynamic);
    }

    pub fn set_fixed_rotation(&mut self, fixed: bool) {
        self.warn_if_created("Fixed rotation");
        self.body_def.fixed_rotation = fixed;
    }

    /// Register contacts without a physical response
    pub fn set_sensor(&mut self, sensor: bool) {
        self.warn_if_created("Sensor flag");
        self.fixture_def.sensor = sensor;
    }

    pub fn set_physics_properties(&mut self, density: f32, friction: f32, restitution: f32) {
        self.warn_if_created("Material");
        self.fixture_def.density = density;
        self.fixture_def.friction = friction;
        self.fixture_def.restitution = restitution;
    }

    pub fn set_gravity_scale(&mut self, scale: f32) {
        self.warn_if_created("Gravity scale");
        self.body_def.gravity_scale = scale;
    }

    pub fn set_linear_damping(&mut self, damping: f32) {
        self.warn_if_created("Linear damping");
        self.body_def.linear_damping = damping;
    }

    pub fn caps(&self) -> &SpeedCaps {
        &self.caps
    }

    /// Cap on overall speed (m/s)
    pub fn set_max_speed(&mut self, max_speed: Option<f32>) {
        self.caps.max_speed = max_speed;
    }

    pub fn set_max_speed_x(&mut self, max_x: Option<f32>) {
        self.caps.max_x = max_x.map(f32::abs);
    }

    pub fn set_max_speed_y(&mut self, max_y: Option<f32>) {
        self.caps.max_y = max_y.map(f32::abs);
    }

    pub fn acceleration(&self) -> f32 {
        self.acceleration
    }

    /// Force applied by `move_forward`
    pub fn set_acceleration(&mut self, acceleration: f32) {
        self.acceleration = acceleration;
    }
}

/// Rigid-body operations need a body; calling them without one is a bug
fn body_precondition_failed(operation: &str) {
    error!("{operation} requires a rigid body, but none has been created");
    if cfg!(debug_assertions) {
        panic!("{operation} requires a rigid body, but none has been created");
    }
}

fn to_vec2(v: &rapier2d::prelude::Vector<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

impl Actor {
    pub fn rigid_body(&self) -> Option<&RigidBodyMotion> {
        match &self.motion {
            Motion::RigidBody(rigid) => Some(rigid),
            _ => None,
        }
    }

    pub fn rigid_body_mut(&mut self) -> Option<&mut RigidBodyMotion> {
        match &mut self.motion {
            Motion::RigidBody(rigid) => Some(rigid),
            _ => None,
        }
    }

    pub fn body_handle(&self) -> Option<RigidBodyHandle> {
        self.rigid_body().and_then(RigidBodyMotion::body_handle)
    }

    fn body<'w>(&self, world: &'w PhysicsWorld, operation: &str) -> Option<&'w RigidBody> {
        let body = match self.body_handle() {
            Some(handle) => world.body(handle),
            None => None,
        };
        if body.is_none() {
            body_precondition_failed(operation);
        }
        body
    }

    fn body_mut<'w>(
        &self,
        world: &'w mut PhysicsWorld,
        operation: &str,
    ) -> Option<&'w mut RigidBody> {
        let body = match self.body_handle() {
            Some(handle) => world.body_mut(handle),
            None => None,
        };
        if body.is_none() {
            body_precondition_failed(operation);
        }
        body
    }

    /// Center the body on the actor and give it a box the size of the actor
    pub fn set_shape_rectangle(&mut self) -> Result<(), ActorError> {
        let half = Vec2::new(to_meters(self.width()), to_meters(self.height())) / 2.0;
        self.set_fixture_shape(FixtureShape::Box {
            half_width: half.x,
            half_height: half.y,
        })
    }

    /// Center the body on the actor and give it a circle as wide as the actor
    pub fn set_shape_circle(&mut self) -> Result<(), ActorError> {
        let radius = to_meters(self.width()) / 2.0;
        self.set_fixture_shape(FixtureShape::Circle { radius })
    }

    fn set_fixture_shape(&mut self, shape: FixtureShape) -> Result<(), ActorError> {
        if !self.is_rigid() {
            return Err(ActorError::NotRigidBody);
        }
        if self.size.x == 0.0 {
            error!("Physics shape requested before the actor size was set");
        }

        self.set_origin_center();
        let center = self.transform.position + self.transform.origin;
        if let Some(rigid) = self.rigid_body_mut() {
            rigid.warn_if_created("Shape");
            rigid.body_def.position = Vec2::new(to_meters(center.x), to_meters(center.y));
            rigid.fixture_def.shape = Some(shape);
        }
        Ok(())
    }

    /// Add a sensor box (pixels) centered `offset` pixels from the body center
    pub fn add_sensor_box(&mut self, width: f32, height: f32, offset: Vec2) -> Result<(), ActorError> {
        let rigid = self.rigid_body_mut().ok_or(ActorError::NotRigidBody)?;
        rigid.add_fixture(
            FixtureDef::default()
                .shape(FixtureShape::Box {
                    half_width: to_meters(width) / 2.0,
                    half_height: to_meters(height) / 2.0,
                })
                .offset(to_meters(offset.x), to_meters(offset.y))
                .sensor(true),
        );
        Ok(())
    }

    /// Create the body and its fixtures in `world`
    pub fn initialize_physics(
        &mut self,
        world: &mut PhysicsWorld,
    ) -> Result<RigidBodyHandle, ActorError> {
        let center = self.transform.position + self.transform.origin;
        let angle = self.transform.rotation.to_radians();

        let Motion::RigidBody(rigid) = &mut self.motion else {
            return Err(ActorError::NotRigidBody);
        };
        if rigid.body.is_some() {
            return Err(ActorError::AlreadyInitialized);
        }
        let collider = rigid.fixture_def.build().ok_or(ActorError::MissingShape)?;
        let extras = rigid
            .extra_fixtures
            .iter()
            .map(|fixture| fixture.build().ok_or(ActorError::MissingShape))
            .collect::<Result<Vec<_>, _>>()?;

        rigid.body_def.position = Vec2::new(to_meters(center.x), to_meters(center.y));
        rigid.body_def.angle = angle;
        let (handle, _) = world.create_body(rigid.body_def.build(), Some(collider));
        rigid.body = Some(handle);
        rigid.extra_colliders = extras
            .into_iter()
            .map(|extra| world.attach_collider(handle, extra))
            .collect();

        debug!("Initialized physics for actor at ({}, {})", center.x, center.y);
        Ok(handle)
    }

    /// Remove the body from `world`; the actor keeps its last transform
    pub fn destroy_body(&mut self, world: &mut PhysicsWorld) -> bool {
        if let Some(rigid) = self.rigid_body_mut() {
            rigid.extra_colliders.clear();
        }
        match self.rigid_body_mut().and_then(|rigid| rigid.body.take()) {
            Some(handle) => world.destroy_body(handle),
            None => false,
        }
    }

    /// Enforce speed caps on the body, then copy its transform to the actor
    pub fn sync_from_body(&mut self, world: &mut PhysicsWorld) {
        let Some(rigid) = self.rigid_body() else {
            return;
        };
        let caps = rigid.caps;
        let Some(body) = self.body_mut(world, "sync_from_body") else {
            return;
        };

        let velocity = to_vec2(body.linvel());
        let clamped = clamp_velocity(velocity, &caps);
        if clamped != velocity {
            body.set_linvel(vector![clamped.x, clamped.y], true);
        }

        let center = to_vec2(body.translation());
        let angle = body.rotation().angle();

        self.transform.position =
            Vec2::new(to_pixels(center.x), to_pixels(center.y)) - self.transform.origin;
        self.transform.rotation = angle.to_degrees();
    }

    // Velocity, in meters per second

    pub fn body_velocity(&self, world: &PhysicsWorld) -> Vec2 {
        self.body(world, "body_velocity")
            .map_or(Vec2::ZERO, |body| to_vec2(body.linvel()))
    }

    pub fn set_body_velocity(&self, world: &mut PhysicsWorld, velocity: Vec2) {
        if let Some(body) = self.body_mut(world, "set_body_velocity") {
            body.set_linvel(vector![velocity.x, velocity.y], true);
        }
    }

    pub fn body_speed(&self, world: &PhysicsWorld) -> f32 {
        self.body_velocity(world).length()
    }

    pub fn is_body_moving(&self, world: &PhysicsWorld) -> bool {
        self.body_speed(world) > 0.0
    }

    /// Set speed along the current direction; from rest along the facing
    pub fn set_body_speed(&self, world: &mut PhysicsWorld, speed: f32) {
        let velocity = self.body_velocity(world);
        let next = if velocity == Vec2::ZERO {
            self.rotation_vector(world) * speed
        } else {
            with_length(velocity, speed)
        };
        self.set_body_velocity(world, next);
    }

    // Orientation

    /// Body angle in degrees
    pub fn rotation_angle(&self, world: &PhysicsWorld) -> f32 {
        self.body(world, "rotation_angle")
            .map_or(0.0, |body| body.rotation().angle().to_degrees())
    }

    /// Turn the body to face `degrees`, keeping its position
    pub fn set_rotation_angle(&self, world: &mut PhysicsWorld, degrees: f32) {
        if let Some(body) = self.body_mut(world, "set_rotation_angle") {
            let t = *body.translation();
            body.set_position(Isometry::new(t, degrees.to_radians()), true);
        }
    }

    /// Unit vector the body faces
    pub fn rotation_vector(&self, world: &PhysicsWorld) -> Vec2 {
        unit_at_angle(self.rotation_angle(world))
    }

    /// Spin rate in degrees per second
    pub fn set_angular_velocity(&self, world: &mut PhysicsWorld, degrees_per_second: f32) {
        if let Some(body) = self.body_mut(world, "set_angular_velocity") {
            body.set_angvel(degrees_per_second.to_radians(), true);
        }
    }

    // Forces

    pub fn apply_force(&self, world: &mut PhysicsWorld, force: Vec2) {
        if let Some(body) = self.body_mut(world, "apply_force") {
            body.add_force(vector![force.x, force.y], true);
        }
    }

    pub fn apply_impulse(&self, world: &mut PhysicsWorld, impulse: Vec2) {
        if let Some(body) = self.body_mut(world, "apply_impulse") {
            body.apply_impulse(vector![impulse.x, impulse.y], true);
        }
    }

    /// Impulse of `magnitude` at `angle` degrees relative to the body's facing
    pub fn apply_impulse_at_angle(&self, world: &mut PhysicsWorld, magnitude: f32, angle: f32) {
        let heading = self.rotation_angle(world) + angle;
        self.apply_impulse(world, vector_at_angle(magnitude, heading));
    }

    /// Push along the facing with the configured acceleration force
    pub fn move_forward(&self, world: &mut PhysicsWorld) {
        let force = self.rigid_body().map_or(0.0, RigidBodyMotion::acceleration);
        let direction = self.rotation_vector(world);
        self.apply_force(world, direction * force);
    }

    // Teleports, in pixels; the body angle is kept

    pub fn translate_x(&self, world: &mut PhysicsWorld, pixels: f32) {
        self.translate_body(world, Vec2::new(pixels, 0.0), "translate_x");
    }

    pub fn translate_y(&self, world: &mut PhysicsWorld, pixels: f32) {
        self.translate_body(world, Vec2::new(0.0, pixels), "translate_y");
    }

    fn translate_body(&self, world: &mut PhysicsWorld, pixels: Vec2, operation: &str) {
        if let Some(body) = self.body_mut(world, operation) {
            let t = *body.translation();
            body.set_translation(
                vector![t.x + to_meters(pixels.x), t.y + to_meters(pixels.y)],
                true,
            );
        }
    }

    /// Move the actor so its bottom-left corner lands on `position`
    pub fn move_to(&mut self, world: &mut PhysicsWorld, position: Vec2) {
        let center = position + self.transform.origin;
        self.center_body_at(world, center);
    }

    /// Put the body's center on `center` (pixels) and mirror it immediately
    pub fn center_body_at(&mut self, world: &mut PhysicsWorld, center: Vec2) {
        if let Some(body) = self.body_mut(world, "center_body_at") {
            body.set_translation(vector![to_meters(center.x), to_meters(center.y)], true);
            self.transform.position = center - self.transform.origin;
        }
    }
}
