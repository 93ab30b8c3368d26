use glam::Vec2;
use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// How the physics world moves a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyKind {
    /// Never moves
    Static,
    /// Moved only by its velocity, ignores forces and contacts
    Kinematic,
    /// Fully simulated
    #[default]
    Dynamic,
}

impl BodyKind {
    fn rigid_body_type(self) -> RigidBodyType {
        match self {
            BodyKind::Static => RigidBodyType::Fixed,
            BodyKind::Kinematic => RigidBodyType::KinematicVelocityBased,
            BodyKind::Dynamic => RigidBodyType::Dynamic,
        }
    }
}

/// Description of a rigid body, in simulation units (meters, radians)
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDef {
    pub kind: BodyKind,
    pub position: Vec2,
    pub angle: f32,
    pub fixed_rotation: bool,
    pub gravity_scale: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
}

impl Default for BodyDef {
    fn default() -> Self {
        Self {
            kind: BodyKind::Dynamic,
            position: Vec2::ZERO,
            angle: 0.0,
            fixed_rotation: false,
            gravity_scale: 1.0,
            linear_damping: 0.0,
            angular_damping: 0.0,
        }
    }
}

impl BodyDef {
    pub fn new(kind: BodyKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Set the initial center position (meters)
    pub fn position(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    /// Set the initial angle (radians)
    pub fn angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    /// Lock rotation
    pub fn fixed_rotation(mut self, fixed: bool) -> Self {
        self.fixed_rotation = fixed;
        self
    }

    /// Set the gravity scale (1.0 = normal gravity, 0.0 = no gravity)
    pub fn gravity_scale(mut self, scale: f32) -> Self {
        self.gravity_scale = scale;
        self
    }

    pub fn linear_damping(mut self, damping: f32) -> Self {
        self.linear_damping = damping;
        self
    }

    /// Build the rapier rigid body
    pub fn build(&self) -> RigidBody {
        let locked_axes = if self.fixed_rotation {
            LockedAxes::ROTATION_LOCKED
        } else {
            LockedAxes::empty()
        };

        RigidBodyBuilder::new(self.kind.rigid_body_type())
            .position(Isometry::new(
                vector![self.position.x, self.position.y],
                self.angle,
            ))
            .gravity_scale(self.gravity_scale)
            .linear_damping(self.linear_damping)
            .angular_damping(self.angular_damping)
            .locked_axes(locked_axes)
            .build()
    }
}

/// Collision shape of a fixture, in meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FixtureShape {
    Box { half_width: f32, half_height: f32 },
    Circle { radius: f32 },
}

/// Description of the collider attached to a body
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureDef {
    pub shape: Option<FixtureShape>,
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
    pub sensor: bool,
    /// Center of the shape relative to the body center, in meters
    pub offset: Vec2,
}

impl Default for FixtureDef {
    fn default() -> Self {
        Self {
            shape: None,
            density: 0.0,
            friction: 0.2,
            restitution: 0.0,
            sensor: false,
            offset: Vec2::ZERO,
        }
    }
}

impl FixtureDef {
    pub fn shape(mut self, shape: FixtureShape) -> Self {
        self.shape = Some(shape);
        self
    }

    /// Set density, friction and restitution in one go
    pub fn material(mut self, density: f32, friction: f32, restitution: f32) -> Self {
        self.density = density;
        self.friction = friction;
        self.restitution = restitution;
        self
    }

    /// Make this a sensor (detects contacts but doesn't cause physical response)
    pub fn sensor(mut self, is_sensor: bool) -> Self {
        self.sensor = is_sensor;
        self
    }

    pub fn offset(mut self, x: f32, y: f32) -> Self {
        self.offset = Vec2::new(x, y);
        self
    }

    /// Build the collider, or `None` if no shape was configured
    pub fn build(&self) -> Option<Collider> {
        let shape = match self.shape? {
            FixtureShape::Box {
                half_width,
                half_height,
            } => SharedShape::cuboid(half_width, half_height),
            FixtureShape::Circle { radius } => SharedShape::ball(radius),
        };

        Some(
            ColliderBuilder::new(shape)
                .density(self.density)
                .friction(self.friction)
                .restitution(self.restitution)
                .sensor(self.sensor)
                .translation(vector![self.offset.x, self.offset.y])
                .active_events(ActiveEvents::COLLISION_EVENTS)
                .build(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_offset() {
        let collider = FixtureDef::default()
            .shape(FixtureShape::Box {
                half_width: 0.5,
                half_height: 0.25,
            })
            .offset(0.0, -1.2)
            .sensor(true)
            .build()
            .expect("shape set");

        assert!(collider.is_sensor());
        assert_eq!(collider.translation().x, 0.0);
        assert_eq!(collider.translation().y, -1.2);
    }

    #[test]
    fn test_body_def_dynamic() {
        let body = BodyDef::new(BodyKind::Dynamic)
            .position(10.0, 20.0)
            .gravity_scale(0.0)
            .build();

        assert_eq!(body.body_type(), RigidBodyType::Dynamic);
        assert_eq!(body.translation().x, 10.0);
        assert_eq!(body.translation().y, 20.0);
        assert_eq!(body.gravity_scale(), 0.0);
    }

    #[test]
    fn test_body_def_kinds() {
        assert_eq!(
            BodyDef::new(BodyKind::Static).build().body_type(),
            RigidBodyType::Fixed
        );
        assert_eq!(
            BodyDef::new(BodyKind::Kinematic).build().body_type(),
            RigidBodyType::KinematicVelocityBased
        );
    }

    #[test]
    fn test_fixed_rotation() {
        let body = BodyDef::default().fixed_rotation(true).build();
        assert!(body.is_rotation_locked());
    }

    #[test]
    fn test_fixture_without_shape() {
        assert!(FixtureDef::default().build().is_none());
    }

    #[test]
    fn test_fixture_box() {
        let collider = FixtureDef::default()
            .shape(FixtureShape::Box {
                half_width: 1.0,
                half_height: 2.0,
            })
            .material(1.0, 0.3, 0.1)
            .build()
            .expect("shape was set");

        assert!(!collider.is_sensor());
        assert_eq!(collider.friction(), 0.3);
        assert_eq!(collider.restitution(), 0.1);
    }

    #[test]
    fn test_fixture_sensor_circle() {
        let collider = FixtureDef::default()
            .shape(FixtureShape::Circle { radius: 0.5 })
            .sensor(true)
            .build()
            .expect("shape was set");
        assert!(collider.is_sensor());
    }
}
