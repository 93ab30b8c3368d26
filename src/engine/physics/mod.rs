// Physics world collaborator backed by rapier2d

pub mod body;
mod collision;
mod world;

pub use body::{BodyDef, BodyKind, ColliderHandle, FixtureDef, FixtureShape, RigidBodyHandle};
pub use collision::ContactEvent;
pub use world::PhysicsWorld;

// Re-export rapier types used by actors talking to bodies directly
pub use rapier2d::prelude::{RigidBody, Vector};
