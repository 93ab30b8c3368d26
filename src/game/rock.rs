// Rocks: physics-driven, drifting and spinning, wrapping around the world

use rand::Rng;

use super::profiles::{RockProfile, ROCK};
use super::sprites::Sprites;
use super::Kind;
use crate::core::math::vector_at_angle;
use crate::engine::actor::{Actor, ActorId, BoundsPolicy, RigidBodyMotion};
use crate::engine::physics::PhysicsWorld;
use crate::engine::stage::{Stage, StageError};

/// A rock with its bottom-left corner at `(x, y)`, ready for `add_with_body`
pub fn rock(sprites: &Sprites, profile: &RockProfile, top_speed: f32, x: f32, y: f32) -> Result<Actor, StageError> {
    let mut motion = RigidBodyMotion::new();
    motion.set_dynamic();
    motion.set_physics_properties(profile.density, profile.friction, profile.restitution);
    motion.set_gravity_scale(0.0);
    motion.set_max_speed(Some(top_speed));

    let mut rock = Actor::rigid(x, y, motion).with_bounds_policy(BoundsPolicy::Wrap);
    rock.set_animation(sprites.rock.clone());
    rock.set_boundary_polygon(8);
    rock.set_shape_circle()?;
    Ok(rock)
}

/// Spawn a rock drifting in a random direction with a random spin
pub fn spawn<R: Rng>(
    stage: &mut Stage<Kind>,
    physics: &mut PhysicsWorld,
    sprites: &Sprites,
    rng: &mut R,
    x: f32,
    y: f32,
) -> Result<ActorId, StageError> {
    let speed = ROCK.speed + rng.gen_range(0.0..=ROCK.speed_spread);
    let spin = ROCK.spin + rng.gen_range(0.0..=ROCK.spin_spread);
    let heading = rng.gen_range(0.0..360.0);

    let id = stage.add_with_body(Kind::Rock, rock(sprites, &ROCK, speed, x, y)?, physics)?;
    let actor = stage.get(id).ok_or(StageError::UnknownActor(id))?;
    actor.set_body_velocity(physics, vector_at_angle(speed, heading));
    actor.set_angular_velocity(physics, spin);
    Ok(id)
}
