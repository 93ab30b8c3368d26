// The player's ship: kinematic flight, lasers, warp jumps and a shield

use glam::Vec2;
use log::{debug, info};
use rand::Rng;

use super::controls::{Action, Controls};
use super::effects::spawn_warp;
use super::profiles::{
    LASER, LASER_FADE, LASER_LIFETIME, LASER_SPEED, SHIELD_HIT_COST, SHIELD_POWER, SHIP,
    SHIP_ROTATION_SPEED, STRAFE_ACCELERATION,
};
use super::sprites::Sprites;
use super::Kind;
use crate::engine::actor::{Actor, ActorId, BoundsPolicy};
use crate::engine::config::WorldBounds;
use crate::engine::stage::Stage;

/// Sides of the polygon approximating the hull
const HULL_SIDES: usize = 8;

/// Game state of the ship; the actor itself lives on the stage
#[derive(Debug, Clone, PartialEq)]
pub struct Spaceship {
    id: ActorId,
    shield_power: i32,
}

impl Spaceship {
    /// Put a ship on the stage with its bottom-left corner at `(x, y)`
    pub fn spawn(stage: &mut Stage<Kind>, sprites: &Sprites, x: f32, y: f32) -> Self {
        let mut ship = Actor::kinematic(x, y, SHIP.motion()).with_bounds_policy(BoundsPolicy::Wrap);
        ship.set_animation(sprites.spaceship.clone());
        ship.set_boundary_polygon(HULL_SIDES);

        let id = stage.add(Kind::Spaceship, ship);
        Self {
            id,
            shield_power: SHIELD_POWER,
        }
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn shield_power(&self) -> i32 {
        self.shield_power
    }

    /// Take a rock hit; false once the shield has nothing left to give
    pub fn absorb_hit(&mut self) -> bool {
        if self.shield_power <= 0 {
            return false;
        }
        self.shield_power -= SHIELD_HIT_COST;
        info!("Shield hit, {} power left", self.shield_power.max(0));
        true
    }

    /// Turn, strafe and thrust according to this frame's controls
    pub fn steer(&self, stage: &mut Stage<Kind>, controls: &Controls, dt: f32) {
        let Some(ship) = stage.get_mut(self.id) else {
            return;
        };

        ship.rotate_by(SHIP_ROTATION_SPEED * controls.rotation() * dt);
        let facing = ship.rotation();

        let Some(motion) = ship.kinematic_mut() else {
            return;
        };
        for (action, side) in [(Action::StrafeLeft, 90.0), (Action::StrafeRight, -90.0)] {
            if controls.just_pressed(action) {
                motion.set_acceleration(STRAFE_ACCELERATION);
                motion.accelerate_at_angle(facing + side);
                motion.set_acceleration(SHIP.acceleration);
            }
        }
        if controls.is_pressed(Action::Thrust) {
            motion.accelerate_at_angle(facing);
        }
    }

    /// Fire a laser from the middle of the ship along its facing
    pub fn shoot(&self, stage: &mut Stage<Kind>, sprites: &Sprites) -> Option<ActorId> {
        let laser = laser(sprites, stage.get(self.id)?);
        let id = stage.add(Kind::Laser, laser);
        debug!("Laser {:?} fired", id);
        Some(id)
    }

    /// Jump to a random spot in the world, leaving a flash at both ends
    pub fn warp<R: Rng>(
        &self,
        stage: &mut Stage<Kind>,
        sprites: &Sprites,
        bounds: &WorldBounds,
        rng: &mut R,
    ) {
        let Some(departure) = stage.get(self.id).map(Actor::center) else {
            return;
        };
        spawn_warp(stage, sprites, departure);

        let target = Vec2::new(
            rng.gen_range(0.0..=bounds.width()),
            rng.gen_range(0.0..=bounds.height()),
        );
        let Some(ship) = stage.get_mut(self.id) else {
            return;
        };
        ship.set_position(target.x, target.y);
        let arrival = ship.center();

        spawn_warp(stage, sprites, arrival);
        debug!("Warped from {departure} to {arrival}");
    }
}

/// A laser leaving `shooter`'s center in the direction it faces
pub fn laser(sprites: &Sprites, shooter: &Actor) -> Actor {
    let mut laser = Actor::kinematic(0.0, 0.0, LASER.motion()).with_bounds_policy(BoundsPolicy::Wrap);
    laser.set_animation(sprites.laser.clone());
    laser.center_at_actor(shooter, None);
    laser.set_rotation(shooter.rotation());
    laser.set_motion_angle(shooter.rotation());
    laser.set_speed(LASER_SPEED);
    laser.expire_after(LASER_LIFETIME, LASER_FADE);
    laser
}
