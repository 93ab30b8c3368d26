// The level: one ship, a ring of rocks, and the rules between them

use glam::Vec2;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use super::controls::{Action, Controls};
use super::effects::spawn_explosion;
use super::rock;
use super::spaceship::Spaceship;
use super::sprites::Sprites;
use super::Kind;
use crate::engine::actor::{Actor, ActorId};
use crate::engine::animation::AnimationError;
use crate::engine::camera::Camera;
use crate::engine::config::{WorldBounds, WorldConfig};
use crate::engine::physics::PhysicsWorld;
use crate::engine::stage::{Stage, StageError};

/// Bottom-left corners of the starting rocks
pub const ROCK_POSITIONS: [(f32, f32); 8] = [
    (600.0, 500.0),
    (600.0, 300.0),
    (600.0, 100.0),
    (400.0, 100.0),
    (200.0, 100.0),
    (200.0, 300.0),
    (200.0, 500.0),
    (400.0, 500.0),
];

pub const SHIP_START: (f32, f32) = (400.0, 300.0);

/// Size of the window the camera looks through
pub const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("Failed to build sprites: {0}")]
    Sprites(#[from] AnimationError),

    #[error(transparent)]
    Stage(#[from] StageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Playing,
    Won,
    Lost,
}

pub struct Level {
    config: WorldConfig,
    bounds: WorldBounds,
    stage: Stage<Kind>,
    physics: PhysicsWorld,
    camera: Camera,
    sprites: Sprites,
    rng: StdRng,
    ship: Option<Spaceship>,
    outcome: Outcome,
    elapsed: f32,
}

impl Level {
    /// Lay out the level; `seed` fixes the rocks' drift and warp targets
    pub fn new(config: WorldConfig, seed: u64) -> Result<Self, LevelError> {
        let sprites = Sprites::load(&config)?;
        let mut stage = Stage::new();
        let mut physics = PhysicsWorld::with_gravity(config.gravity);
        let mut rng = StdRng::seed_from_u64(seed);

        let mut space = Actor::new(0.0, 0.0);
        space.set_animation(sprites.space.clone());
        let bounds = WorldBounds::from_size(space.size());
        stage.add(Kind::Background, space);

        let ship = Spaceship::spawn(&mut stage, &sprites, SHIP_START.0, SHIP_START.1);
        for (x, y) in ROCK_POSITIONS {
            rock::spawn(&mut stage, &mut physics, &sprites, &mut rng, x, y)?;
        }

        let mut camera = Camera::new(bounds.center(), VIEWPORT.x, VIEWPORT.y);
        if let Some(actor) = stage.get(ship.id()) {
            camera.follow(actor, &bounds);
        }

        info!(
            "Level ready: {}x{} world, {} rocks, {} bodies",
            bounds.width(),
            bounds.height(),
            stage.count(Kind::Rock),
            physics.body_count()
        );

        Ok(Self {
            config,
            bounds,
            stage,
            physics,
            camera,
            sprites,
            rng,
            ship: Some(ship),
            outcome: Outcome::Playing,
            elapsed: 0.0,
        })
    }

    /// Advance the level by one fixed step
    ///
    /// Controls are ignored once the game is decided; effects keep playing.
    pub fn update(&mut self, dt: f32, controls: &Controls) -> Result<Outcome, LevelError> {
        self.elapsed += dt;

        if self.outcome == Outcome::Playing {
            self.handle_controls(dt, controls);
        }

        self.stage.act(dt, &self.bounds, Some(&mut self.physics));

        if self.outcome == Outcome::Playing {
            self.resolve_ship_hits()?;
            self.resolve_laser_hits()?;
            if self.stage.count(Kind::Rock) == 0 {
                info!("All rocks destroyed after {:.1}s", self.elapsed);
                self.outcome = Outcome::Won;
            }
        }

        self.physics.step(
            dt,
            self.config.velocity_iterations,
            self.config.position_iterations,
        );
        for (a, b) in self.stage.contacts_between(Kind::Rock, Kind::Rock, &self.physics) {
            debug!("Rocks {:?} and {:?} collided", a, b);
        }

        if let Some(actor) = self.ship.as_ref().and_then(|ship| self.stage.get(ship.id())) {
            self.camera.follow(actor, &self.bounds);
        }

        Ok(self.outcome)
    }

    fn handle_controls(&mut self, dt: f32, controls: &Controls) {
        let Some(ship) = &self.ship else {
            return;
        };

        ship.steer(&mut self.stage, controls, dt);
        if controls.just_pressed(Action::Shoot) {
            ship.shoot(&mut self.stage, &self.sprites);
        }
        if controls.just_pressed(Action::Warp) {
            ship.warp(&mut self.stage, &self.sprites, &self.bounds, &mut self.rng);
        }
    }

    /// Rocks touching the ship break on its shield, or end the game once it is spent
    fn resolve_ship_hits(&mut self) -> Result<(), LevelError> {
        let Some(ship) = self.ship.as_mut() else {
            return Ok(());
        };

        for rock_id in self.stage.ids_of(Kind::Rock) {
            let (Some(ship_actor), Some(rock)) = (self.stage.get(ship.id()), self.stage.get(rock_id))
            else {
                continue;
            };
            if !ship_actor.overlaps(rock) {
                continue;
            }

            if ship.absorb_hit() {
                let center = rock.center();
                spawn_explosion(&mut self.stage, &self.sprites, center);
                self.stage.despawn(rock_id, &mut self.physics)?;
            } else {
                let center = ship_actor.center();
                spawn_explosion(&mut self.stage, &self.sprites, center);
                self.stage.remove(ship.id());
                info!("Ship destroyed after {:.1}s", self.elapsed);
                self.ship = None;
                self.outcome = Outcome::Lost;
                break;
            }
        }
        Ok(())
    }

    /// A laser touching a rock takes both out in an explosion
    fn resolve_laser_hits(&mut self) -> Result<(), LevelError> {
        for laser_id in self.stage.ids_of(Kind::Laser) {
            let hit = self.stage.get(laser_id).and_then(|laser| {
                self.stage
                    .ids_of(Kind::Rock)
                    .into_iter()
                    .find(|rock_id| self.stage.get(*rock_id).is_some_and(|rock| laser.overlaps(rock)))
            });
            let Some(rock_id) = hit else {
                continue;
            };

            if let Some(center) = self.stage.get(rock_id).map(Actor::center) {
                spawn_explosion(&mut self.stage, &self.sprites, center);
            }
            self.stage.remove(laser_id);
            self.stage.despawn(rock_id, &mut self.physics)?;
        }
        Ok(())
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn stage(&self) -> &Stage<Kind> {
        &self.stage
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    /// Stage and physics together, e.g. to despawn a rigid actor
    pub fn world_mut(&mut self) -> (&mut Stage<Kind>, &mut PhysicsWorld) {
        (&mut self.stage, &mut self.physics)
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn bounds(&self) -> &WorldBounds {
        &self.bounds
    }

    pub fn ship_id(&self) -> Option<ActorId> {
        self.ship.as_ref().map(Spaceship::id)
    }

    /// Zero once the ship is gone
    pub fn shield_power(&self) -> i32 {
        self.ship.as_ref().map_or(0, Spaceship::shield_power)
    }

    pub fn rock_count(&self) -> usize {
        self.stage.count(Kind::Rock)
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}
