// World-bounds policies: clamp inside the level or wrap around its edges

use glam::Vec2;
use log::warn;

use super::{Actor, BoundsPolicy};
use crate::engine::config::WorldBounds;
use crate::engine::physics::PhysicsWorld;

impl Actor {
    pub fn bounds_policy(&self) -> BoundsPolicy {
        self.bounds_policy
    }

    pub fn set_bounds_policy(&mut self, policy: BoundsPolicy) {
        self.bounds_policy = policy;
    }

    /// Run whichever policy the actor was configured with
    pub fn apply_bounds_policy(&mut self, bounds: &WorldBounds, physics: Option<&mut PhysicsWorld>) {
        match self.bounds_policy {
            BoundsPolicy::None => {}
            BoundsPolicy::Clamp => self.bound_to_world(bounds, physics),
            BoundsPolicy::Wrap => self.wrap_around_world(bounds, physics),
        }
    }

    /// Snap the actor's rectangle fully inside the world
    pub fn bound_to_world(&mut self, bounds: &WorldBounds, physics: Option<&mut PhysicsWorld>) {
        let mut position = self.transform.position;

        if position.x < 0.0 {
            position.x = 0.0;
        }
        if position.x + self.size.x > bounds.width() {
            position.x = bounds.width() - self.size.x;
        }
        if position.y < 0.0 {
            position.y = 0.0;
        }
        if position.y + self.size.y > bounds.height() {
            position.y = bounds.height() - self.size.y;
        }

        self.reposition(position, physics);
    }

    /// Once fully past an edge, reappear just outside the opposite edge
    pub fn wrap_around_world(&mut self, bounds: &WorldBounds, physics: Option<&mut PhysicsWorld>) {
        let mut position = self.transform.position;

        if position.x + self.size.x < 0.0 {
            position.x = bounds.width();
        } else if position.x > bounds.width() {
            position.x = -self.size.x;
        }
        if position.y + self.size.y < 0.0 {
            position.y = bounds.height();
        } else if position.y > bounds.height() {
            position.y = -self.size.y;
        }

        self.reposition(position, physics);
    }

    /// Move to `position`, through the body when the actor has one
    fn reposition(&mut self, position: Vec2, physics: Option<&mut PhysicsWorld>) {
        if position == self.transform.position {
            return;
        }
        if self.body_handle().is_none() {
            self.transform.position = position;
            return;
        }

        match physics {
            Some(world) => {
                let center = position + self.transform.origin;
                self.center_body_at(world, center);
            }
            None => {
                warn!("Rigid-body actor repositioned without a physics world; the body will pull it back");
                self.transform.position = position;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::actor::{KinematicMotion, RigidBodyMotion};
    use approx::assert_abs_diff_eq;

    fn bounds() -> WorldBounds {
        WorldBounds::new(800.0, 600.0)
    }

    fn box_actor(x: f32, y: f32) -> Actor {
        let mut actor = Actor::new(x, y);
        actor.set_size(40.0, 20.0);
        actor
    }

    #[test]
    fn test_clamp_right_edge() {
        let mut actor = box_actor(800.0 + 1.0 - 40.0, 100.0);
        actor.bound_to_world(&bounds(), None);
        assert_eq!(actor.x() + actor.width(), 800.0);
        assert_eq!(actor.y(), 100.0);
    }

    #[test]
    fn test_clamp_every_side() {
        let mut actor = box_actor(-5.0, -7.0);
        actor.bound_to_world(&bounds(), None);
        assert_eq!(actor.position(), Vec2::ZERO);

        actor.set_position(900.0, 700.0);
        actor.bound_to_world(&bounds(), None);
        assert_eq!(actor.position(), Vec2::new(760.0, 580.0));
    }

    #[test]
    fn test_wrap_past_right_edge() {
        let mut actor = box_actor(801.0, 300.0);
        actor.wrap_around_world(&bounds(), None);
        assert!(actor.x() + actor.width() <= 0.0);
        assert_eq!(actor.y(), 300.0);
    }

    #[test]
    fn test_wrap_waits_until_fully_outside() {
        let mut actor = box_actor(-30.0, 590.0);
        actor.wrap_around_world(&bounds(), None);
        assert_eq!(actor.position(), Vec2::new(-30.0, 590.0));

        actor.set_position(-41.0, -21.0);
        actor.wrap_around_world(&bounds(), None);
        assert_eq!(actor.position(), Vec2::new(800.0, 600.0));
    }

    #[test]
    fn test_kinematic_actor_wraps_during_act() {
        let mut motion = KinematicMotion::new();
        motion.set_velocity(Vec2::new(-100.0, 0.0));
        let mut actor = Actor::kinematic(-30.0, 100.0, motion).with_bounds_policy(BoundsPolicy::Wrap);
        actor.set_size(40.0, 20.0);

        actor.act(0.2, &bounds(), None);
        assert_eq!(actor.x(), 800.0);
    }

    #[test]
    fn test_rigid_wrap_moves_the_body() {
        let mut world = PhysicsWorld::new();
        let mut rigid = RigidBodyMotion::new();
        rigid.set_physics_properties(1.0, 0.2, 0.0);

        let mut rock = Actor::rigid(850.0, 300.0, rigid).with_bounds_policy(BoundsPolicy::Wrap);
        rock.set_size(40.0, 40.0);
        rock.set_shape_circle().expect("rock is rigid");
        rock.initialize_physics(&mut world).expect("shape configured");

        rock.act(0.0, &bounds(), Some(&mut world));
        assert_eq!(rock.x(), -40.0);

        // The next sync reads the body, which was moved too
        rock.sync_from_body(&mut world);
        assert_abs_diff_eq!(rock.x(), -40.0, epsilon = 1e-3);
        assert_abs_diff_eq!(rock.y(), 300.0, epsilon = 1e-3);
    }
}
