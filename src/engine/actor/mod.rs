// Actor core: transform, collision shape and animation, composed with a motion strategy

mod bounds;
mod collision;
mod kinematic;
mod rigid;

use glam::{Vec2, Vec4};
use log::{error, warn};
use std::sync::Arc;

use crate::engine::animation::{Animator, FrameSequence, TextureRegion};
use crate::engine::config::WorldBounds;
use crate::engine::geometry::{Polygon, Transform2D};
use crate::engine::physics::PhysicsWorld;

pub use kinematic::{KinematicMotion, DEFAULT_MAX_SPEED};
pub use rigid::{clamp_velocity, RigidBodyMotion, SpeedCaps};

/// Unique identifier handed out by the stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u64);

impl ActorId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Errors from actor operations that depend on a rigid body
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ActorError {
    #[error("Physics already initialized for this actor")]
    AlreadyInitialized,

    #[error("No physics shape configured; set a rectangle or circle shape first")]
    MissingShape,

    #[error("Actor is not backed by a rigid body")]
    NotRigidBody,

    #[error("Rigid body is no longer present in the physics world")]
    BodyMissing,
}

/// How an actor moves, chosen when it is built
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Motion {
    /// Never moves on its own (backgrounds, effects)
    #[default]
    Stationary,
    /// Integrates its own velocity each frame
    Kinematic(KinematicMotion),
    /// Mirrors a body owned by the physics world
    RigidBody(RigidBodyMotion),
}

/// What happens when the actor reaches the edge of the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundsPolicy {
    #[default]
    None,
    /// Keep the bounding box fully inside the world
    Clamp,
    /// Reappear at the opposite edge once fully outside
    Wrap,
}

/// Timed removal with an optional fade-out over the final seconds
#[derive(Debug, Clone, Copy, PartialEq)]
struct Lifetime {
    remaining: f32,
    fade: f32,
}

/// A positioned, optionally animated entity with a convex collision shape
#[derive(Debug, Clone)]
pub struct Actor {
    transform: Transform2D,
    size: Vec2,
    color: Vec4,
    visible: bool,
    animator: Animator,
    /// Local-space collision shape; world space is derived on every read
    shape: Option<Polygon>,
    motion: Motion,
    bounds_policy: BoundsPolicy,
    remove_when_finished: bool,
    lifetime: Option<Lifetime>,
}

impl Actor {
    /// A stationary actor with its bottom-left corner at `(x, y)`
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            transform: Transform2D {
                position: Vec2::new(x, y),
                ..Transform2D::default()
            },
            size: Vec2::ZERO,
            color: Vec4::ONE,
            visible: true,
            animator: Animator::new(),
            shape: None,
            motion: Motion::Stationary,
            bounds_policy: BoundsPolicy::None,
            remove_when_finished: false,
            lifetime: None,
        }
    }

    /// An actor that integrates its own velocity
    pub fn kinematic(x: f32, y: f32, motion: KinematicMotion) -> Self {
        Self::new(x, y).with_motion(Motion::Kinematic(motion))
    }

    /// An actor backed by a physics body, created later by `initialize_physics`
    pub fn rigid(x: f32, y: f32, motion: RigidBodyMotion) -> Self {
        Self::new(x, y).with_motion(Motion::RigidBody(motion))
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.motion = motion;
        self
    }

    pub fn with_bounds_policy(mut self, policy: BoundsPolicy) -> Self {
        self.bounds_policy = policy;
        self
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub fn is_rigid(&self) -> bool {
        matches!(self.motion, Motion::RigidBody(_))
    }

    // Transform

    pub fn position(&self) -> Vec2 {
        self.transform.position
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.transform.position = Vec2::new(x, y);
    }

    pub fn x(&self) -> f32 {
        self.transform.position.x
    }

    pub fn y(&self) -> f32 {
        self.transform.position.y
    }

    pub fn move_by(&mut self, offset: Vec2) {
        self.transform.position += offset;
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
    }

    /// Pivot for rotation and scale, relative to the position
    pub fn origin(&self) -> Vec2 {
        self.transform.origin
    }

    pub fn set_origin(&mut self, origin: Vec2) {
        self.transform.origin = origin;
    }

    /// Pivot around the middle of the actor
    pub fn set_origin_center(&mut self) {
        self.transform.origin = self.size / 2.0;
    }

    /// Rotation in degrees, counter-clockwise
    pub fn rotation(&self) -> f32 {
        self.transform.rotation
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.transform.rotation = degrees;
    }

    pub fn rotate_by(&mut self, degrees: f32) {
        self.transform.rotation += degrees;
    }

    pub fn scale(&self) -> Vec2 {
        self.transform.scale
    }

    pub fn set_scale(&mut self, scale: Vec2) {
        self.transform.scale = scale;
    }

    pub fn transform(&self) -> &Transform2D {
        &self.transform
    }

    /// Middle of the actor's unrotated rectangle
    pub fn center(&self) -> Vec2 {
        self.transform.position + self.size / 2.0
    }

    // Visuals

    /// RGBA tint; alpha is the opacity
    pub fn color(&self) -> Vec4 {
        self.color
    }

    pub fn set_color(&mut self, color: Vec4) {
        self.color = color;
    }

    pub fn opacity(&self) -> f32 {
        self.color.w
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        self.color.w = opacity.clamp(0.0, 1.0);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    // Animation

    /// Show a new frame sequence
    ///
    /// The actor takes the size of the first frame and pivots around its
    /// middle. A rectangle collision shape is installed only if none exists.
    pub fn set_animation(&mut self, sequence: Arc<FrameSequence>) {
        self.size = sequence.first_frame_size();
        self.set_origin_center();
        self.animator.set_sequence(sequence);

        if self.shape.is_none() {
            self.set_boundary_rectangle();
        }
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn set_animation_paused(&mut self, paused: bool) {
        self.animator.clock_mut().set_paused(paused);
    }

    pub fn is_animation_finished(&self) -> bool {
        self.animator.is_finished()
    }

    /// Frame the renderer should draw now
    pub fn current_frame(&self) -> Option<&TextureRegion> {
        self.animator.current_frame()
    }

    // Collision shape

    /// Collision shape matching the actor's rectangle
    pub fn set_boundary_rectangle(&mut self) {
        self.shape = Some(Polygon::rectangle(self.size.x, self.size.y));
    }

    /// Collision shape as an n-gon inscribed in the actor's bounding ellipse
    pub fn set_boundary_polygon(&mut self, sides: usize) {
        self.shape = Some(Polygon::inscribed(self.size.x, self.size.y, sides));
    }

    pub fn has_shape(&self) -> bool {
        self.shape.is_some()
    }

    /// World-space collision polygon for the current transform
    ///
    /// Without an explicit shape the actor's rectangle is used.
    pub fn bounding_polygon(&self) -> Polygon {
        match &self.shape {
            Some(shape) => shape.transformed(&self.transform),
            None => Polygon::rectangle(self.size.x, self.size.y).transformed(&self.transform),
        }
    }

    // Placement

    /// Put the actor's center on `(x, y)`
    ///
    /// An actor with a rigid body is teleported through `physics`; without the
    /// world its next sync would undo the move.
    pub fn center_at_position(&mut self, x: f32, y: f32, physics: Option<&mut PhysicsWorld>) {
        let center = Vec2::new(x, y);
        match (self.body_handle(), physics) {
            (None, _) => self.transform.position = center - self.size / 2.0,
            (Some(_), Some(world)) => self.center_body_at(world, center),
            (Some(_), None) => {
                error!("center_at_position on a rigid body needs the physics world");
                debug_assert!(false, "center_at_position on a rigid body needs the physics world");
            }
        }
    }

    pub fn center_at_actor(&mut self, other: &Actor, physics: Option<&mut PhysicsWorld>) {
        let center = other.center();
        self.center_at_position(center.x, center.y, physics);
    }

    /// Place `other` `distance` pixels ahead of this actor, facing the same way
    ///
    /// The rotation of a rigid `other` is only visual until its body is turned.
    pub fn put_ahead(&self, other: &mut Actor, distance: f32, physics: Option<&mut PhysicsWorld>) {
        let target = self.center() + self.facing() * distance;
        other.center_at_position(target.x, target.y, physics);
        other.set_rotation(self.rotation());
    }

    // Lifecycle

    /// Ask the stage to drop this actor once a one-shot animation ends
    pub fn set_remove_when_finished(&mut self, remove: bool) {
        self.remove_when_finished = remove;
    }

    /// Remove after `seconds`, fading out over the final `fade` seconds
    pub fn expire_after(&mut self, seconds: f32, fade: f32) {
        self.lifetime = Some(Lifetime {
            remaining: seconds,
            fade: fade.max(0.0),
        });
    }

    /// Seconds until timed removal, if any
    pub fn remaining_lifetime(&self) -> Option<f32> {
        self.lifetime.map(|lifetime| lifetime.remaining)
    }

    /// True once the actor asked to be removed from its stage
    pub fn is_done(&self) -> bool {
        let finished = self.remove_when_finished && self.animator.is_finished();
        let expired = self
            .lifetime
            .is_some_and(|lifetime| lifetime.remaining <= 0.0);
        finished || expired
    }

    fn tick_lifetime(&mut self, dt: f32) {
        let Some(lifetime) = &mut self.lifetime else {
            return;
        };
        lifetime.remaining -= dt;

        if lifetime.fade > 0.0 && lifetime.remaining < lifetime.fade {
            let opacity = lifetime.remaining.max(0.0) / lifetime.fade;
            self.set_opacity(opacity);
        }
    }

    /// Advance one frame: animation clock, then motion, then bounds policy
    ///
    /// Rigid-body actors need the physics world to mirror their body; without
    /// it they keep their last visual transform.
    pub fn act(&mut self, dt: f32, bounds: &WorldBounds, mut physics: Option<&mut PhysicsWorld>) {
        self.animator.update(dt);
        self.tick_lifetime(dt);

        let body_ready = match &self.motion {
            Motion::RigidBody(rigid) => Some(rigid.body_handle().is_some()),
            _ => None,
        };

        match body_ready {
            None => self.apply_physics(dt),
            Some(true) => match physics.as_deref_mut() {
                Some(world) => self.sync_from_body(world),
                None => warn!("Rigid-body actor acted without a physics world"),
            },
            // Body not created yet
            Some(false) => {}
        }

        self.apply_bounds_policy(bounds, physics);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::animation::PlayMode;
    use crate::engine::assets::TextureHandle;
    use approx::assert_abs_diff_eq;

    fn sheet_sequence(mode: PlayMode) -> Arc<FrameSequence> {
        let sheet = TextureHandle::named("boom.png", 400, 100);
        Arc::new(FrameSequence::from_sheet(sheet, 1, 4, 0.1, mode).expect("grid fits the sheet"))
    }

    fn bounds() -> WorldBounds {
        WorldBounds::new(800.0, 600.0)
    }

    #[test]
    fn test_set_animation_sizes_actor_and_installs_rectangle() {
        let mut actor = Actor::new(10.0, 20.0);
        assert!(!actor.has_shape());

        actor.set_animation(sheet_sequence(PlayMode::Loop));
        assert_eq!(actor.size(), Vec2::new(100.0, 100.0));
        assert_eq!(actor.origin(), Vec2::new(50.0, 50.0));
        assert!(actor.has_shape());

        let rect = actor.bounding_polygon().bounding_rect();
        assert_abs_diff_eq!(rect.x, 10.0, epsilon = 1e-4);
        assert_abs_diff_eq!(rect.width, 100.0, epsilon = 1e-4);
    }

    #[test]
    fn test_set_animation_keeps_existing_shape() {
        let mut actor = Actor::new(0.0, 0.0);
        actor.set_size(100.0, 100.0);
        actor.set_boundary_polygon(8);
        actor.set_animation(sheet_sequence(PlayMode::Loop));
        assert_eq!(actor.bounding_polygon().vertices().len(), 8);
    }

    #[test]
    fn test_bounding_polygon_is_stable() {
        let mut actor = Actor::new(30.0, 40.0);
        actor.set_size(20.0, 10.0);
        actor.set_origin_center();
        actor.set_rotation(37.0);
        actor.set_boundary_polygon(6);

        assert_eq!(actor.bounding_polygon(), actor.bounding_polygon());
    }

    #[test]
    fn test_bounding_polygon_follows_rotation() {
        let mut actor = Actor::new(0.0, 0.0);
        actor.set_size(4.0, 2.0);
        actor.set_origin_center();
        actor.set_boundary_rectangle();
        actor.set_rotation(90.0);

        let rect = actor.bounding_polygon().bounding_rect();
        assert_abs_diff_eq!(rect.width, 2.0, epsilon = 1e-4);
        assert_abs_diff_eq!(rect.height, 4.0, epsilon = 1e-4);
        assert_abs_diff_eq!(rect.center().x, 2.0, epsilon = 1e-4);
        assert_abs_diff_eq!(rect.center().y, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_center_at_actor_and_put_ahead() {
        let mut ship = Actor::new(100.0, 100.0);
        ship.set_size(50.0, 50.0);
        ship.set_rotation(90.0);

        let mut laser = Actor::new(0.0, 0.0);
        laser.set_size(10.0, 4.0);
        laser.center_at_actor(&ship, None);
        assert_eq!(laser.center(), ship.center());

        ship.put_ahead(&mut laser, 30.0, None);
        assert_abs_diff_eq!(laser.center().x, 125.0, epsilon = 1e-4);
        assert_abs_diff_eq!(laser.center().y, 155.0, epsilon = 1e-4);
        assert_eq!(laser.rotation(), 90.0);
    }

    #[test]
    fn test_one_shot_animation_marks_actor_done() {
        let mut explosion = Actor::new(0.0, 0.0);
        explosion.set_animation(sheet_sequence(PlayMode::Normal));
        explosion.set_remove_when_finished(true);

        explosion.act(0.3, &bounds(), None);
        assert!(!explosion.is_done());

        explosion.act(0.2, &bounds(), None);
        assert!(explosion.is_done());
    }

    #[test]
    fn test_paused_animation_never_finishes() {
        let mut explosion = Actor::new(0.0, 0.0);
        explosion.set_animation(sheet_sequence(PlayMode::Normal));
        explosion.set_remove_when_finished(true);
        explosion.set_animation_paused(true);

        explosion.act(5.0, &bounds(), None);
        assert!(!explosion.is_done());
    }

    #[test]
    fn test_expiry_fades_then_removes() {
        let mut laser = Actor::new(0.0, 0.0);
        laser.expire_after(1.0, 0.5);

        laser.act(0.25, &bounds(), None);
        assert_eq!(laser.opacity(), 1.0);

        laser.act(0.5, &bounds(), None);
        assert_abs_diff_eq!(laser.opacity(), 0.5, epsilon = 1e-4);
        assert!(!laser.is_done());

        laser.act(0.5, &bounds(), None);
        assert_eq!(laser.opacity(), 0.0);
        assert!(laser.is_done());
    }

    #[test]
    fn test_act_integrates_kinematic_motion() {
        let mut motion = KinematicMotion::new();
        motion.set_velocity(Vec2::new(60.0, 0.0));
        let mut actor = Actor::kinematic(0.0, 0.0, motion);

        actor.act(0.5, &bounds(), None);
        assert_abs_diff_eq!(actor.x(), 30.0, epsilon = 1e-4);
    }

    #[test]
    fn test_opacity_is_clamped() {
        let mut actor = Actor::new(0.0, 0.0);
        actor.set_opacity(1.5);
        assert_eq!(actor.opacity(), 1.0);
        actor.set_opacity(-0.5);
        assert_eq!(actor.opacity(), 0.0);
    }
}
