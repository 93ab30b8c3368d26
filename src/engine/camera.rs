// Camera that follows an actor without showing anything outside the world

use glam::{Mat4, Vec2};

use crate::core::math::clamp;
use crate::engine::actor::Actor;
use crate::engine::config::WorldBounds;

/// 2D orthographic camera centered on `position`
#[derive(Debug, Clone)]
pub struct Camera {
    /// Center of the view in world space (pixels)
    position: Vec2,
    /// 1.0 = one world pixel per screen pixel, 2.0 = zoomed in 2x
    zoom: f32,
    viewport_size: Vec2,
    view_proj: Mat4,
}

impl Camera {
    pub fn new(position: Vec2, viewport_width: f32, viewport_height: f32) -> Self {
        let mut camera = Self {
            position,
            zoom: 1.0,
            viewport_size: Vec2::new(viewport_width, viewport_height),
            view_proj: Mat4::IDENTITY,
        };
        camera.update_view_proj();
        camera
    }

    /// Half the visible area in world units
    fn half_extents(&self) -> Vec2 {
        self.viewport_size / self.zoom / 2.0
    }

    fn update_view_proj(&mut self) {
        let half = self.half_extents();
        self.view_proj = Mat4::orthographic_rh(
            self.position.x - half.x,
            self.position.x + half.x,
            self.position.y - half.y,
            self.position.y + half.y,
            -100.0,
            100.0,
        );
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.update_view_proj();
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.max(0.1);
        self.update_view_proj();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport_size = Vec2::new(width, height);
        self.update_view_proj();
    }

    pub fn view_proj_matrix(&self) -> Mat4 {
        self.view_proj
    }

    /// Center on the actor, then pull back so the view stays inside `bounds`
    ///
    /// A world smaller than the view pins the view to its bottom-left corner.
    pub fn follow(&mut self, actor: &Actor, bounds: &WorldBounds) {
        let half = self.half_extents();
        let target = actor.center();
        let position = Vec2::new(
            clamp(target.x, half.x, bounds.width() - half.x),
            clamp(target.y, half.y, bounds.height() - half.y),
        );
        self.set_position(position);
    }

    /// The world-space rectangle currently in view
    pub fn viewport_bounds(&self) -> Viewport {
        let half = self.half_extents();
        Viewport {
            min: self.position - half,
            max: self.position + half,
        }
    }
}

/// Visible area in world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub min: Vec2,
    pub max: Vec2,
}

impl Viewport {
    /// True when the view lies entirely inside the world
    pub fn is_within(&self, bounds: &WorldBounds) -> bool {
        self.min.x >= 0.0
            && self.min.y >= 0.0
            && self.max.x <= bounds.width()
            && self.max.y <= bounds.height()
    }
}
