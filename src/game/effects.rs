// Explosions and warp flashes: animation-only actors that clean up after themselves

use glam::Vec2;

use super::sprites::Sprites;
use super::Kind;
use crate::engine::actor::{Actor, ActorId};
use crate::engine::stage::Stage;

/// Seconds a warp flash stays, the last `WARP_FADE` of them fading out
pub const WARP_LIFETIME: f32 = 1.5;
pub const WARP_FADE: f32 = 0.5;

/// One-shot explosion centered on `center`, removed when the animation ends
pub fn explosion(sprites: &Sprites, center: Vec2) -> Actor {
    let mut boom = Actor::new(0.0, 0.0);
    boom.set_animation(sprites.explosion.clone());
    boom.center_at_position(center.x, center.y, None);
    boom.set_remove_when_finished(true);
    boom
}

/// Looping warp flash centered on `center`, removed after a fade
pub fn warp(sprites: &Sprites, center: Vec2) -> Actor {
    let mut flash = Actor::new(0.0, 0.0);
    flash.set_animation(sprites.warp.clone());
    flash.center_at_position(center.x, center.y, None);
    flash.expire_after(WARP_LIFETIME, WARP_FADE);
    flash
}

pub fn spawn_explosion(stage: &mut Stage<Kind>, sprites: &Sprites, center: Vec2) -> ActorId {
    stage.add(Kind::Explosion, explosion(sprites, center))
}

pub fn spawn_warp(stage: &mut Stage<Kind>, sprites: &Sprites, center: Vec2) -> ActorId {
    stage.add(Kind::Warp, warp(sprites, center))
}
