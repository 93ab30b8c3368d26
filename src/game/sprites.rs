// Frame sequences for every actor in the level

use std::sync::Arc;

use crate::engine::animation::{AnimationError, FrameSequence, PlayMode};
use crate::engine::assets::TextureHandle;
use crate::engine::config::WorldConfig;

/// Shared, immutable sequences handed to actors as they spawn
#[derive(Debug, Clone)]
pub struct Sprites {
    pub space: Arc<FrameSequence>,
    pub spaceship: Arc<FrameSequence>,
    pub rock: Arc<FrameSequence>,
    pub laser: Arc<FrameSequence>,
    pub explosion: Arc<FrameSequence>,
    pub warp: Arc<FrameSequence>,
}

impl Sprites {
    /// Describe the level's textures; the backdrop matches the world size
    pub fn load(config: &WorldConfig) -> Result<Self, AnimationError> {
        let space = TextureHandle::named("space.png", config.width as u32, config.height as u32);

        Ok(Self {
            space: Arc::new(FrameSequence::single(space)),
            spaceship: Arc::new(FrameSequence::single(TextureHandle::named(
                "spaceship.png",
                100,
                100,
            ))),
            rock: Arc::new(FrameSequence::single(TextureHandle::named("rock.png", 80, 80))),
            laser: Arc::new(FrameSequence::single(TextureHandle::named("laser.png", 32, 8))),
            explosion: Arc::new(FrameSequence::from_sheet(
                TextureHandle::named("explosion.png", 576, 576),
                6,
                6,
                0.03,
                PlayMode::Normal,
            )?),
            warp: Arc::new(FrameSequence::from_sheet(
                TextureHandle::named("warp.png", 512, 256),
                4,
                8,
                0.05,
                PlayMode::Loop,
            )?),
        })
    }
}
