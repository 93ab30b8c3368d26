// Space rocks: a small shooter level built on the engine's actors

pub mod controls;
pub mod effects;
pub mod level;
pub mod profiles;
pub mod rock;
pub mod spaceship;
pub mod sprites;

pub use controls::{Action, Controls};
pub use level::{Level, LevelError, Outcome};
pub use spaceship::Spaceship;
pub use sprites::Sprites;

/// What an actor on the level's stage is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Background,
    Spaceship,
    Rock,
    Laser,
    Explosion,
    Warp,
}
