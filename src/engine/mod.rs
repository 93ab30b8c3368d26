// Engine modules: actors, geometry, physics, animation and level plumbing

pub mod actor;
pub mod animation;
pub mod assets;
pub mod camera;
pub mod config;
pub mod game_loop;
pub mod geometry;
pub mod physics;
pub mod stage;
