//! Actor physics and collision core for a 2D space shooter
//!
//! `engine` holds the reusable pieces (actors, geometry, physics, stage),
//! `game` a headless "space rocks" level built from them.

pub mod core;
pub mod engine;
pub mod game;
