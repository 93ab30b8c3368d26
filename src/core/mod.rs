// Core helpers shared by the engine and the game layer

pub mod math;
