use std::time::Duration;

use anyhow::Result;
use log::info;

use space_rocks::engine::config::WorldConfig;
use space_rocks::engine::game_loop::GameLoop;
use space_rocks::game::{Action, Controls, Level, Outcome};

/// Frames to simulate before calling it a draw
const MAX_FRAMES: u64 = 60 * 60;

/// Scripted pilot: what to hold and tap on a given frame
fn script(frame: u64, controls: &mut Controls) {
    // Turn for a second and a half, then thrust for half a second
    match frame % 240 {
        0 => controls.press(Action::RotateLeft),
        90 => {
            controls.release(Action::RotateLeft);
            controls.press(Action::Thrust);
        }
        120 => controls.release(Action::Thrust),
        _ => {}
    }
    if frame % 15 == 0 {
        controls.tap(Action::Shoot);
    }
    if frame == 600 {
        controls.tap(Action::Warp);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Space Rocks (headless)...");

    let config = WorldConfig::default();
    let mut level = Level::new(config, 2024)?;
    let mut game_loop = GameLoop::from_config(&config);
    let mut controls = Controls::new();
    let frame_time = Duration::from_secs_f32(config.timestep);
    let dt = game_loop.fixed_timestep();

    let mut outcome = Outcome::Playing;
    for frame in 0..MAX_FRAMES {
        script(frame, &mut controls);
        for _ in 0..game_loop.advance(frame_time) {
            outcome = level.update(dt, &controls)?;
            controls.end_frame();
        }
        if outcome != Outcome::Playing {
            break;
        }
    }

    info!(
        "Finished after {:.1}s: {:?}, {} rocks left, shield {}",
        level.elapsed(),
        outcome,
        level.rock_count(),
        level.shield_power()
    );
    Ok(())
}
