/// Fixed-timestep frame pacing
///
/// Wall-clock time is accumulated and paid out in whole simulation steps, so
/// actors and the physics world always advance by the same `dt`.
use std::time::{Duration, Instant};

use crate::engine::config::WorldConfig;

/// Maximum number of simulation steps per frame to prevent a spiral of death
pub const MAX_STEPS_PER_FRAME: u32 = 5;

/// Game loop timing state
pub struct GameLoop {
    /// Accumulated time not yet spent on steps
    accumulator: Duration,

    /// Length of one simulation step
    timestep: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    paused: bool,

    frame_count: u64,

    /// Total steps handed out
    update_count: u64,
}

impl GameLoop {
    /// Loop stepping at `timestep` seconds
    pub fn new(timestep: f32) -> Self {
        Self {
            accumulator: Duration::ZERO,
            timestep: Duration::from_secs_f32(timestep),
            last_frame_time: Instant::now(),
            paused: false,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Loop stepping at the level's configured rate
    pub fn from_config(config: &WorldConfig) -> Self {
        Self::new(config.timestep)
    }

    /// Begin a new frame from the wall clock, returns the number of steps to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.advance(frame_time)
    }

    /// Account for `frame_time` of elapsed time, returns the number of steps to run
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;

        // Paused time is dropped, not banked
        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut steps = 0;
        while self.accumulator >= self.timestep && steps < MAX_STEPS_PER_FRAME {
            self.accumulator -= self.timestep;
            steps += 1;
        }

        // Anything beyond the cap is skipped rather than replayed next frame
        if steps == MAX_STEPS_PER_FRAME && self.accumulator >= self.timestep {
            log::debug!("Frame took too long, dropping {:?}", self.accumulator);
            self.accumulator = Duration::ZERO;
        }

        self.update_count += steps as u64;
        steps
    }

    /// Step length in seconds
    pub fn fixed_timestep(&self) -> f32 {
        self.timestep.as_secs_f32()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = Duration::ZERO;
            log::info!("Game resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::from_config(&WorldConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn millis(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn test_game_loop_creation() {
        let game_loop = GameLoop::default();
        assert_eq!(game_loop.frame_count(), 0);
        assert_eq!(game_loop.update_count(), 0);
        assert!(!game_loop.is_paused());
        assert!((game_loop.fixed_timestep() - 1.0 / 60.0).abs() < 0.0001);
    }

    #[test]
    fn test_advance_pays_out_whole_steps() {
        let mut game_loop = GameLoop::new(0.01);
        assert_eq!(game_loop.advance(millis(25)), 2);

        assert_eq!(game_loop.advance(millis(5)), 1);
        assert_eq!(game_loop.update_count(), 3);
        assert_eq!(game_loop.frame_count(), 2);
    }

    #[test]
    fn test_max_steps_limit() {
        let mut game_loop = GameLoop::new(0.01);
        assert_eq!(game_loop.advance(millis(300)), MAX_STEPS_PER_FRAME);

        // The backlog was dropped
        assert_eq!(game_loop.advance(millis(0)), 0);
    }

    #[test]
    fn test_paused_no_updates() {
        let mut game_loop = GameLoop::new(0.01);
        game_loop.pause();
        assert_eq!(game_loop.advance(millis(50)), 0);

        game_loop.resume();
        assert_eq!(game_loop.advance(millis(10)), 1);
    }

    #[test]
    fn test_toggle_pause() {
        let mut game_loop = GameLoop::default();
        game_loop.toggle_pause();
        assert!(game_loop.is_paused());
        game_loop.toggle_pause();
        assert!(!game_loop.is_paused());
    }

    #[test]
    fn test_begin_frame_counts_frames() {
        let mut game_loop = GameLoop::default();
        game_loop.begin_frame();
        game_loop.begin_frame();
        assert_eq!(game_loop.frame_count(), 2);
        assert!(game_loop.update_count() <= 2 * MAX_STEPS_PER_FRAME as u64);
    }
}
