// Frame sequences and per-actor animation clocks

use glam::Vec2;
use std::sync::Arc;

use crate::engine::assets::TextureHandle;

/// Errors raised while assembling frame sequences
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum AnimationError {
    #[error("Frame sequence has no frames")]
    Empty,

    #[error("Frame duration must be positive, got {0}")]
    InvalidFrameDuration(f32),

    #[error("Sprite sheet {width}x{height} cannot be split into {rows} rows and {cols} columns")]
    InvalidSheetGrid {
        width: u32,
        height: u32,
        rows: u32,
        cols: u32,
    },
}

/// Rectangular region of a texture shown as one animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureRegion {
    pub texture: TextureHandle,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl TextureRegion {
    /// Region covering the whole texture
    pub fn whole(texture: TextureHandle) -> Self {
        Self {
            texture,
            x: 0,
            y: 0,
            width: texture.width(),
            height: texture.height(),
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// What happens once the last frame has been shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayMode {
    /// Play once and hold the last frame
    Normal,
    /// Start over from the first frame
    #[default]
    Loop,
}

/// An ordered list of frames shown for a fixed duration each
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSequence {
    frames: Vec<TextureRegion>,
    frame_duration: f32,
    mode: PlayMode,
}

impl FrameSequence {
    pub fn new(
        frames: Vec<TextureRegion>,
        frame_duration: f32,
        mode: PlayMode,
    ) -> Result<Self, AnimationError> {
        if frames.is_empty() {
            return Err(AnimationError::Empty);
        }
        if !(frame_duration > 0.0) {
            return Err(AnimationError::InvalidFrameDuration(frame_duration));
        }

        Ok(Self {
            frames,
            frame_duration,
            mode,
        })
    }

    /// One frame per texture, e.g. a list of separately stored images
    pub fn from_textures(
        textures: &[TextureHandle],
        frame_duration: f32,
        mode: PlayMode,
    ) -> Result<Self, AnimationError> {
        let frames = textures.iter().copied().map(TextureRegion::whole).collect();
        Self::new(frames, frame_duration, mode)
    }

    /// Split a sprite sheet into `rows` x `cols` equal regions, read row by row
    pub fn from_sheet(
        sheet: TextureHandle,
        rows: u32,
        cols: u32,
        frame_duration: f32,
        mode: PlayMode,
    ) -> Result<Self, AnimationError> {
        let grid_error = AnimationError::InvalidSheetGrid {
            width: sheet.width(),
            height: sheet.height(),
            rows,
            cols,
        };
        if rows == 0 || cols == 0 || sheet.width() % cols != 0 || sheet.height() % rows != 0 {
            return Err(grid_error);
        }

        let frame_width = sheet.width() / cols;
        let frame_height = sheet.height() / rows;
        if frame_width == 0 || frame_height == 0 {
            return Err(grid_error);
        }

        let frames = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| (row, col)))
            .map(|(row, col)| TextureRegion {
                texture: sheet,
                x: col * frame_width,
                y: row * frame_height,
                width: frame_width,
                height: frame_height,
            })
            .collect();

        Self::new(frames, frame_duration, mode)
    }

    /// A looping one-frame sequence showing a whole texture
    pub fn single(texture: TextureHandle) -> Self {
        Self {
            frames: vec![TextureRegion::whole(texture)],
            frame_duration: 1.0,
            mode: PlayMode::Loop,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame_duration(&self) -> f32 {
        self.frame_duration
    }

    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    /// Get the total duration of one pass through the sequence
    pub fn total_duration(&self) -> f32 {
        self.frames.len() as f32 * self.frame_duration
    }

    /// Size of the first frame, which sizes actors showing this sequence
    pub fn first_frame_size(&self) -> Vec2 {
        self.frames[0].size()
    }

    /// Index of the frame shown after `elapsed` seconds
    pub fn frame_index(&self, elapsed: f32) -> usize {
        let frame_number = (elapsed.max(0.0) / self.frame_duration) as usize;
        match self.mode {
            PlayMode::Normal => frame_number.min(self.frames.len() - 1),
            PlayMode::Loop => frame_number % self.frames.len(),
        }
    }

    /// Frame shown after `elapsed` seconds
    pub fn key_frame(&self, elapsed: f32) -> &TextureRegion {
        &self.frames[self.frame_index(elapsed)]
    }

    /// True once a non-looping sequence has run past its last frame
    pub fn is_finished(&self, elapsed: f32) -> bool {
        match self.mode {
            PlayMode::Normal => elapsed >= self.total_duration(),
            PlayMode::Loop => false,
        }
    }
}

/// Per-actor elapsed time, paused independently of every other actor
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationClock {
    elapsed: f32,
    paused: bool,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` seconds unless paused
    pub fn advance(&mut self, dt: f32) {
        if !self.paused {
            self.elapsed += dt;
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Seconds accumulated since the clock started
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

/// Current sequence plus the clock that samples it
#[derive(Debug, Clone, Default)]
pub struct Animator {
    sequence: Option<Arc<FrameSequence>>,
    clock: AnimationClock,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap the active sequence; the clock keeps running
    pub fn set_sequence(&mut self, sequence: Arc<FrameSequence>) {
        self.sequence = Some(sequence);
    }

    pub fn sequence(&self) -> Option<&Arc<FrameSequence>> {
        self.sequence.as_ref()
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut AnimationClock {
        &mut self.clock
    }

    /// Update the animation (called every frame)
    pub fn update(&mut self, dt: f32) {
        self.clock.advance(dt);
    }

    /// Frame to draw right now, if a sequence is set
    pub fn current_frame(&self) -> Option<&TextureRegion> {
        self.sequence
            .as_ref()
            .map(|sequence| sequence.key_frame(self.clock.elapsed()))
    }

    /// True when a non-looping sequence has played out; false without a sequence
    pub fn is_finished(&self) -> bool {
        self.sequence
            .as_ref()
            .is_some_and(|sequence| sequence.is_finished(self.clock.elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> TextureHandle {
        TextureHandle::named("explosion.png", 600, 600)
    }

    #[test]
    fn test_sequence_rejects_empty_frames() {
        assert_eq!(
            FrameSequence::new(Vec::new(), 0.1, PlayMode::Loop),
            Err(AnimationError::Empty)
        );
    }

    #[test]
    fn test_sequence_rejects_bad_duration() {
        let frames = vec![TextureRegion::whole(sheet())];
        assert_eq!(
            FrameSequence::new(frames, 0.0, PlayMode::Loop),
            Err(AnimationError::InvalidFrameDuration(0.0))
        );
    }

    #[test]
    fn test_sheet_split() {
        let sequence = FrameSequence::from_sheet(sheet(), 6, 6, 0.03, PlayMode::Normal)
            .expect("grid fits the sheet");
        assert_eq!(sequence.frame_count(), 36);
        assert_eq!(sequence.first_frame_size(), Vec2::new(100.0, 100.0));

        // Seventh frame starts the second row
        let region = sequence.key_frame(6.0 * 0.03 + 0.001);
        assert_eq!((region.x, region.y), (0, 100));
    }

    #[test]
    fn test_sheet_split_rejects_zero_grid() {
        assert!(matches!(
            FrameSequence::from_sheet(sheet(), 0, 4, 0.1, PlayMode::Loop),
            Err(AnimationError::InvalidSheetGrid { .. })
        ));
    }

    #[test]
    fn test_sheet_split_rejects_uneven_grid() {
        assert_eq!(
            FrameSequence::from_sheet(sheet(), 4, 7, 0.1, PlayMode::Loop),
            Err(AnimationError::InvalidSheetGrid {
                width: 600,
                height: 600,
                rows: 4,
                cols: 7,
            })
        );
        assert!(FrameSequence::from_sheet(sheet(), 7, 4, 0.1, PlayMode::Loop).is_err());
    }

    #[test]
    fn test_normal_mode_holds_last_frame_and_finishes() {
        let sequence = FrameSequence::from_sheet(sheet(), 1, 3, 0.1, PlayMode::Normal)
            .expect("grid fits the sheet");
        assert_eq!(sequence.frame_index(0.15), 1);
        assert_eq!(sequence.frame_index(5.0), 2);
        assert!(!sequence.is_finished(0.25));
        assert!(sequence.is_finished(0.31));
    }

    #[test]
    fn test_looping_never_finishes() {
        let sequence = FrameSequence::from_sheet(sheet(), 1, 3, 0.1, PlayMode::Loop)
            .expect("grid fits the sheet");
        assert_eq!(sequence.frame_index(0.35), 0);
        assert!(!sequence.is_finished(100.0));
    }

    #[test]
    fn test_clock_pause() {
        let mut clock = AnimationClock::new();
        clock.advance(0.5);
        clock.set_paused(true);
        clock.advance(1.0);
        assert_eq!(clock.elapsed(), 0.5);

        clock.set_paused(false);
        clock.advance(0.25);
        assert_eq!(clock.elapsed(), 0.75);
    }

    #[test]
    fn test_animator_without_sequence() {
        let mut animator = Animator::new();
        animator.update(10.0);
        assert!(animator.current_frame().is_none());
        assert!(!animator.is_finished());
    }

    #[test]
    fn test_animator_finishes_one_shot() {
        let mut animator = Animator::new();
        let sequence = FrameSequence::from_sheet(sheet(), 1, 2, 0.5, PlayMode::Normal)
            .expect("grid fits the sheet");
        animator.set_sequence(Arc::new(sequence));

        animator.update(0.6);
        assert_eq!(animator.current_frame().map(|f| f.x), Some(300));
        assert!(!animator.is_finished());

        animator.update(0.5);
        assert!(animator.is_finished());
    }
}
