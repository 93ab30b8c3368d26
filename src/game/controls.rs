// Ship controls, fed by whatever front end drives the level

use std::collections::HashSet;

/// Every input the ship responds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Thrust,
    RotateLeft,
    RotateRight,
    StrafeLeft,
    StrafeRight,
    Shoot,
    Warp,
}

/// Pressed/held state of the ship's actions for the current frame
#[derive(Debug, Default, Clone)]
pub struct Controls {
    /// Actions currently held down
    pressed: HashSet<Action>,

    /// Actions pressed since the last frame
    just_pressed: HashSet<Action>,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an action press
    pub fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release
    pub fn release(&mut self, action: Action) {
        self.pressed.remove(&action);
    }

    /// Press and immediately release, e.g. a single shot
    pub fn tap(&mut self, action: Action) {
        self.press(action);
        self.release(action);
    }

    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Turn input: +1 counter-clockwise, -1 clockwise, 0 both or neither
    pub fn rotation(&self) -> f32 {
        let mut rotation = 0.0;
        if self.is_pressed(Action::RotateLeft) {
            rotation += 1.0;
        }
        if self.is_pressed(Action::RotateRight) {
            rotation -= 1.0;
        }
        rotation
    }

    /// Clear one-frame state; call once per frame after the level has updated
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }

    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_is_just_pressed_once() {
        let mut controls = Controls::new();
        controls.press(Action::Thrust);
        assert!(controls.is_pressed(Action::Thrust));
        assert!(controls.just_pressed(Action::Thrust));

        controls.end_frame();
        controls.press(Action::Thrust);
        assert!(controls.is_pressed(Action::Thrust));
        assert!(!controls.just_pressed(Action::Thrust));
    }

    #[test]
    fn test_tap_registers_for_one_frame() {
        let mut controls = Controls::new();
        controls.tap(Action::Shoot);
        assert!(controls.just_pressed(Action::Shoot));
        assert!(!controls.is_pressed(Action::Shoot));

        controls.end_frame();
        assert!(!controls.just_pressed(Action::Shoot));
    }

    #[test]
    fn test_rotation_axis() {
        let mut controls = Controls::new();
        assert_eq!(controls.rotation(), 0.0);

        controls.press(Action::RotateLeft);
        assert_eq!(controls.rotation(), 1.0);

        controls.press(Action::RotateRight);
        assert_eq!(controls.rotation(), 0.0);

        controls.reset();
        controls.press(Action::RotateRight);
        assert_eq!(controls.rotation(), -1.0);
    }
}
