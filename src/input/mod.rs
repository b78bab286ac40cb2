//! Keyboard input
//!
//! Input systems read the keyboard through a `KeyboardSnapshot`: the set of
//! keys held at one instant. Edge detection ("just pressed") compares the
//! current snapshot with the one the system stored last frame, so each
//! system owns its own history and the logic can be driven from tests
//! without a window.

mod camera;
mod player;
mod tile_debug;

pub use camera::{pan_direction, CameraInputSystem};
pub use player::{movement_direction, PlayerInputSystem};
pub use tile_debug::TileLayerDebugInputSystem;

use macroquad::input::{is_key_down, KeyCode};

/// Keys held down at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyboardSnapshot {
    down: Vec<KeyCode>,
}

impl KeyboardSnapshot {
    /// Empty snapshot (nothing held).
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot built from an explicit key list.
    pub fn from_keys(keys: &[KeyCode]) -> Self {
        Self { down: keys.to_vec() }
    }

    /// Poll macroquad for which of `tracked` are currently held.
    pub fn capture(tracked: &[KeyCode]) -> Self {
        Self {
            down: tracked.iter().copied().filter(|&k| is_key_down(k)).collect(),
        }
    }

    pub fn is_down(&self, key: KeyCode) -> bool {
        self.down.contains(&key)
    }

    /// Held now but not in `previous`.
    pub fn just_pressed(&self, previous: &KeyboardSnapshot, key: KeyCode) -> bool {
        self.is_down(key) && !previous.is_down(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_just_pressed_needs_a_fresh_press() {
        let before = KeyboardSnapshot::from_keys(&[KeyCode::A]);
        let now = KeyboardSnapshot::from_keys(&[KeyCode::A, KeyCode::Y]);

        assert!(now.just_pressed(&before, KeyCode::Y));
        assert!(!now.just_pressed(&before, KeyCode::A));
        assert!(!now.just_pressed(&before, KeyCode::B));
        assert!(!KeyboardSnapshot::new().is_down(KeyCode::A));
    }
}
