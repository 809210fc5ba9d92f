//! Input management system
//!
//! The native input library is polled by the application and fed into an
//! [`InputManager`]. Once per frame the manager is captured into an immutable
//! [`InputState`] which every event of that frame borrows.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Read-only view of keyboard and mouse state for one frame
pub trait InputSnapshot {
    /// Whether `key` is held down
    fn is_key_down(&self, key: KeyCode) -> bool;

    /// Whether `button` is held down
    fn is_button_down(&self, button: MouseButton) -> bool;

    /// Relative mouse motion `(dx, dy)` since the previous capture
    fn mouse_relative(&self) -> (f32, f32);
}

/// A key going down or coming up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTransition {
    /// The key
    pub key: KeyCode,
    /// `true` when pressed, `false` when released
    pub pressed: bool,
}

/// Captured keyboard/mouse state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    mouse_delta: (f32, f32),
    mouse_position: Option<(f64, f64)>,
}

impl InputState {
    /// State with nothing pressed and no motion
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: mark a key as held
    pub fn with_key(mut self, key: KeyCode) -> Self {
        self.keys_down.insert(key);
        self
    }

    /// Builder pattern: mark a mouse button as held
    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.buttons_down.insert(button);
        self
    }

    /// Builder pattern: set relative mouse motion
    pub fn with_mouse_delta(mut self, dx: f32, dy: f32) -> Self {
        self.mouse_delta = (dx, dy);
        self
    }

    /// Last absolute cursor position, if the cursor has moved at all
    pub fn mouse_position(&self) -> Option<(f64, f64)> {
        self.mouse_position
    }

    /// Keys currently held
    pub fn keys_down(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys_down.iter().copied()
    }
}

impl InputSnapshot for InputState {
    fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    fn mouse_relative(&self) -> (f32, f32) {
        self.mouse_delta
    }
}

/// Input manager
///
/// Accumulates raw device events between frames.
#[derive(Debug, Default)]
pub struct InputManager {
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    pending_delta: (f64, f64),
    last_position: Option<(f64, f64)>,
    transitions: Vec<KeyTransition>,
}

impl InputManager {
    /// Create a new input manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle key input
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        let changed = if pressed {
            self.keys_down.insert(key)
        } else {
            self.keys_down.remove(&key)
        };

        // Auto-repeat does not produce a transition
        if changed {
            self.transitions.push(KeyTransition { key, pressed });
        }
    }

    /// Handle mouse button input
    pub fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            self.buttons_down.insert(button);
        } else {
            self.buttons_down.remove(&button);
        }
    }

    /// Handle an absolute cursor position
    ///
    /// The first position only establishes a reference point.
    pub fn handle_mouse_move(&mut self, x: f64, y: f64) {
        if let Some((last_x, last_y)) = self.last_position {
            self.pending_delta.0 += x - last_x;
            self.pending_delta.1 += y - last_y;
        }
        self.last_position = Some((x, y));
    }

    /// Handle raw relative motion (e.g. a locked cursor)
    pub fn handle_mouse_motion(&mut self, dx: f64, dy: f64) {
        self.pending_delta.0 += dx;
        self.pending_delta.1 += dy;
    }

    /// Snapshot the current state and reset the relative motion accumulator
    pub fn capture(&mut self) -> InputState {
        let (dx, dy) = std::mem::take(&mut self.pending_delta);
        InputState {
            keys_down: self.keys_down.clone(),
            buttons_down: self.buttons_down.clone(),
            mouse_delta: (dx as f32, dy as f32),
            mouse_position: self.last_position,
        }
    }

    /// Key transitions recorded since the last drain, oldest first
    pub fn drain_key_transitions(&mut self) -> Vec<KeyTransition> {
        std::mem::take(&mut self.transitions)
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_resets_relative_motion() {
        let mut input = InputManager::new();
        input.handle_mouse_move(100.0, 100.0);
        input.handle_mouse_move(110.0, 95.0);
        input.handle_mouse_motion(2.0, 0.0);

        let first = input.capture();
        assert_eq!(first.mouse_relative(), (12.0, -5.0));
        assert_eq!(first.mouse_position(), Some((110.0, 95.0)));

        let second = input.capture();
        assert_eq!(second.mouse_relative(), (0.0, 0.0));
    }

    #[test]
    fn test_key_state_and_transitions() {
        let mut input = InputManager::new();
        input.handle_key_input(KeyCode::W, true);
        input.handle_key_input(KeyCode::W, true);
        input.handle_key_input(KeyCode::A, true);
        input.handle_key_input(KeyCode::W, false);

        let state = input.capture();
        assert!(!state.is_key_down(KeyCode::W));
        assert!(state.is_key_down(KeyCode::A));

        let transitions = input.drain_key_transitions();
        assert_eq!(
            transitions,
            vec![
                KeyTransition { key: KeyCode::W, pressed: true },
                KeyTransition { key: KeyCode::A, pressed: true },
                KeyTransition { key: KeyCode::W, pressed: false },
            ]
        );
        assert!(input.drain_key_transitions().is_empty());
    }

    #[test]
    fn test_mouse_buttons() {
        let mut input = InputManager::new();
        input.handle_mouse_button(MouseButton::Left, true);
        assert!(input.capture().is_button_down(MouseButton::Left));
        input.handle_mouse_button(MouseButton::Left, false);
        assert!(!input.capture().is_button_down(MouseButton::Left));
    }
}
