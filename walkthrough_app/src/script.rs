//! Scripted input standing in for a human at the keyboard

use game3d::input::{InputManager, KeyCode};

/// A single scripted device event
#[derive(Debug, Clone, Copy)]
pub enum Action {
    /// Key goes down
    Press(KeyCode),
    /// Key comes up
    Release(KeyCode),
    /// Relative mouse motion
    Look { dx: f64, dy: f64 },
}

/// Time-ordered list of actions
pub struct InputScript {
    steps: Vec<(f32, Action)>,
    next: usize,
}

impl InputScript {
    /// Walk forward, look around, strafe, back up, then quit
    pub fn walkthrough() -> Self {
        use Action::{Look, Press, Release};
        let steps = vec![
            (0.0, Press(KeyCode::W)),
            (1.0, Look { dx: -60.0, dy: 0.0 }),
            (1.5, Look { dx: 0.0, dy: -40.0 }),
            (2.5, Release(KeyCode::W)),
            (3.0, Press(KeyCode::D)),
            (3.5, Look { dx: 0.0, dy: 400.0 }),
            (4.0, Release(KeyCode::D)),
            (4.5, Press(KeyCode::S)),
            (5.5, Release(KeyCode::S)),
            (7.0, Press(KeyCode::Escape)),
        ];
        Self { steps, next: 0 }
    }

    /// Feed every action due by `time` into `input`
    pub fn apply_until(&mut self, time: f32, input: &mut InputManager) {
        while let Some(&(at, action)) = self.steps.get(self.next) {
            if at > time {
                break;
            }
            match action {
                Action::Press(key) => input.handle_key_input(key, true),
                Action::Release(key) => input.handle_key_input(key, false),
                Action::Look { dx, dy } => input.handle_mouse_motion(dx, dy),
            }
            self.next += 1;
        }
    }

    /// Whether every action has been fed
    pub fn is_finished(&self) -> bool {
        self.next >= self.steps.len()
    }
}
