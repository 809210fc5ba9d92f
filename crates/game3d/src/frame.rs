//! Frame driver
//!
//! Turns one tick of the application loop into the ordered event phases the
//! world sees: key transitions, then frame start, then rendering and frame
//! end unless a quit key is held.

use crate::config::ConfigError;
use crate::events::{Event, EventKind, FrameTiming};
use crate::foundation::time::FrameClock;
use crate::input::{InputManager, InputSnapshot, KeyCode};
use crate::scene::World;
use log::{info, trace};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Frame loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Frame rate cap for real-time loops
    pub max_fps: u32,
    /// Constant step in seconds; real time when unset
    pub fixed_timestep: Option<f32>,
    /// Keys that end the loop
    pub quit_keys: Vec<KeyCode>,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_fps: 30,
            fixed_timestep: None,
            quit_keys: vec![KeyCode::Escape, KeyCode::Q],
        }
    }
}

impl FrameConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_fps == 0 {
            return Err(ConfigError::Invalid("frame max_fps must be positive".to_string()));
        }
        if let Some(step) = self.fixed_timestep {
            if !(step > 0.0 && step.is_finite()) {
                return Err(ConfigError::Invalid(format!(
                    "frame fixed_timestep must be positive, got {step}"
                )));
            }
        }
        Ok(())
    }

    /// Minimum wall time per frame
    pub fn frame_budget(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.max_fps.max(1)))
    }

    /// Clock matching the configured timestep
    pub fn clock(&self) -> FrameClock {
        self.fixed_timestep.map_or_else(FrameClock::new, FrameClock::fixed)
    }
}

/// Result of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Keep looping
    Continue,
    /// A quit key was held
    Quit,
}

/// Dispatches one frame's events through a [`World`]
#[derive(Debug)]
pub struct FrameDriver {
    input: InputManager,
    quit_keys: Vec<KeyCode>,
    frames: u64,
}

impl FrameDriver {
    /// Create a driver with an idle input manager
    pub fn new(config: &FrameConfig) -> Self {
        Self {
            input: InputManager::new(),
            quit_keys: config.quit_keys.clone(),
            frames: 0,
        }
    }

    /// Input manager to feed device events into between frames
    pub fn input_mut(&mut self) -> &mut InputManager {
        &mut self.input
    }

    /// Number of frames that reached rendering
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Run every phase of one frame
    pub fn run_frame(&mut self, world: &mut World, timing: FrameTiming) -> FrameOutcome {
        let snapshot = self.input.capture();

        for transition in self.input.drain_key_transitions() {
            let kind = if transition.pressed {
                EventKind::KeyPressed(transition.key)
            } else {
                EventKind::KeyReleased(transition.key)
            };
            world.on_event(&Event::new(kind, timing, &snapshot));
        }

        world.on_event(&Event::new(EventKind::FrameStart, timing, &snapshot));

        if let Some(key) = self.quit_keys.iter().find(|key| snapshot.is_key_down(**key)) {
            info!("Quit requested with {key:?} after {} frames", self.frames);
            return FrameOutcome::Quit;
        }

        world.on_event(&Event::new(EventKind::FrameRendering, timing, &snapshot));
        world.on_event(&Event::new(EventKind::FrameEnd, timing, &snapshot));

        self.frames += 1;
        trace!("Frame {} done in {:.4}s", self.frames, timing.elapsed_seconds);
        FrameOutcome::Continue
    }
}
