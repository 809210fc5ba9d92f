//! Frame timing utilities

use crate::events::FrameTiming;
use std::time::Instant;

/// Source of elapsed time for each frame
#[derive(Debug, Clone, Copy)]
enum ClockMode {
    RealTime { last_frame: Instant },
    Fixed { step: f32 },
}

/// Produces a [`FrameTiming`] per rendered frame
///
/// Real-time clocks measure wall time between ticks; fixed-step clocks advance
/// by a constant step, which keeps scripted runs and tests deterministic.
#[derive(Debug, Clone)]
pub struct FrameClock {
    mode: ClockMode,
    total_time: f32,
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a wall-clock timer
    pub fn new() -> Self {
        Self {
            mode: ClockMode::RealTime { last_frame: Instant::now() },
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Create a clock that advances by `step` seconds per tick
    pub fn fixed(step: f32) -> Self {
        Self {
            mode: ClockMode::Fixed { step },
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance one frame
    pub fn tick(&mut self) -> FrameTiming {
        let elapsed = match &mut self.mode {
            ClockMode::RealTime { last_frame } => {
                let now = Instant::now();
                let elapsed = now.duration_since(*last_frame).as_secs_f32();
                *last_frame = now;
                elapsed
            }
            ClockMode::Fixed { step } => *step,
        };
        self.total_time += elapsed;
        self.frame_count += 1;
        FrameTiming::new(elapsed, self.total_time)
    }

    /// Total elapsed time since creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of ticks so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average FPS since creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fixed_clock_accumulates() {
        let mut clock = FrameClock::fixed(0.25);
        let first = clock.tick();
        let second = clock.tick();

        assert_relative_eq!(first.elapsed_seconds, 0.25);
        assert_relative_eq!(second.total_seconds, 0.5);
        assert_eq!(clock.frame_count(), 2);
        assert_relative_eq!(clock.average_fps(), 4.0);
    }

    #[test]
    fn test_real_time_clock_is_monotonic() {
        let mut clock = FrameClock::new();
        let timing = clock.tick();
        assert!(timing.elapsed_seconds >= 0.0);
        assert!(clock.total_time() >= 0.0);
    }
}
