//! Frame-scoped events
//!
//! One [`Event`] is built per frame phase and handed down the node tree. It
//! borrows the frame's input snapshot, so it cannot outlive the dispatch pass.

use crate::input::{InputSnapshot, KeyCode};
use std::fmt;

/// What happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A frame is about to be rendered
    FrameStart,
    /// The frame has been queued for rendering
    FrameRendering,
    /// The frame has been presented
    FrameEnd,
    /// A key went down
    KeyPressed(KeyCode),
    /// A key came up
    KeyReleased(KeyCode),
}

/// Timing of the current frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTiming {
    /// Seconds since the previous frame
    pub elapsed_seconds: f32,
    /// Seconds since the frame source started
    pub total_seconds: f32,
}

impl FrameTiming {
    /// Create frame timing
    pub const fn new(elapsed_seconds: f32, total_seconds: f32) -> Self {
        Self { elapsed_seconds, total_seconds }
    }
}

/// Immutable per-phase event
#[derive(Clone, Copy)]
pub struct Event<'a> {
    kind: EventKind,
    timing: FrameTiming,
    input: &'a dyn InputSnapshot,
}

impl<'a> Event<'a> {
    /// Create an event borrowing the frame's input snapshot
    pub fn new(kind: EventKind, timing: FrameTiming, input: &'a dyn InputSnapshot) -> Self {
        Self { kind, timing, input }
    }

    /// Event kind
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Frame timing
    pub fn timing(&self) -> FrameTiming {
        self.timing
    }

    /// Seconds since the previous frame
    pub fn elapsed_seconds(&self) -> f32 {
        self.timing.elapsed_seconds
    }

    /// Keyboard/mouse state for this frame
    pub fn input(&self) -> &'a dyn InputSnapshot {
        self.input
    }
}

impl fmt::Debug for Event<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("kind", &self.kind)
            .field("timing", &self.timing)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputState;

    #[test]
    fn test_event_exposes_frame_data() {
        let input = InputState::new().with_key(KeyCode::W).with_mouse_delta(3.0, -1.0);
        let event = Event::new(EventKind::FrameRendering, FrameTiming::new(0.5, 2.0), &input);

        assert_eq!(event.kind(), EventKind::FrameRendering);
        assert_eq!(event.elapsed_seconds(), 0.5);
        assert_eq!(event.timing().total_seconds, 2.0);
        assert!(event.input().is_key_down(KeyCode::W));
        assert_eq!(event.input().mouse_relative(), (3.0, -1.0));
    }
}
