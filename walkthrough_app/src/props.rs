//! Scene props driven by small behavior objects

use game3d::events::{Event, EventKind};
use game3d::foundation::math::{Axis, Vec3};
use game3d::foundation::Angle;
use game3d::scene::{AnimationClip, NodeAccess, Object, TransformSpace};
use log::debug;
use std::cell::RefCell;
use std::rc::Rc;

/// Spins its node about one axis
pub struct Roller {
    axis: Axis,
    degrees_per_second: f64,
}

impl Roller {
    /// Spin about `axis` at a constant rate
    pub fn new(axis: Axis, degrees_per_second: f64) -> Self {
        Self { axis, degrees_per_second }
    }
}

impl Object for Roller {
    fn on_event(&mut self, node: &mut NodeAccess<'_>, event: &Event<'_>) {
        if event.kind() != EventKind::FrameRendering {
            return;
        }
        let step = self.degrees_per_second * f64::from(event.elapsed_seconds());
        node.transform_mut().rotate(self.axis, Angle::from_degrees(step));
    }
}

/// Moves its node back and forth along a line
pub struct Drifter {
    velocity: Vec3,
    travelled: f32,
    range: f32,
}

impl Drifter {
    /// Travel `range` units at `velocity` before turning around
    pub fn new(velocity: Vec3, range: f32) -> Self {
        Self {
            velocity,
            travelled: 0.0,
            range,
        }
    }
}

impl Object for Drifter {
    fn on_event(&mut self, node: &mut NodeAccess<'_>, event: &Event<'_>) {
        if event.kind() != EventKind::FrameRendering {
            return;
        }
        let delta = self.velocity * event.elapsed_seconds();
        node.transform_mut().translate(delta, TransformSpace::Parent);

        self.travelled += delta.norm();
        if self.travelled >= self.range {
            self.travelled = 0.0;
            self.velocity = -self.velocity;
            debug!("Node '{}' turned around", node.name());
        }
    }
}

/// Plays a looping animation clip
pub struct Animator {
    clip: Box<dyn AnimationClip>,
}

impl Animator {
    /// Enable `clip` and loop it
    pub fn new(mut clip: Box<dyn AnimationClip>) -> Self {
        clip.set_looping(true);
        clip.set_enabled(true);
        Self { clip }
    }
}

impl Object for Animator {
    fn on_event(&mut self, _node: &mut NodeAccess<'_>, event: &Event<'_>) {
        if event.kind() == EventKind::FrameRendering {
            self.clip.add_time(event.elapsed_seconds());
        }
    }
}

/// Object shared with the application loop, which reads it between frames
pub struct Shared<T>(pub Rc<RefCell<T>>);

impl<T: Object> Object for Shared<T> {
    fn on_event(&mut self, node: &mut NodeAccess<'_>, event: &Event<'_>) {
        self.0.borrow_mut().on_event(node, event);
    }
}
