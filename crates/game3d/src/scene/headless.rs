//! In-memory scene backend
//!
//! Implements the scene-engine traits without any rendering. Used by the demo
//! application and as the engine double in tests: [`SceneStats`] records every
//! transform created and released, in order.

use super::{AnimationClip, Renderable, SceneManager, SceneTransform, TransformId, Viewpoint};
use crate::foundation::math::{Quat, Vec3};
use log::trace;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// Default length of clips that were not registered
const DEFAULT_CLIP_LENGTH: f32 = 1.0;

/// Bookkeeping shared by a headless scene and all of its transforms
#[derive(Debug, Default)]
pub struct SceneStats {
    next_id: Cell<u64>,
    created: Cell<usize>,
    destroyed: Cell<usize>,
    parents: RefCell<HashMap<TransformId, TransformId>>,
    destruction_order: RefCell<Vec<TransformId>>,
    renderables: RefCell<HashMap<TransformId, Vec<Renderable>>>,
    viewpoints: RefCell<HashMap<String, TransformId>>,
}

impl SceneStats {
    fn allocate(&self, parent: Option<TransformId>) -> TransformId {
        let id = TransformId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.created.set(self.created.get() + 1);
        if let Some(parent) = parent {
            self.parents.borrow_mut().insert(id, parent);
        }
        trace!("Headless transform {id} created");
        id
    }

    fn release(&self, id: TransformId) {
        self.destroyed.set(self.destroyed.get() + 1);
        self.destruction_order.borrow_mut().push(id);
        trace!("Headless transform {id} released");
    }

    /// Transforms handed out so far
    pub fn created(&self) -> usize {
        self.created.get()
    }

    /// Transforms released so far
    pub fn destroyed(&self) -> usize {
        self.destroyed.get()
    }

    /// Transforms currently held by the logic layer
    pub fn live_transforms(&self) -> usize {
        self.created.get() - self.destroyed.get()
    }

    /// Release order of every transform released so far
    pub fn destruction_order(&self) -> Vec<TransformId> {
        self.destruction_order.borrow().clone()
    }

    /// Parent a transform was created under; `None` for engine-root children
    pub fn parent_of(&self, id: TransformId) -> Option<TransformId> {
        self.parents.borrow().get(&id).copied()
    }

    /// Renderables attached to a transform
    pub fn renderables(&self, id: TransformId) -> Vec<Renderable> {
        self.renderables.borrow().get(&id).cloned().unwrap_or_default()
    }

    /// Transform a named viewpoint is attached to
    pub fn viewpoint_parent(&self, name: &str) -> Option<TransformId> {
        self.viewpoints.borrow().get(name).copied()
    }
}

/// Headless scene manager
#[derive(Debug, Default)]
pub struct HeadlessScene {
    stats: Rc<SceneStats>,
    clip_lengths: HashMap<String, f32>,
}

impl HeadlessScene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: register the length of an animation clip
    pub fn with_clip(mut self, clip: impl Into<String>, length: f32) -> Self {
        self.clip_lengths.insert(clip.into(), length);
        self
    }

    /// Shared bookkeeping, still readable after the scene is boxed
    pub fn stats(&self) -> Rc<SceneStats> {
        Rc::clone(&self.stats)
    }
}

impl SceneManager for HeadlessScene {
    fn create_root_child(&mut self) -> Box<dyn SceneTransform> {
        Box::new(HeadlessTransform::new(None, Rc::clone(&self.stats)))
    }

    fn create_viewpoint(&mut self, name: &str) -> Box<dyn Viewpoint> {
        Box::new(HeadlessViewpoint::new(name))
    }

    fn create_animation(&mut self, clip: &str) -> Box<dyn AnimationClip> {
        let length = self.clip_lengths.get(clip).copied().unwrap_or(DEFAULT_CLIP_LENGTH);
        Box::new(HeadlessAnimation::new(clip, length))
    }
}

/// Headless transform
#[derive(Debug)]
pub struct HeadlessTransform {
    id: TransformId,
    position: Vec3,
    orientation: Quat,
    scale: Vec3,
    stats: Rc<SceneStats>,
}

impl HeadlessTransform {
    fn new(parent: Option<TransformId>, stats: Rc<SceneStats>) -> Self {
        Self {
            id: stats.allocate(parent),
            position: Vec3::zeros(),
            orientation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            stats,
        }
    }

    /// Scale factors
    pub fn scale(&self) -> Vec3 {
        self.scale
    }
}

impl SceneTransform for HeadlessTransform {
    fn id(&self) -> TransformId {
        self.id
    }

    fn create_child(&mut self) -> Box<dyn SceneTransform> {
        Box::new(Self::new(Some(self.id), Rc::clone(&self.stats)))
    }

    fn attach_renderable(&mut self, renderable: Renderable) {
        self.stats
            .renderables
            .borrow_mut()
            .entry(self.id)
            .or_default()
            .push(renderable);
    }

    fn attach_viewpoint(&mut self, viewpoint: &dyn Viewpoint) {
        self.stats
            .viewpoints
            .borrow_mut()
            .insert(viewpoint.name().to_string(), self.id);
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn orientation(&self) -> Quat {
        self.orientation
    }

    fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation;
    }

    fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
    }
}

impl Drop for HeadlessTransform {
    fn drop(&mut self) {
        self.stats.release(self.id);
    }
}

/// Headless viewpoint
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessViewpoint {
    name: String,
    target: Option<Vec3>,
    near_clip: f32,
    far_clip: f32,
    aspect_ratio: f32,
}

impl HeadlessViewpoint {
    /// Create a viewpoint with engine defaults
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: None,
            near_clip: 0.1,
            far_clip: 1000.0,
            aspect_ratio: 4.0 / 3.0,
        }
    }

    /// Last look-at target
    pub fn target(&self) -> Option<Vec3> {
        self.target
    }
}

impl Viewpoint for HeadlessViewpoint {
    fn name(&self) -> &str {
        &self.name
    }

    fn look_at(&mut self, target: Vec3) {
        self.target = Some(target);
    }

    fn near_clip(&self) -> f32 {
        self.near_clip
    }

    fn set_near_clip(&mut self, distance: f32) {
        self.near_clip = distance;
    }

    fn far_clip(&self) -> f32 {
        self.far_clip
    }

    fn set_far_clip(&mut self, distance: f32) {
        self.far_clip = distance;
    }

    fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    fn set_aspect_ratio(&mut self, ratio: f32) {
        self.aspect_ratio = ratio;
    }
}

/// Headless animation clip
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessAnimation {
    name: String,
    length: f32,
    time: f32,
    enabled: bool,
    looping: bool,
}

impl HeadlessAnimation {
    /// Create a disabled, non-looping clip of `length` seconds
    pub fn new(name: impl Into<String>, length: f32) -> Self {
        Self {
            name: name.into(),
            length,
            time: 0.0,
            enabled: false,
            looping: false,
        }
    }
}

impl AnimationClip for HeadlessAnimation {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn add_time(&mut self, seconds: f32) {
        if !self.enabled {
            return;
        }
        self.time += seconds;
        if self.looping && self.length > 0.0 {
            self.time = self.time.rem_euclid(self.length);
        } else {
            self.time = self.time.min(self.length);
        }
    }

    fn time_position(&self) -> f32 {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Axis;
    use crate::foundation::Angle;
    use crate::scene::TransformSpace;
    use approx::assert_relative_eq;

    #[test]
    fn test_transform_lifecycle_is_counted() {
        let mut scene = HeadlessScene::new();
        let stats = scene.stats();

        let mut parent = scene.create_root_child();
        let child = parent.create_child();
        assert_eq!(stats.created(), 2);
        assert_eq!(stats.parent_of(child.id()), Some(parent.id()));
        assert_eq!(stats.parent_of(parent.id()), None);

        let child_id = child.id();
        drop(child);
        assert_eq!(stats.live_transforms(), 1);
        assert_eq!(stats.destruction_order(), vec![child_id]);
    }

    #[test]
    fn test_local_translation_follows_orientation() {
        let mut scene = HeadlessScene::new();
        let mut transform = scene.create_root_child();

        transform.rotate(Axis::Y, Angle::from_degrees(90.0));
        transform.translate(Vec3::new(0.0, 0.0, 1.0), TransformSpace::Local);
        assert_relative_eq!(transform.position(), Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-5);

        transform.translate(Vec3::new(0.0, 0.0, 1.0), TransformSpace::Parent);
        assert_relative_eq!(transform.position(), Vec3::new(1.0, 0.0, 1.0), epsilon = 1e-5);

        transform.reset_orientation();
        assert_eq!(transform.orientation(), Quat::identity());
    }

    #[test]
    fn test_attachments_are_recorded() {
        let mut scene = HeadlessScene::new();
        let stats = scene.stats();
        let mut transform = scene.create_root_child();
        let viewpoint = scene.create_viewpoint("camera");

        transform.attach_renderable(Renderable::mesh("sphere").with_material("concrete"));
        transform.attach_viewpoint(viewpoint.as_ref());

        assert_eq!(stats.renderables(transform.id())[0].material.as_deref(), Some("concrete"));
        assert_eq!(stats.viewpoint_parent("camera"), Some(transform.id()));
    }

    #[test]
    fn test_animation_loops_only_when_enabled() {
        let mut scene = HeadlessScene::new().with_clip("walk", 2.0);
        let mut clip = scene.create_animation("walk");

        clip.add_time(0.5);
        assert_eq!(clip.time_position(), 0.0);

        clip.set_enabled(true);
        clip.set_looping(true);
        clip.add_time(2.5);
        assert_relative_eq!(clip.time_position(), 0.5);

        let mut once = scene.create_animation("unregistered");
        once.set_enabled(true);
        once.add_time(5.0);
        assert_relative_eq!(once.time_position(), DEFAULT_CLIP_LENGTH);
    }
}
