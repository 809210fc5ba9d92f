//! Scene management system
//!
//! The logic-side scene graph. A [`World`] owns a tree of named [`Node`]s; each
//! node wraps a transform handle owned by the external scene engine and may
//! carry one [`Object`] that reacts to events.
//!
//! ## Architecture
//!
//! ```text
//! Frame driver
//!      ↓  Event (per phase)
//! World → root Node → Object, then children (insertion order)
//!      ↓
//! SceneTransform handles (external engine)
//! ```
//!
//! The external engine is reached only through the traits below. The
//! [`headless`] backend implements them in memory.

pub mod headless;
mod node;
mod object;
mod world;

#[cfg(test)]
mod tests;

pub use node::{Node, NodeAccess, NodeError};
pub use object::Object;
pub use world::World;

use crate::foundation::math::{Axis, Quat, Vec3};
use crate::foundation::Angle;
use std::fmt;

/// Identifier the engine assigns to a transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransformId(pub u64);

impl fmt::Display for TransformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Coordinate space for relative translations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformSpace {
    /// Along the transform's own (rotated) axes
    #[default]
    Local,
    /// Along the parent's axes
    Parent,
}

/// Something drawable the engine can hang on a transform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderable {
    /// Mesh resource name
    pub mesh: String,
    /// Material override
    pub material: Option<String>,
    /// Whether the renderable casts shadows
    pub cast_shadows: bool,
}

impl Renderable {
    /// Renderable for a mesh with its default material
    pub fn mesh(mesh: impl Into<String>) -> Self {
        Self {
            mesh: mesh.into(),
            material: None,
            cast_shadows: true,
        }
    }

    /// Builder pattern: override the material
    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    /// Builder pattern: toggle shadow casting
    pub fn with_shadows(mut self, cast_shadows: bool) -> Self {
        self.cast_shadows = cast_shadows;
        self
    }
}

/// Handle to a transform owned by the scene engine
///
/// Dropping the handle releases the logic layer's claim on it; the engine
/// decides what that means for the underlying transform.
pub trait SceneTransform {
    /// Engine-assigned identifier
    fn id(&self) -> TransformId;

    /// Create a transform parented to this one
    fn create_child(&mut self) -> Box<dyn SceneTransform>;

    /// Attach a renderable
    fn attach_renderable(&mut self, renderable: Renderable);

    /// Attach a viewpoint so it follows this transform
    fn attach_viewpoint(&mut self, viewpoint: &dyn Viewpoint);

    /// Position relative to the parent
    fn position(&self) -> Vec3;

    /// Set position relative to the parent
    fn set_position(&mut self, position: Vec3);

    /// Orientation relative to the parent
    fn orientation(&self) -> Quat;

    /// Set orientation relative to the parent
    fn set_orientation(&mut self, orientation: Quat);

    /// Set scale factors
    fn set_scale(&mut self, scale: Vec3);

    /// Move by `delta` expressed in `space`
    fn translate(&mut self, delta: Vec3, space: TransformSpace) {
        let delta = match space {
            TransformSpace::Local => self.orientation() * delta,
            TransformSpace::Parent => delta,
        };
        let position = self.position() + delta;
        self.set_position(position);
    }

    /// Rotate about one of the transform's own axes
    fn rotate(&mut self, axis: Axis, angle: Angle) {
        let orientation = self.orientation() * axis.rotation(angle.radians() as f32);
        self.set_orientation(orientation);
    }

    /// Clear any rotation
    fn reset_orientation(&mut self) {
        self.set_orientation(Quat::identity());
    }
}

/// Engine-side camera the rig positions
pub trait Viewpoint {
    /// Name the viewpoint was created with
    fn name(&self) -> &str;

    /// Point the viewpoint at a target in its parent's space
    fn look_at(&mut self, target: Vec3);

    /// Near clip distance
    fn near_clip(&self) -> f32;

    /// Set near clip distance
    fn set_near_clip(&mut self, distance: f32);

    /// Far clip distance
    fn far_clip(&self) -> f32;

    /// Set far clip distance
    fn set_far_clip(&mut self, distance: f32);

    /// Viewport aspect ratio
    fn aspect_ratio(&self) -> f32;

    /// Set viewport aspect ratio
    fn set_aspect_ratio(&mut self, ratio: f32);
}

/// Skeletal or node animation playing on an engine entity
pub trait AnimationClip {
    /// Clip name
    fn name(&self) -> &str;

    /// Enable or disable playback
    fn set_enabled(&mut self, enabled: bool);

    /// Wrap around at the end instead of stopping
    fn set_looping(&mut self, looping: bool);

    /// Advance by elapsed seconds
    fn add_time(&mut self, seconds: f32);

    /// Current position within the clip, in seconds
    fn time_position(&self) -> f32;
}

/// The external scene engine
pub trait SceneManager {
    /// Create a transform under the engine's own root
    fn create_root_child(&mut self) -> Box<dyn SceneTransform>;

    /// Create a named viewpoint
    fn create_viewpoint(&mut self, name: &str) -> Box<dyn Viewpoint>;

    /// Look up an animation clip
    fn create_animation(&mut self, clip: &str) -> Box<dyn AnimationClip>;
}
