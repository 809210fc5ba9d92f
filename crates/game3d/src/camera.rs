//! # Camera Rig
//!
//! A camera built from four chained transforms:
//!
//! ```text
//! parent → position → yaw → pitch → roll → viewpoint
//! ```
//!
//! Each rotation frame only ever rotates about its own axis, so the three
//! angles never contaminate each other and can be read back independently.
//! Translation happens at the position frame, above all rotations.

use crate::config::ConfigError;
use crate::foundation::math::{Axis, Quat, Vec3};
use crate::foundation::{Angle, AngleVector};
use crate::scene::{SceneManager, SceneTransform, TransformSpace, Viewpoint};
use log::{info, trace};
use serde::{Deserialize, Serialize};

/// Camera construction parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraInfo {
    /// Viewpoint name in the scene engine
    pub name: String,
    /// Distance to near clipping plane (must be > 0)
    pub near_clip: f32,
    /// Distance to far clipping plane (must be > near)
    pub far_clip: f32,
    /// Starting position relative to the parent transform
    pub initial_position: Vec3,
    /// Starting rotation
    pub initial_rotation: AngleVector,
    /// Viewport aspect ratio (width / height)
    pub aspect_ratio: f32,
}

impl Default for CameraInfo {
    fn default() -> Self {
        Self {
            name: "camera".to_string(),
            near_clip: 2.0,
            far_clip: 1000.0,
            initial_position: Vec3::zeros(),
            initial_rotation: AngleVector::ZERO,
            aspect_ratio: 16.0 / 9.0,
        }
    }
}

impl CameraInfo {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::Invalid("camera name cannot be empty".to_string()));
        }
        if !(self.near_clip > 0.0 && self.near_clip.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "camera near clip must be positive, got {}",
                self.near_clip
            )));
        }
        if !(self.far_clip > self.near_clip) {
            return Err(ConfigError::Invalid(format!(
                "camera far clip ({}) must exceed near clip ({})",
                self.far_clip, self.near_clip
            )));
        }
        if !(self.aspect_ratio > 0.0 && self.aspect_ratio.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "camera aspect ratio must be positive, got {}",
                self.aspect_ratio
            )));
        }
        Ok(())
    }
}

/// Orientation of each rotation frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraOrientation {
    /// Pitch frame orientation
    pub pitch: Quat,
    /// Yaw frame orientation
    pub yaw: Quat,
    /// Roll frame orientation
    pub roll: Quat,
}

/// Four-frame camera rig
pub struct Camera {
    viewpoint: Box<dyn Viewpoint>,
    // Leaf first so frames release bottom-up
    roll: Box<dyn SceneTransform>,
    pitch: Box<dyn SceneTransform>,
    yaw: Box<dyn SceneTransform>,
    position: Box<dyn SceneTransform>,
}

impl Camera {
    /// Build the rig under `parent`
    ///
    /// Fails before touching the engine if `info` is invalid.
    pub fn new(
        info: &CameraInfo,
        scene: &mut dyn SceneManager,
        parent: &mut dyn SceneTransform,
    ) -> Result<Self, ConfigError> {
        info.validate()?;

        let mut viewpoint = scene.create_viewpoint(&info.name);
        viewpoint.look_at(Vec3::new(0.0, 0.0, 1.0));
        viewpoint.set_near_clip(info.near_clip);
        viewpoint.set_far_clip(info.far_clip);
        viewpoint.set_aspect_ratio(info.aspect_ratio);

        let mut position = parent.create_child();
        position.set_position(info.initial_position);
        let mut yaw = position.create_child();
        let mut pitch = yaw.create_child();
        let mut roll = pitch.create_child();
        roll.attach_viewpoint(viewpoint.as_ref());

        let mut camera = Self {
            viewpoint,
            roll,
            pitch,
            yaw,
            position,
        };
        camera.set_rotation(&info.initial_rotation);

        info!(
            "Camera '{}' created at {:?} facing {}",
            info.name,
            info.initial_position,
            info.initial_rotation
        );
        Ok(camera)
    }

    /// Engine viewpoint
    pub fn viewpoint(&self) -> &dyn Viewpoint {
        self.viewpoint.as_ref()
    }

    /// Forward a viewport aspect ratio change to the viewpoint
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        if (self.viewpoint.aspect_ratio() - aspect_ratio).abs() > 0.01 {
            info!(
                "Camera aspect ratio changed: {:.3} -> {:.3}",
                self.viewpoint.aspect_ratio(),
                aspect_ratio
            );
        }
        self.viewpoint.set_aspect_ratio(aspect_ratio);
    }

    /// Rotate each frame about its own axis by the given increments
    pub fn rotate(&mut self, angles: &AngleVector) {
        self.yaw.rotate(Axis::Y, angles.yaw);
        self.pitch.rotate(Axis::X, angles.pitch);
        self.roll.rotate(Axis::Z, angles.roll);
        trace!("Camera rotated by {angles}");
    }

    /// Reset all three rotation frames, then apply `angles`
    pub fn set_rotation(&mut self, angles: &AngleVector) {
        self.yaw.reset_orientation();
        self.pitch.reset_orientation();
        self.roll.reset_orientation();
        self.rotate(angles);
    }

    /// Current rotation, read from each frame's own axis
    pub fn rotation(&self) -> AngleVector {
        AngleVector {
            pitch: Self::frame_angle(self.pitch.as_ref(), Axis::X),
            yaw: Self::frame_angle(self.yaw.as_ref(), Axis::Y),
            roll: Self::frame_angle(self.roll.as_ref(), Axis::Z),
        }
    }

    fn frame_angle(frame: &dyn SceneTransform, axis: Axis) -> Angle {
        Angle::from_radians(f64::from(axis.angle_of(&frame.orientation())))
    }

    /// Orientation of each rotation frame
    pub fn orientation(&self) -> CameraOrientation {
        CameraOrientation {
            pitch: self.pitch.orientation(),
            yaw: self.yaw.orientation(),
            roll: self.roll.orientation(),
        }
    }

    /// Position relative to the parent transform
    pub fn position(&self) -> Vec3 {
        self.position.position()
    }

    /// Move in the position frame's local space
    pub fn translate(&mut self, delta: Vec3) {
        self.position.translate(delta, TransformSpace::Local);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::headless::HeadlessScene;
    use approx::assert_relative_eq;

    const EPSILON: f64 = 1e-4;

    fn build(info: &CameraInfo) -> (HeadlessScene, Box<dyn SceneTransform>, Result<Camera, ConfigError>) {
        let mut scene = HeadlessScene::new();
        let mut parent = scene.create_root_child();
        let camera = Camera::new(info, &mut scene, parent.as_mut());
        (scene, parent, camera)
    }

    fn assert_rotation(actual: AngleVector, pitch: f64, yaw: f64, roll: f64) {
        assert_relative_eq!(actual.pitch.degrees(), pitch, epsilon = EPSILON);
        assert_relative_eq!(actual.yaw.degrees(), yaw, epsilon = EPSILON);
        assert_relative_eq!(actual.roll.degrees(), roll, epsilon = EPSILON);
    }

    #[test]
    fn test_set_rotation_round_trip() {
        let (_scene, _parent, camera) = build(&CameraInfo::default());
        let mut camera = camera.unwrap();

        camera.set_rotation(&AngleVector::from_degrees(10.0, 20.0, 5.0));
        assert_rotation(camera.rotation(), 10.0, 20.0, 5.0);

        camera.set_rotation(&AngleVector::from_degrees(-60.0, 170.0, -90.0));
        assert_rotation(camera.rotation(), -60.0, 170.0, -90.0);
    }

    #[test]
    fn test_rotate_is_incremental_per_axis() {
        let (_scene, _parent, camera) = build(&CameraInfo::default());
        let mut camera = camera.unwrap();

        camera.rotate(&AngleVector::from_degrees(10.0, 30.0, 0.0));
        camera.rotate(&AngleVector::from_degrees(5.0, 0.0, 2.0));
        assert_rotation(camera.rotation(), 15.0, 30.0, 2.0);

        // Yaw wraps through the normalized range
        camera.rotate(&AngleVector::from_degrees(0.0, 160.0, 0.0));
        assert_rotation(camera.rotation(), 15.0, -170.0, 2.0);
    }

    #[test]
    fn test_initial_rotation_and_position_applied() {
        let info = CameraInfo {
            initial_position: Vec3::new(50.0, 50.0, 50.0),
            initial_rotation: AngleVector::from_degrees(-20.0, 45.0, 0.0),
            ..CameraInfo::default()
        };
        let (_scene, _parent, camera) = build(&info);
        let camera = camera.unwrap();

        assert_eq!(camera.position(), Vec3::new(50.0, 50.0, 50.0));
        assert_rotation(camera.rotation(), -20.0, 45.0, 0.0);
    }

    #[test]
    fn test_translate_is_local_to_position_frame() {
        let (_scene, _parent, camera) = build(&CameraInfo::default());
        let mut camera = camera.unwrap();

        // Rotation frames sit below the position frame and do not steer it
        camera.rotate(&AngleVector::from_degrees(0.0, 90.0, 0.0));
        camera.translate(Vec3::new(0.0, 0.0, 2.0));
        assert_relative_eq!(camera.position(), Vec3::new(0.0, 0.0, 2.0), epsilon = 1e-5);
    }

    #[test]
    fn test_frame_chain_and_viewpoint() {
        let info = CameraInfo {
            near_clip: 0.5,
            far_clip: 300.0,
            ..CameraInfo::default()
        };
        let (scene, parent, camera) = build(&info);
        let mut camera = camera.unwrap();
        let stats = scene.stats();

        let roll = stats.viewpoint_parent("camera").unwrap();
        let pitch = stats.parent_of(roll).unwrap();
        let yaw = stats.parent_of(pitch).unwrap();
        let position = stats.parent_of(yaw).unwrap();
        assert_eq!(stats.parent_of(position), Some(parent.id()));

        assert_eq!(camera.viewpoint().near_clip(), 0.5);
        assert_eq!(camera.viewpoint().far_clip(), 300.0);
        camera.set_aspect_ratio(2.0);
        assert_eq!(camera.viewpoint().aspect_ratio(), 2.0);
    }

    #[test]
    fn test_invalid_clip_fails_fast() {
        for (near, far) in [(0.0, 100.0), (-1.0, 100.0), (10.0, 10.0), (f32::NAN, 100.0)] {
            let info = CameraInfo {
                near_clip: near,
                far_clip: far,
                ..CameraInfo::default()
            };
            let (scene, _parent, camera) = build(&info);
            assert!(matches!(camera, Err(ConfigError::Invalid(_))), "near {near} far {far}");
            // Nothing was created beyond the parent
            assert_eq!(scene.stats().created(), 1);
        }
    }

    #[test]
    fn test_frames_released_with_camera() {
        let (scene, _parent, camera) = build(&CameraInfo::default());
        let stats = scene.stats();
        assert_eq!(stats.live_transforms(), 5);

        drop(camera);
        assert_eq!(stats.live_transforms(), 1);
    }
}
