//! Math utilities and types
//!
//! Provides the small set of 3D math types the camera rig and scene transforms need.

pub use nalgebra::{Quaternion, Unit, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Principal axis of a local coordinate frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Pitch axis
    X,
    /// Yaw axis
    Y,
    /// Roll axis
    Z,
}

impl Axis {
    /// Unit vector along this axis
    pub fn unit(self) -> Unit<Vec3> {
        match self {
            Self::X => Vec3::x_axis(),
            Self::Y => Vec3::y_axis(),
            Self::Z => Vec3::z_axis(),
        }
    }

    /// Rotation of `radians` about this axis
    pub fn rotation(self, radians: f32) -> Quat {
        Quat::from_axis_angle(&self.unit(), radians)
    }

    /// Signed rotation angle of `q` about this axis, in radians.
    ///
    /// Exact when `q` rotates about this axis only; any off-axis component is
    /// ignored.
    pub fn angle_of(self, q: &Quat) -> f32 {
        let along = q.imag().dot(&self.unit().into_inner());
        2.0 * along.atan2(q.w)
    }
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f64 = std::f64::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f64 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f64 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f64) -> f64 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f64) -> f64 {
        radians * constants::RAD_TO_DEG
    }
}
