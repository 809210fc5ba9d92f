//! Normalized angles
//!
//! Every `Angle` lives in the half-open range (-180°, 180°]. Constructors and
//! arithmetic fold the result back into range, so sums never drift.

use super::float::Float;
use super::math::utils;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// Angle normalized into (-180°, 180°]
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Angle {
    degrees: Float,
}

impl Angle {
    /// Zero angle
    pub const ZERO: Self = Self { degrees: Float::ZERO };

    /// Build from degrees, folding into (-180, 180]
    pub fn from_degrees(degrees: f64) -> Self {
        // fmod is exact, so this only strips whole turns
        let mut degrees = degrees % 360.0;
        while degrees <= -180.0 {
            degrees += 360.0;
        }
        while degrees > 180.0 {
            degrees -= 360.0;
        }
        Self { degrees: Float::new(degrees) }
    }

    /// Build from radians, folding into (-pi, pi]
    pub fn from_radians(radians: f64) -> Self {
        Self::from_degrees(utils::rad_to_deg(radians))
    }

    /// Value in degrees
    pub fn degrees(self) -> f64 {
        self.degrees.value()
    }

    /// Value in radians
    pub fn radians(self) -> f64 {
        utils::deg_to_rad(self.degrees.value())
    }

    /// Value in degrees as a wrapped scalar
    pub const fn as_float(self) -> Float {
        self.degrees
    }
}

impl Add for Angle {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_degrees(self.degrees() + rhs.degrees())
    }
}

impl Sub for Angle {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_degrees(self.degrees() - rhs.degrees())
    }
}

impl Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_degrees(-self.degrees())
    }
}

impl From<f64> for Angle {
    fn from(degrees: f64) -> Self {
        Self::from_degrees(degrees)
    }
}

impl From<Angle> for f64 {
    fn from(angle: Angle) -> Self {
        angle.degrees()
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}°", self.degrees())
    }
}

/// Pitch/yaw/roll triple
///
/// Pitch rotates about X, yaw about Y, roll about Z.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AngleVector {
    /// Rotation around the x axis
    pub pitch: Angle,
    /// Rotation around the y axis
    pub yaw: Angle,
    /// Rotation around the z axis
    pub roll: Angle,
}

impl AngleVector {
    /// All three components zero
    pub const ZERO: Self = Self {
        pitch: Angle::ZERO,
        yaw: Angle::ZERO,
        roll: Angle::ZERO,
    };

    /// Build from components
    pub const fn new(pitch: Angle, yaw: Angle, roll: Angle) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Build from degree components
    pub fn from_degrees(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self {
            pitch: Angle::from_degrees(pitch),
            yaw: Angle::from_degrees(yaw),
            roll: Angle::from_degrees(roll),
        }
    }
}

impl fmt::Display for AngleVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(pitch {}, yaw {}, roll {})", self.pitch, self.yaw, self.roll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_from_degrees_stays_in_range() {
        for degrees in [-1000.0, -540.0, -360.0, -180.0, -179.5, 0.0, 90.0, 180.0, 181.0, 720.25, 1e9] {
            let angle = Angle::from_degrees(degrees).degrees();
            assert!(angle > -180.0 && angle <= 180.0, "{degrees} folded to {angle}");
        }
    }

    #[test]
    fn test_lower_bound_maps_to_upper_bound() {
        assert_eq!(Angle::from_degrees(-180.0).degrees(), 180.0);
        assert_eq!(Angle::from_degrees(180.0).degrees(), 180.0);
        assert_eq!(Angle::from_degrees(540.0).degrees(), 180.0);
    }

    #[test]
    fn test_whole_turns_are_invisible() {
        for base in [-170.5, -45.25, 0.0, 10.5, 179.75] {
            let expected = Angle::from_degrees(base).degrees();
            for turns in -4_i32..=4 {
                let shifted = Angle::from_degrees(base + 360.0 * f64::from(turns));
                assert_eq!(shifted.degrees(), expected, "base {base} turns {turns}");
            }
        }
    }

    #[test]
    fn test_arithmetic_renormalizes() {
        let a = Angle::from_degrees(170.0);
        let b = Angle::from_degrees(20.0);
        assert_eq!((a + b).degrees(), -170.0);
        assert_eq!((-a - b).degrees(), 170.0);
        assert_eq!((b - a).degrees(), -150.0);
    }

    #[test]
    fn test_radians() {
        let angle = Angle::from_radians(std::f64::consts::PI * 2.5);
        assert_relative_eq!(angle.degrees(), 90.0, epsilon = 1e-9);
        assert_relative_eq!(Angle::from_degrees(90.0).radians(), std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn test_deserialize_normalizes() {
        let vector: AngleVector = toml::from_str("pitch = 370.0\nyaw = -190.0").unwrap();
        assert_eq!(vector.pitch.degrees(), 10.0);
        assert_eq!(vector.yaw.degrees(), 170.0);
        assert_eq!(vector.roll, Angle::ZERO);
    }
}
