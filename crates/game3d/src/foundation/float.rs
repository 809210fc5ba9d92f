//! Wrapped floating-point scalar
//!
//! `Float` is a thin `f64` newtype used for the controller's scalar state. It
//! carries the handful of sign/magnitude helpers the angle and speed logic lean on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Wrapped `f64` scalar
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Float(f64);

impl Float {
    /// Zero
    pub const ZERO: Self = Self(0.0);

    /// One
    pub const ONE: Self = Self(1.0);

    /// Wrap a raw value
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Raw value
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Absolute value
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// `1`, `-1` or `0` depending on the sign of the value
    pub fn sign(self) -> i32 {
        if self.0 > 0.0 {
            1
        } else if self.0 < 0.0 {
            -1
        } else {
            0
        }
    }

    /// Restrict the value to `[min, max]`
    pub fn clamp(self, min: Self, max: Self) -> Self {
        if self < min {
            min
        } else if self > max {
            max
        } else {
            self
        }
    }
}

impl From<f64> for Float {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<Float> for f64 {
    fn from(value: Float) -> Self {
        value.0
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Neg for Float {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

macro_rules! float_binary_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl $trait for Float {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self {
                Self(self.0 $op rhs.0)
            }
        }

        impl $assign_trait for Float {
            fn $assign_method(&mut self, rhs: Self) {
                self.0 = self.0 $op rhs.0;
            }
        }
    };
}

float_binary_op!(Add, add, AddAssign, add_assign, +);
float_binary_op!(Sub, sub, SubAssign, sub_assign, -);
float_binary_op!(Mul, mul, MulAssign, mul_assign, *);
float_binary_op!(Div, div, DivAssign, div_assign, /);
