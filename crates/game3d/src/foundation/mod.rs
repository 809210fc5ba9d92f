//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math type aliases and axis helpers
//! - Wrapped scalar and normalized angle types
//! - Frame timing
//! - Logging utilities

pub mod angle;
pub mod float;
pub mod logging;
pub mod math;
pub mod time;

pub use angle::{Angle, AngleVector};
pub use float::Float;
