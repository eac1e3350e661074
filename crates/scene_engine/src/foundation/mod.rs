//! Foundation module - Core utilities and types
//!
//! - Math types (nalgebra aliases and `Transform`)
//! - Frame timing
//! - Logging setup

pub mod logging;
pub mod math;
pub mod time;
