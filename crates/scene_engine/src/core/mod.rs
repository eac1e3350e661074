//! # Core Engine Module
//!
//! Shared settings used by the frame loop and the scene scheduler.

pub mod config;

pub use config::{Config, ConfigError, EngineConfig, SceneConfig};
