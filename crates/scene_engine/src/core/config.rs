//! # Engine and Scene Configuration
//!
//! Settings for the frame loop and for the scenes it creates. Both structs
//! deserialize from partial files: missing fields fall back to their
//! defaults.

use serde::{Deserialize, Serialize};

use crate::foundation::logging::LevelFilter;

pub use crate::config::{Config, ConfigError};

/// # Scene Configuration
///
/// Applied to every scene created by the scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Name of the root game object
    pub root_name: String,
    /// Number of objects to reserve arena space for
    pub expected_objects: usize,
}

impl SceneConfig {
    /// Anonymous root, room for 64 objects
    pub fn new() -> Self {
        Self {
            root_name: String::new(),
            expected_objects: 64,
        }
    }

    /// Set the root object's name
    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }

    /// Set the arena capacity hint
    pub fn with_expected_objects(mut self, count: usize) -> Self {
        self.expected_objects = count;
        self
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// # Engine Configuration
///
/// Frame loop behaviour and logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Log level for the engine (`off`, `error`, `warn`, `info`, `debug`, `trace`)
    pub log_level: String,
    /// Scene requested before the first frame
    pub initial_scene: Option<String>,
    /// Stop after this many frames; `None` runs until quit
    pub max_frames: Option<u64>,
    /// Constant frame step in seconds instead of wall-clock time
    pub fixed_delta_time: Option<f32>,
    /// Settings for every scene the engine creates
    pub scene: SceneConfig,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            initial_scene: Some("main".to_string()),
            max_frames: None,
            fixed_delta_time: None,
            scene: SceneConfig::default(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Set the scene loaded before the first frame
    pub fn with_initial_scene(mut self, name: impl Into<String>) -> Self {
        self.initial_scene = Some(name.into());
        self
    }

    /// Start without any scene
    pub fn without_initial_scene(mut self) -> Self {
        self.initial_scene = None;
        self
    }

    /// Stop the loop after `frames` frames
    pub fn with_max_frames(mut self, frames: u64) -> Self {
        self.max_frames = Some(frames);
        self
    }

    /// Use a constant frame step
    pub fn with_fixed_delta_time(mut self, seconds: f32) -> Self {
        self.fixed_delta_time = Some(seconds);
        self
    }

    /// Set scene settings
    pub fn with_scene(mut self, scene: SceneConfig) -> Self {
        self.scene = scene;
        self
    }

    /// Parsed log level
    pub fn level_filter(&self) -> Result<LevelFilter, String> {
        self.log_level
            .parse()
            .map_err(|_| format!("Unknown log level: {}", self.log_level))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.level_filter()?;

        if let Some(step) = self.fixed_delta_time {
            if !step.is_finite() || step <= 0.0 {
                return Err(format!("Fixed delta time must be positive, got {}", step));
            }
        }

        if self.initial_scene.as_deref().is_some_and(str::is_empty) {
            return Err("Initial scene name cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for EngineConfig {}
