//! # Scene Engine
//!
//! Scene-graph core of an entity/component framework: generic graph
//! containers, a depth-first traversal engine, and a tree of game objects
//! updated once per frame through deferred requests.
//!
//! ## Features
//!
//! - **Graph Core**: arena-backed graphs with generation-checked keys
//! - **Traversal**: resettable depth-first search with subtree pruning
//! - **Game Objects**: named components with delayed attachment
//! - **Scheduling**: spawn, enable/disable and scene loads applied at frame boundaries
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! struct MyApp;
//!
//! impl Application for MyApp {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         engine.logic().spawn_game_object(SpawnParams::new("player"));
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, engine: &mut Engine) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EngineConfig::default().with_max_frames(60);
//!     let mut app = MyApp;
//!     Engine::run(config, &mut app)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod core;
pub mod foundation;
pub mod graph;
pub mod scene;

mod application;
mod engine;

pub use application::{AppError, Application};
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        core::config::{Config, EngineConfig, SceneConfig},
        foundation::{
            math::{Quat, Transform, Vec3},
            time::Timer,
        },
        graph::{DepthFirstSearch, GraphAlgorithm, GraphError},
        scene::{
            Component, ComponentContext, EngineContext, ExecutionOrder, FrameListener, GameObject,
            GameObjectId, Logic, Scene, SceneError, SpawnParams,
        },
        AppError, Application, Engine, EngineError,
    };
}
