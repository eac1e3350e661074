//! Scene hierarchy and frame scheduling
//!
//! Game objects live in a [`Scene`], a tree graph owned by [`Logic`]. Nothing
//! mutates the hierarchy directly while a frame is running: spawns, state
//! changes and scene replacements go through the [`EngineContext`] handle
//! and are applied at the start of the next frame.
//!
//! ## Architecture
//!
//! ```text
//! EngineContext (request queues)
//!      ↓ drained by
//! Logic ── listeners (before / after)
//!      ↓
//! Scene (TreeGraph<GameObject>)
//!      ↓ depth-first walk
//! GameObject ── Components
//! ```

mod component;
mod context;
mod error;
mod game_object;
mod listener;
mod logic;
mod request;
mod scene_graph;

#[cfg(test)]
pub(crate) mod testing;

pub use component::{Component, ComponentContext};
pub use context::EngineContext;
pub use error::SceneError;
pub use game_object::{GameObject, GameObjectId};
pub use listener::{ExecutionOrder, FrameListener, ListenerId};
pub use logic::Logic;
pub use request::{Request, Spawn, SpawnParams, StateChange};
pub use scene_graph::Scene;
