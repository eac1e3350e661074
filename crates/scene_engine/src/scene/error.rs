//! Scene errors

use thiserror::Error;

use super::GameObjectId;
use crate::graph::GraphError;

/// Errors reported by scene and game-object operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The underlying graph rejected the change
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// The requested parent is not in the scene
    #[error("parent {0} is not part of the scene")]
    ParentNotFound(GameObjectId),

    /// No game object with this handle is in the scene
    #[error("{0} is not part of the scene")]
    UnknownGameObject(GameObjectId),

    /// A sibling component already uses the name
    #[error("{object} already has a component named '{name}'")]
    DuplicateComponent {
        /// Owning game object
        object: GameObjectId,
        /// Conflicting name
        name: String,
    },

    /// No component with this name is attached
    #[error("{object} has no component named '{name}'")]
    UnknownComponent {
        /// Owning game object
        object: GameObjectId,
        /// Requested name
        name: String,
    },

    /// The operation needs a scene and none is loaded
    #[error("no scene is loaded")]
    NoActiveScene,
}
