//! Deferred hierarchy requests
//!
//! Everything that changes the hierarchy is submitted as a [`Request`] and
//! sorted into a per-kind queue. The queues are drained at the start of the
//! next frame, before the update traversal, so the hierarchy never changes
//! while it is being walked.

use super::{GameObject, GameObjectId};
use crate::foundation::math::{Quat, Vec3};

/// A queued hierarchy mutation
#[derive(Debug)]
pub enum Request {
    /// Replace the active scene with an empty one
    LoadScene(String),
    /// Add a game object to the active scene
    Spawn(Spawn),
    /// Change the enabled state of a game object
    SetEnabled(StateChange),
}

/// Where a spawned game object joins the hierarchy
#[derive(Debug)]
pub enum Spawn {
    /// Directly under the scene root
    UnderRoot(GameObject),
    /// Under a game object that is already in the scene when the spawn is applied
    UnderParent {
        /// Parent handle
        parent: GameObjectId,
        /// Object to attach
        object: GameObject,
    },
}

impl Spawn {
    /// The object being spawned
    pub fn object(&self) -> &GameObject {
        match self {
            Self::UnderRoot(object) | Self::UnderParent { object, .. } => object,
        }
    }

    pub(crate) fn object_mut(&mut self) -> &mut GameObject {
        match self {
            Self::UnderRoot(object) | Self::UnderParent { object, .. } => object,
        }
    }
}

/// A queued enable/disable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    /// Target game object
    pub target: GameObjectId,
    /// New state
    pub enabled: bool,
    /// Also apply to components and every descendant
    pub apply_recursively: bool,
}

/// Parameters of a spawn request
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnParams {
    /// Name of the new game object
    pub name: String,
    /// Parent handle; `None` attaches under the scene root
    pub parent: Option<GameObjectId>,
    /// Local position
    pub position: Vec3,
    /// Local rotation
    pub rotation: Quat,
    /// Local scale
    pub scale: Vec3,
    /// Initial enabled state
    pub enabled: bool,
}

impl SpawnParams {
    /// Enabled object at the origin with identity rotation and unit scale
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
            enabled: true,
        }
    }

    /// Attach under `parent` instead of the scene root
    pub fn with_parent(mut self, parent: GameObjectId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set the local position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set the local rotation
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the local scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Set the initial enabled state
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Per-kind request queues
#[derive(Debug, Default)]
pub(crate) struct RequestQueue {
    pub(crate) load_scene: Option<String>,
    pub(crate) spawns: Vec<Spawn>,
    pub(crate) state_changes: Vec<StateChange>,
}

impl RequestQueue {
    pub(crate) fn submit(&mut self, request: Request) {
        match request {
            Request::LoadScene(name) => {
                if let Some(previous) = self.load_scene.replace(name) {
                    log::debug!("Scene request '{}' superseded before it was applied", previous);
                }
            }
            Request::Spawn(spawn) => self.spawns.push(spawn),
            Request::SetEnabled(change) => self.state_changes.push(change),
        }
    }

    /// Move every queued request out, leaving the queues empty
    pub(crate) fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Remove the queued spawn of `id`, with its queue position
    pub(crate) fn take_spawn(&mut self, id: GameObjectId) -> Option<(usize, Spawn)> {
        let index = self.spawns.iter().position(|spawn| spawn.object().id() == id)?;
        Some((index, self.spawns.remove(index)))
    }

    /// Put a spawn taken with [`take_spawn`](Self::take_spawn) back in place
    pub(crate) fn restore_spawn(&mut self, index: usize, spawn: Spawn) {
        let index = index.min(self.spawns.len());
        self.spawns.insert(index, spawn);
    }

    pub(crate) fn len(&self) -> usize {
        usize::from(self.load_scene.is_some()) + self.spawns.len() + self.state_changes.len()
    }
}
