//! Engine handle shared by the scheduler, game objects and components

use std::cell::RefCell;
use std::rc::Rc;

use super::request::RequestQueue;
use super::{GameObject, GameObjectId, Request, Spawn, SpawnParams, StateChange};
use crate::foundation::math::Transform;

/// Cheap, clonable handle to the engine's request queues
///
/// Every game object stores one at construction, so components reach the
/// engine through their context instead of a global. The handle is
/// single-threaded (`!Send`); all clones feed the same queues, which
/// [`Logic`](super::Logic) drains at the start of each frame.
#[derive(Debug, Clone, Default)]
pub struct EngineContext {
    requests: Rc<RefCell<RequestQueue>>,
}

impl EngineContext {
    /// Create a handle with empty queues
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw request
    pub fn submit(&self, request: Request) {
        self.requests.borrow_mut().submit(request);
    }

    /// Queue the creation of a game object and return its handle
    ///
    /// The object joins the scene at the next frame boundary. Until then it
    /// can be configured through [`configure_pending`](Self::configure_pending).
    pub fn spawn_game_object(&self, params: SpawnParams) -> GameObjectId {
        let transform = Transform::new(params.position, params.rotation, params.scale);
        let mut object = GameObject::new(params.name, self.clone()).with_transform(transform);
        object.set_enabled(params.enabled);
        let id = object.id();

        let spawn = match params.parent {
            Some(parent) => Spawn::UnderParent { parent, object },
            None => Spawn::UnderRoot(object),
        };
        self.submit(Request::Spawn(spawn));
        id
    }

    /// Queue an enabled-state change
    pub fn set_game_object_enabled(&self, target: GameObjectId, enabled: bool, apply_recursively: bool) {
        self.submit(Request::SetEnabled(StateChange { target, enabled, apply_recursively }));
    }

    /// Queue the replacement of the active scene by an empty one
    ///
    /// Only the most recent scene request of a frame is applied.
    pub fn load_empty_scene(&self, name: impl Into<String>) {
        self.submit(Request::LoadScene(name.into()));
    }

    /// Edit a spawned game object that has not joined the scene yet
    ///
    /// Returns `None` if no queued spawn carries `id`. The spawn leaves the
    /// queue while `configure` runs, so the closure may submit requests of
    /// its own; the spawn keeps its place ahead of them.
    pub fn configure_pending<R>(
        &self,
        id: GameObjectId,
        configure: impl FnOnce(&mut GameObject) -> R,
    ) -> Option<R> {
        let (index, mut spawn) = self.requests.borrow_mut().take_spawn(id)?;
        let result = configure(spawn.object_mut());
        self.requests.borrow_mut().restore_spawn(index, spawn);
        Some(result)
    }

    /// Number of queued requests
    pub fn pending_requests(&self) -> usize {
        self.requests.borrow().len()
    }

    pub(crate) fn take_requests(&self) -> RequestQueue {
        self.requests.borrow_mut().take()
    }

    pub(crate) fn clear_requests(&self) {
        // Move out first: dropping pending objects drops their handle clones
        let dropped = self.requests.borrow_mut().take();
        drop(dropped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    #[test]
    fn test_spawn_returns_configurable_handle() {
        let engine = EngineContext::new();
        let id = engine.spawn_game_object(
            SpawnParams::new("crate").with_position(Vec3::new(1.0, 2.0, 3.0)),
        );

        let renamed = engine.configure_pending(id, |object| {
            object.set_name("renamed crate");
            object.transform().position
        });
        assert_eq!(renamed, Some(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(engine.pending_requests(), 1);
    }

    #[test]
    fn test_only_latest_scene_request_is_kept() {
        let engine = EngineContext::new();
        engine.load_empty_scene("S1");
        engine.load_empty_scene("S2");

        let drained = engine.take_requests();
        assert_eq!(drained.load_scene.as_deref(), Some("S2"));
        assert_eq!(engine.pending_requests(), 0);
    }

    #[test]
    fn test_requests_keep_submission_order() {
        let engine = EngineContext::new();
        let first = engine.spawn_game_object(SpawnParams::new("first"));
        let second = engine.spawn_game_object(SpawnParams::new("second").with_parent(first));
        engine.set_game_object_enabled(second, false, true);
        engine.set_game_object_enabled(first, false, false);

        let drained = engine.take_requests();
        let spawned: Vec<_> = drained.spawns.iter().map(|spawn| spawn.object().id()).collect();
        assert_eq!(spawned, vec![first, second]);
        assert!(matches!(drained.spawns[1], Spawn::UnderParent { parent, .. } if parent == first));
        let targets: Vec<_> = drained.state_changes.iter().map(|change| change.target).collect();
        assert_eq!(targets, vec![second, first]);
    }

    #[test]
    fn test_configure_unknown_handle() {
        let engine = EngineContext::new();
        let stranger = GameObject::new("stranger", engine.clone());
        assert_eq!(engine.configure_pending(stranger.id(), |_| ()), None);
    }

    #[test]
    fn test_configure_may_spawn_through_the_object() {
        let engine = EngineContext::new();
        let first = engine.spawn_game_object(SpawnParams::new("first"));
        let last = engine.spawn_game_object(SpawnParams::new("last"));

        let child = engine
            .configure_pending(first, |object| {
                object.engine().spawn_game_object(SpawnParams::new("child").with_parent(object.id()))
            })
            .expect("first is pending");

        let drained = engine.take_requests();
        let order: Vec<_> = drained.spawns.iter().map(|spawn| spawn.object().id()).collect();
        assert_eq!(order, vec![first, last, child]);
    }
}
