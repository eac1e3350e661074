//! Frame scheduler owning the active scene

use super::listener::ListenerSet;
use super::request::RequestQueue;
use super::{
    EngineContext, ExecutionOrder, FrameListener, GameObject, GameObjectId, ListenerId, Scene,
    SceneError, Spawn, SpawnParams, StateChange,
};
use crate::core::config::SceneConfig;

/// Owns the active scene and applies queued requests at frame boundaries
///
/// Each [`update`](Self::update) runs, in order:
/// 1. the most recent scene replacement request
/// 2. queued spawns, in submission order
/// 3. queued state changes, in submission order
/// 4. `BeforeUpdate` listeners, the component update walk, `AfterUpdate` listeners
///
/// Anything submitted during steps 1 to 4 waits for the next frame.
#[derive(Debug)]
pub struct Logic {
    engine: EngineContext,
    scene: Option<Scene>,
    scene_config: SceneConfig,
    listeners: ListenerSet,
    frame: u64,
}

impl Logic {
    /// Create a scheduler with no scene and the default scene configuration
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    /// Create a scheduler whose scenes follow `scene_config`
    pub fn with_config(scene_config: SceneConfig) -> Self {
        Self {
            engine: EngineContext::new(),
            scene: None,
            scene_config,
            listeners: ListenerSet::default(),
            frame: 0,
        }
    }

    /// Handle shared with every game object
    pub fn engine(&self) -> &EngineContext {
        &self.engine
    }

    /// Active scene, if one has been loaded
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Mutable access to the active scene
    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.scene.as_mut()
    }

    /// Number of completed updates
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Queue the creation of a game object; see [`EngineContext::spawn_game_object`]
    pub fn spawn_game_object(&self, params: SpawnParams) -> GameObjectId {
        self.engine.spawn_game_object(params)
    }

    /// Queue an enabled-state change for the next frame
    pub fn set_game_object_enabled(&self, target: GameObjectId, enabled: bool, apply_recursively: bool) {
        self.engine.set_game_object_enabled(target, enabled, apply_recursively);
    }

    /// Queue the replacement of the active scene for the next frame
    pub fn load_empty_scene(&self, name: impl Into<String>) {
        self.engine.load_empty_scene(name);
    }

    /// Edit a spawned object before it joins the scene
    pub fn configure_pending<R>(
        &self,
        id: GameObjectId,
        configure: impl FnOnce(&mut GameObject) -> R,
    ) -> Option<R> {
        self.engine.configure_pending(id, configure)
    }

    /// Every object called `name` in the active scene, disabled ones included
    ///
    /// Synchronous: objects still waiting in the spawn queue are not found.
    pub fn find_game_objects_by_name(&mut self, name: &str) -> Vec<GameObjectId> {
        match self.scene.as_mut() {
            Some(scene) => scene.find_by_name(name),
            None => {
                log::warn!("Searched for '{}' before any scene was loaded", name);
                Vec::new()
            }
        }
    }

    /// Register a listener; `None` if `order` is [`ExecutionOrder::Unspecified`]
    pub fn add_listener(&mut self, order: ExecutionOrder, listener: impl FrameListener) -> Option<ListenerId> {
        self.listeners.add(order, Box::new(listener))
    }

    /// Unregister a listener; unknown handles are logged and ignored
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Number of registered frame listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Run one frame
    pub fn update(&mut self, delta_time: f32) {
        self.apply_requests();

        if let Some(scene) = self.scene.as_mut() {
            self.listeners.run(ExecutionOrder::BeforeUpdate, scene, delta_time);
            let updated = scene.update(delta_time);
            self.listeners.run(ExecutionOrder::AfterUpdate, scene, delta_time);
            log::trace!("Frame {}: updated {} objects", self.frame, updated);
        }
        self.frame += 1;
    }

    fn apply_requests(&mut self) {
        let RequestQueue { load_scene, spawns, state_changes } = self.engine.take_requests();
        if load_scene.is_some() || !spawns.is_empty() || !state_changes.is_empty() {
            log::debug!(
                "Frame {}: applying {} scene, {} spawn and {} state requests",
                self.frame,
                usize::from(load_scene.is_some()),
                spawns.len(),
                state_changes.len()
            );
        }

        if let Some(name) = load_scene {
            self.replace_scene(name);
        }
        for spawn in spawns {
            self.apply_spawn(spawn);
        }
        for change in state_changes {
            self.apply_state_change(change);
        }
    }

    fn replace_scene(&mut self, name: String) {
        if let Some(previous) = self.scene.take() {
            log::info!("Unloading scene '{}'", previous.name());
            drop(previous);
        }
        self.scene = Some(Scene::with_config(name, &self.engine, &self.scene_config));
    }

    fn apply_spawn(&mut self, spawn: Spawn) {
        let Some(scene) = self.scene.as_mut() else {
            log::warn!("Dropped spawn of '{}': {}", spawn.object().name(), SceneError::NoActiveScene);
            return;
        };

        let result = match spawn {
            Spawn::UnderRoot(object) => scene.add(object),
            Spawn::UnderParent { parent, object } => scene.attach(parent, object),
        };
        if let Err(err) = result {
            log::warn!("Dropped spawn: {}", err);
        }
    }

    fn apply_state_change(&mut self, change: StateChange) {
        let Some(scene) = self.scene.as_mut() else {
            log::warn!("Dropped state change for {}: {}", change.target, SceneError::NoActiveScene);
            return;
        };
        if let Err(err) = scene.set_enabled(change.target, change.enabled, change.apply_recursively) {
            log::debug!("Dropped state change: {}", err);
        }
    }
}

impl Default for Logic {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logic {
    fn drop(&mut self) {
        // Scene first: on_destroy hooks may still queue requests
        self.scene = None;
        self.engine.clear_requests();
    }
}
