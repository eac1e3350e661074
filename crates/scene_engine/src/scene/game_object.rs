//! Game object: the node type of the scene hierarchy

use std::fmt;

use super::component::ComponentSlot;
use super::{Component, ComponentContext, EngineContext, SceneError};
use crate::foundation::math::Transform;
use crate::graph::{DirectedNodeBase, EdgeStore, GraphNode, NodeId, NodeKey};

/// Handle of a game object; stays valid until its scene is replaced
pub type GameObjectId = NodeId;

/// One entity of the live hierarchy
///
/// A directed tree node with a name, an enabled flag, a local transform and
/// an ordered set of uniquely named components. Components are never attached
/// directly: [`add_component`](Self::add_component) parks them until the
/// next [`execute_components`](Self::execute_components), which starts them at
/// a frame boundary.
pub struct GameObject {
    id: GameObjectId,
    name: String,
    enabled: bool,
    transform: Transform,
    components: Vec<ComponentSlot>,
    delayed: Vec<ComponentSlot>,
    parent: Option<NodeKey>,
    links: DirectedNodeBase,
    engine: EngineContext,
}

impl GameObject {
    /// Create an enabled game object with an identity transform
    pub fn new(name: impl Into<String>, engine: EngineContext) -> Self {
        Self {
            id: NodeId::next(),
            name: name.into(),
            enabled: true,
            transform: Transform::identity(),
            components: Vec::new(),
            delayed: Vec::new(),
            parent: None,
            links: DirectedNodeBase::new(),
            engine,
        }
    }

    /// Replace the local transform (builder style)
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Handle of this object
    pub fn id(&self) -> GameObjectId {
        self.id
    }

    /// Display name; not unique
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the object
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Own enabled flag
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Set the own enabled flag only; components and children are untouched
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Local transform
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mutable local transform
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Engine handle this object was created with
    pub fn engine(&self) -> &EngineContext {
        &self.engine
    }

    /// Key of the parent node, as derived by [`find_parent`](Self::find_parent)
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Derive the parent from the first incoming edge
    ///
    /// A tree node has at most one incoming edge. Leaves the cached parent
    /// untouched when there is none (the root).
    pub fn find_parent(&mut self, edges: &EdgeStore) {
        if let Some(edge) = self.links.incoming().first().and_then(|key| edges.get(*key)) {
            self.parent = Some(edge.src_node());
        }
    }

    /// Register a component for attachment at the next update
    ///
    /// Fails if an attached or waiting sibling already uses `name`.
    pub fn add_component(
        &mut self,
        name: impl Into<String>,
        component: impl Component,
    ) -> Result<(), SceneError> {
        let name = name.into();
        if self.has_component(&name) {
            log::warn!("Rejected component '{}' on '{}': name already in use", name, self.name);
            return Err(SceneError::DuplicateComponent { object: self.id, name });
        }
        self.delayed.push(ComponentSlot::new(name, Box::new(component)));
        Ok(())
    }

    /// Detach a component, notifying it if it had been started
    pub fn remove_component(&mut self, name: &str) -> Result<(), SceneError> {
        if let Some(index) = self.delayed.iter().position(|slot| slot.name == name) {
            self.delayed.remove(index);
            return Ok(());
        }
        let Some(index) = self.components.iter().position(|slot| slot.name == name) else {
            log::warn!("'{}' has no component named '{}' to remove", self.name, name);
            return Err(SceneError::UnknownComponent { object: self.id, name: name.to_string() });
        };

        let mut slot = self.components.remove(index);
        let mut ctx = ComponentContext::new(
            self.id,
            slot.enabled,
            0.0,
            &mut self.transform,
            &self.engine,
            &mut self.delayed,
        );
        slot.component.on_destroy(&mut ctx);
        Ok(())
    }

    /// Whether an attached or waiting component uses `name`
    pub fn has_component(&self, name: &str) -> bool {
        self.components.iter().chain(&self.delayed).any(|slot| slot.name == name)
    }

    /// Names of attached components, in container order
    pub fn component_names(&self) -> Vec<&str> {
        self.components.iter().map(|slot| slot.name.as_str()).collect()
    }

    /// Number of attached components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Number of components waiting for attachment
    pub fn pending_component_count(&self) -> usize {
        self.delayed.len()
    }

    /// Enabled flag of the component called `name`
    pub fn is_component_enabled(&self, name: &str) -> Option<bool> {
        self.components
            .iter()
            .chain(&self.delayed)
            .find(|slot| slot.name == name)
            .map(|slot| slot.enabled)
    }

    /// Set the enabled flag of one component
    pub fn set_component_enabled(&mut self, name: &str, enabled: bool) -> Result<(), SceneError> {
        match self.components.iter_mut().chain(&mut self.delayed).find(|slot| slot.name == name) {
            Some(slot) => {
                slot.enabled = enabled;
                Ok(())
            }
            None => Err(SceneError::UnknownComponent { object: self.id, name: name.to_string() }),
        }
    }

    /// Set the own flag and every component flag
    ///
    /// A started component that goes from enabled to disabled gets one last
    /// `on_update`, with its context reporting it disabled, so it can observe
    /// the transition before going idle. Children are handled by
    /// [`Scene::set_enabled`](super::Scene::set_enabled).
    pub fn apply_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;

        for slot in &mut self.components {
            let was_enabled = slot.enabled;
            slot.enabled = enabled;
            if was_enabled && !enabled {
                let mut ctx = ComponentContext::new(
                    self.id,
                    false,
                    0.0,
                    &mut self.transform,
                    &self.engine,
                    &mut self.delayed,
                );
                slot.component.on_update(&mut ctx);
            }
        }
        for slot in &mut self.delayed {
            slot.enabled = enabled;
        }
    }

    /// Per-frame component dispatch
    ///
    /// Starts and attaches every waiting component first, then updates all
    /// enabled components in container order.
    pub fn execute_components(&mut self, delta_time: f32) {
        self.attach_delayed(delta_time);

        for slot in &mut self.components {
            if !slot.enabled {
                continue;
            }
            let mut ctx = ComponentContext::new(
                self.id,
                slot.enabled,
                delta_time,
                &mut self.transform,
                &self.engine,
                &mut self.delayed,
            );
            slot.component.on_update(&mut ctx);
        }
    }

    fn attach_delayed(&mut self, delta_time: f32) {
        if self.delayed.is_empty() {
            return;
        }

        for mut slot in std::mem::take(&mut self.delayed) {
            if self.components.iter().any(|attached| attached.name == slot.name) {
                log::warn!(
                    "Dropped component '{}' on '{}': name already in use",
                    slot.name,
                    self.name
                );
                continue;
            }
            let mut ctx = ComponentContext::new(
                self.id,
                slot.enabled,
                delta_time,
                &mut self.transform,
                &self.engine,
                &mut self.delayed,
            );
            slot.component.on_start(&mut ctx);
            self.components.push(slot);
        }
    }

    /// Notify every component of its destruction and release all components
    ///
    /// Components still waiting for attachment are started first, so each
    /// one sees `on_start` before `on_destroy`. Components added by an
    /// `on_destroy` hook are dropped.
    pub fn destroy_components(&mut self) {
        while !self.delayed.is_empty() {
            self.attach_delayed(0.0);
        }

        let mut slots = std::mem::take(&mut self.components);
        for slot in &mut slots {
            let mut ctx = ComponentContext::new(
                self.id,
                slot.enabled,
                0.0,
                &mut self.transform,
                &self.engine,
                &mut self.delayed,
            );
            slot.component.on_destroy(&mut ctx);
        }
        self.delayed.clear();
    }
}

impl GraphNode for GameObject {
    type Links = DirectedNodeBase;

    fn id(&self) -> NodeId {
        self.id
    }

    fn incidence(&self) -> &DirectedNodeBase {
        &self.links
    }

    fn incidence_mut(&mut self) -> &mut DirectedNodeBase {
        &mut self.links
    }
}

impl fmt::Debug for GameObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameObject")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("enabled", &self.enabled)
            .field("components", &self.component_names())
            .field("pending_components", &self.delayed.len())
            .field("parent", &self.parent)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::testing::{Journal, Tracer};

    fn object(name: &str) -> GameObject {
        GameObject::new(name, EngineContext::new())
    }

    #[test]
    fn test_components_start_before_first_update() {
        let journal = Journal::default();
        let mut obj = object("player");
        obj.add_component("tracer", Tracer::new("tracer", &journal)).unwrap();
        assert_eq!(obj.component_count(), 0);
        assert_eq!(obj.pending_component_count(), 1);

        obj.execute_components(0.016);
        obj.execute_components(0.016);

        assert_eq!(journal.entries(), vec!["tracer:start", "tracer:update", "tracer:update"]);
        assert_eq!(obj.component_names(), vec!["tracer"]);
    }

    #[test]
    fn test_component_names_are_unique() {
        let journal = Journal::default();
        let mut obj = object("player");
        obj.add_component("tracer", Tracer::new("tracer", &journal)).unwrap();

        let err = obj.add_component("tracer", Tracer::new("again", &journal)).unwrap_err();
        assert_eq!(err, SceneError::DuplicateComponent { object: obj.id(), name: "tracer".into() });

        obj.execute_components(0.0);
        assert!(obj.add_component("tracer", Tracer::new("again", &journal)).is_err());
    }

    #[test]
    fn test_update_follows_insertion_order() {
        let journal = Journal::default();
        let mut obj = object("player");
        for name in ["c", "a", "b"] {
            obj.add_component(name, Tracer::new(name, &journal)).unwrap();
        }
        obj.execute_components(0.0);
        journal.clear();

        obj.execute_components(0.0);
        assert_eq!(journal.entries(), vec!["c:update", "a:update", "b:update"]);
    }

    #[test]
    fn test_disabled_components_are_not_updated() {
        let journal = Journal::default();
        let mut obj = object("player");
        obj.add_component("tracer", Tracer::new("tracer", &journal)).unwrap();
        obj.execute_components(0.0);
        journal.clear();

        obj.set_component_enabled("tracer", false).unwrap();
        obj.execute_components(0.0);

        assert!(journal.entries().is_empty());
        assert_eq!(obj.is_component_enabled("tracer"), Some(false));
        assert!(obj.set_component_enabled("missing", true).is_err());
    }

    #[test]
    fn test_apply_disabled_forces_one_final_update() {
        let journal = Journal::default();
        let mut obj = object("player");
        obj.add_component("tracer", Tracer::new("tracer", &journal)).unwrap();
        obj.execute_components(0.0);
        journal.clear();

        obj.apply_enabled(false);
        obj.apply_enabled(false);

        assert_eq!(journal.entries(), vec!["tracer:update(disabled)"]);
        assert!(!obj.is_enabled());
        assert_eq!(obj.is_component_enabled("tracer"), Some(false));

        journal.clear();
        obj.apply_enabled(true);
        assert!(journal.entries().is_empty());
        assert_eq!(obj.is_component_enabled("tracer"), Some(true));
    }

    #[test]
    fn test_set_enabled_leaves_components_alone() {
        let journal = Journal::default();
        let mut obj = object("player");
        obj.add_component("tracer", Tracer::new("tracer", &journal)).unwrap();
        obj.execute_components(0.0);

        obj.set_enabled(false);
        assert!(!obj.is_enabled());
        assert_eq!(obj.is_component_enabled("tracer"), Some(true));
    }

    #[test]
    fn test_components_added_during_update_start_next_call() {
        let journal = Journal::default();
        let mut obj = object("spawner");
        obj.add_component("parent", Tracer::new("parent", &journal).spawning("child")).unwrap();

        obj.execute_components(0.0);
        assert_eq!(obj.component_names(), vec!["parent"]);
        assert_eq!(obj.pending_component_count(), 1);

        obj.execute_components(0.0);
        assert_eq!(obj.component_names(), vec!["parent", "child"]);
        assert!(journal.entries().contains(&"child:start".to_string()));
    }

    #[test]
    fn test_destroy_notifies_every_component_once() {
        let journal = Journal::default();
        let mut obj = object("player");
        obj.add_component("started", Tracer::new("started", &journal)).unwrap();
        obj.execute_components(0.0);
        obj.add_component("waiting", Tracer::new("waiting", &journal)).unwrap();
        journal.clear();

        obj.destroy_components();
        obj.destroy_components();

        assert_eq!(
            journal.entries(),
            vec!["waiting:start", "started:destroy", "waiting:destroy"]
        );
        assert_eq!(obj.component_count(), 0);
        assert_eq!(obj.pending_component_count(), 0);
    }

    #[test]
    fn test_destroy_reaches_components_of_never_updated_objects() {
        let journal = Journal::default();
        let mut obj = object("hidden");
        obj.set_enabled(false);
        obj.add_component("tracer", Tracer::new("hidden", &journal)).unwrap();

        obj.destroy_components();
        assert_eq!(journal.entries(), vec!["hidden:start", "hidden:destroy"]);
    }

    #[test]
    fn test_remove_component() {
        let journal = Journal::default();
        let mut obj = object("player");
        obj.add_component("tracer", Tracer::new("tracer", &journal)).unwrap();
        obj.execute_components(0.0);
        journal.clear();

        obj.remove_component("tracer").unwrap();
        assert_eq!(journal.entries(), vec!["tracer:destroy"]);
        assert!(!obj.has_component("tracer"));
        assert!(obj.remove_component("tracer").is_err());
    }

    #[test]
    fn test_root_has_no_parent() {
        let mut obj = object("root");
        obj.find_parent(&EdgeStore::with_key());
        assert_eq!(obj.parent(), None);
    }
}
