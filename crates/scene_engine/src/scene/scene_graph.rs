//! Scene: the tree of game objects
//!
//! A scene is a [`TreeGraph`] of [`GameObject`]s with a root created along
//! with it. Every hierarchy walk (the per-frame update, name search, state
//! propagation) is a [`DepthFirstSearch`] along outgoing edges, optionally
//! pruning disabled subtrees.

use super::{EngineContext, GameObject, GameObjectId, SceneError};
use crate::core::config::SceneConfig;
use crate::foundation::math::Transform;
use crate::graph::{DepthFirstSearch, GraphNode, NodeKey, TraversalState, TreeGraph};

impl<F> DepthFirstSearch<GameObject, F>
where
    F: FnMut(NodeKey, &mut GameObject),
{
    /// Hierarchy walk over a scene
    ///
    /// With `ignore_disabled` a disabled game object is skipped together with
    /// its whole subtree, whatever the state of its descendants.
    pub fn for_scene(ignore_disabled: bool, callback: F) -> Self {
        let search = Self::new(callback);
        if ignore_disabled {
            search.skipping(is_disabled)
        } else {
            search
        }
    }
}

fn is_disabled(object: &GameObject) -> bool {
    !object.is_enabled()
}

/// A named hierarchy of game objects
///
/// Sole owner of its objects. Dropping the scene notifies every component
/// through `on_destroy`.
#[derive(Debug)]
pub struct Scene {
    name: String,
    graph: TreeGraph<GameObject>,
    root: NodeKey,
    root_id: GameObjectId,
    traversal: TraversalState,
}

impl Scene {
    /// Create a scene with the default configuration
    pub fn new(name: impl Into<String>, engine: &EngineContext) -> Self {
        Self::with_config(name, engine, &SceneConfig::default())
    }

    /// Create a scene whose root and arena sizes follow `config`
    pub fn with_config(name: impl Into<String>, engine: &EngineContext, config: &SceneConfig) -> Self {
        let name = name.into();
        let root = GameObject::new(config.root_name.clone(), engine.clone());
        let root_id = root.id();
        let (graph, root) = TreeGraph::with_root(root, config.expected_objects);

        log::info!("Created scene '{}'", name);
        Self { name, graph, root, root_id, traversal: TraversalState::default() }
    }

    /// Scene name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle of the root object
    pub fn root_id(&self) -> GameObjectId {
        self.root_id
    }

    /// Read access to the underlying tree
    pub fn graph(&self) -> &TreeGraph<GameObject> {
        &self.graph
    }

    /// Number of objects, root included
    pub fn object_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Attach `object` directly under the root
    pub fn add(&mut self, object: GameObject) -> Result<GameObjectId, SceneError> {
        self.insert(self.root, object)
    }

    /// Attach `object` under the game object `parent`, which must be in the scene
    pub fn attach(&mut self, parent: GameObjectId, object: GameObject) -> Result<GameObjectId, SceneError> {
        let Some(parent_key) = self.graph.key_of(parent) else {
            log::warn!("Cannot attach '{}': parent {} is not in scene '{}'", object.name(), parent, self.name);
            return Err(SceneError::ParentNotFound(parent));
        };
        self.insert(parent_key, object)
    }

    fn insert(&mut self, parent: NodeKey, object: GameObject) -> Result<GameObjectId, SceneError> {
        let id = object.id();
        let key = self.graph.add_node_connected(parent, object)?;
        if let Some((object, edges)) = self.graph.node_with_edges_mut(key) {
            object.find_parent(edges);
            log::debug!("Added '{}' ({}) to scene '{}'", object.name(), id, self.name);
        }
        Ok(id)
    }

    /// Graph key of a game object
    pub fn key_of(&self, id: GameObjectId) -> Option<NodeKey> {
        self.graph.key_of(id)
    }

    /// Whether the object is part of this scene
    pub fn contains(&self, id: GameObjectId) -> bool {
        self.graph.contains_node(id)
    }

    /// Game object behind `id`
    pub fn get(&self, id: GameObjectId) -> Option<&GameObject> {
        self.graph.key_of(id).and_then(|key| self.graph.node(key))
    }

    /// Mutable game object behind `id`
    pub fn get_mut(&mut self, id: GameObjectId) -> Option<&mut GameObject> {
        let key = self.graph.key_of(id)?;
        self.graph.node_mut(key)
    }

    /// Parent handle; `None` for the root and for unknown objects
    pub fn parent_of(&self, id: GameObjectId) -> Option<GameObjectId> {
        let key = self.graph.key_of(id)?;
        let parent = self.graph.parent_of(key)?;
        self.graph.node(parent).map(GraphNode::id)
    }

    /// Direct children, in attachment order
    pub fn children_of(&self, id: GameObjectId) -> Vec<GameObjectId> {
        let Some(key) = self.graph.key_of(id) else {
            return Vec::new();
        };
        self.graph
            .children_of(key)
            .into_iter()
            .filter_map(|child| self.graph.node(child))
            .map(GraphNode::id)
            .collect()
    }

    /// Run one frame of component updates
    ///
    /// Every enabled object reachable from the root through enabled ancestors
    /// executes its components, parents before children. Returns the number
    /// of objects updated.
    pub fn update(&mut self, delta_time: f32) -> usize {
        self.walk(true, |object| object.execute_components(delta_time))
    }

    /// Depth-first walk from the root, parents before children
    ///
    /// Returns the number of objects handed to `callback`.
    pub fn walk(&mut self, ignore_disabled: bool, callback: impl FnMut(&mut GameObject)) -> usize {
        self.walk_subtree(self.root, ignore_disabled, callback)
    }

    /// Depth-first walk of the subtree rooted at `start`
    ///
    /// Returns 0 when `start` is not in the scene.
    pub fn walk_from(
        &mut self,
        start: GameObjectId,
        ignore_disabled: bool,
        callback: impl FnMut(&mut GameObject),
    ) -> usize {
        match self.graph.key_of(start) {
            Some(key) => self.walk_subtree(key, ignore_disabled, callback),
            None => 0,
        }
    }

    fn walk_subtree(
        &mut self,
        start: NodeKey,
        ignore_disabled: bool,
        mut callback: impl FnMut(&mut GameObject),
    ) -> usize {
        let mut search = DepthFirstSearch::for_scene(ignore_disabled, |_, object: &mut GameObject| {
            callback(object)
        })
        .reusing(std::mem::take(&mut self.traversal));
        let visited = self.graph.visit_from(start, &mut search).unwrap_or(0);
        self.traversal = search.into_state();
        visited
    }

    /// Handles in walk order
    pub fn walk_ids(&mut self, ignore_disabled: bool) -> Vec<GameObjectId> {
        let mut ids = Vec::new();
        self.walk(ignore_disabled, |object| ids.push(object.id()));
        ids
    }

    /// Every object called `name`, disabled subtrees included, in walk order
    pub fn find_by_name(&mut self, name: &str) -> Vec<GameObjectId> {
        let mut found = Vec::new();
        self.walk(false, |object| {
            if object.name() == name {
                found.push(object.id());
            }
        });
        found
    }

    /// Enable or disable a game object
    ///
    /// Without `apply_recursively` only the object's own flag changes. With
    /// it the object, its components and every descendant (disabled ones
    /// included) take the new state.
    pub fn set_enabled(
        &mut self,
        id: GameObjectId,
        enabled: bool,
        apply_recursively: bool,
    ) -> Result<(), SceneError> {
        let Some(key) = self.graph.key_of(id) else {
            log::warn!("Cannot change state of {}: not in scene '{}'", id, self.name);
            return Err(SceneError::UnknownGameObject(id));
        };

        if apply_recursively {
            self.walk_subtree(key, false, |object| object.apply_enabled(enabled));
        } else if let Some(object) = self.graph.node_mut(key) {
            object.set_enabled(enabled);
        }
        Ok(())
    }

    /// Transform of an object relative to the scene root
    pub fn world_transform(&self, id: GameObjectId) -> Option<Transform> {
        let mut key = self.graph.key_of(id)?;
        let mut world = self.graph.node(key)?.transform().clone();
        while let Some(parent) = self.graph.parent_of(key) {
            world = self.graph.node(parent)?.transform().combine(&world);
            key = parent;
        }
        Some(world)
    }

    /// Notify every component of every object that the scene is going away
    ///
    /// Runs once; objects stay in place but lose their components.
    pub fn destroy(&mut self) {
        self.graph.visit_nodes_mut(|_, object| object.destroy_components());
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        log::debug!("Destroying scene '{}' ({} objects)", self.name, self.graph.node_count());
        self.destroy();
    }
}
