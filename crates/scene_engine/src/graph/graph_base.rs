//! Owning graph container shared by all graph specializations

use std::collections::HashMap;

use slotmap::SlotMap;

use super::{
    EdgeBase, EdgeId, EdgeKey, EdgeStore, GraphAlgorithm, GraphError, GraphId, GraphNode,
    Incidence, NodeId, NodeKey, NodeSlot,
};

/// Owner of a set of nodes and the edges between them
///
/// Nodes and edges live in generational arenas; nodes and edges refer to
/// each other only through keys. The first node inserted becomes the root.
/// Node keys carry the graph's [`GraphId`], so a key issued by another graph
/// is treated as absent.
///
/// Every rejected operation logs a warning, returns an error and leaves the
/// graph exactly as it was.
#[derive(Debug)]
pub struct GraphBase<N: GraphNode> {
    id: GraphId,
    nodes: SlotMap<NodeSlot, N>,
    edges: EdgeStore,
    node_index: HashMap<NodeId, NodeKey>,
    edge_index: HashMap<EdgeId, EdgeKey>,
    root: Option<NodeKey>,
}

impl<N: GraphNode> GraphBase<N> {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create an empty graph with room for `nodes` nodes (and as many edges)
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            id: GraphId::next(),
            nodes: SlotMap::with_capacity_and_key(nodes),
            edges: SlotMap::with_capacity_and_key(nodes),
            node_index: HashMap::with_capacity(nodes),
            edge_index: HashMap::with_capacity(nodes),
            root: None,
        }
    }

    /// Create a graph holding only `root`
    pub fn with_root(root: N, capacity: usize) -> (Self, NodeKey) {
        let mut graph = Self::with_capacity(capacity);
        let id = root.id();
        let key = NodeKey::new(graph.id, graph.nodes.insert(root));
        graph.node_index.insert(id, key);
        graph.root = Some(key);
        (graph, key)
    }

    /// Insert a node
    ///
    /// Fails if a node with the same identity is already stored. The first
    /// node inserted into an empty graph becomes the root.
    pub fn add_node(&mut self, node: N) -> Result<NodeKey, GraphError> {
        let id = node.id();
        if self.node_index.contains_key(&id) {
            log::warn!("Rejected add_node: {} is already in the graph", id);
            return Err(GraphError::DuplicateNode(id));
        }

        let key = NodeKey::new(self.id, self.nodes.insert(node));
        self.node_index.insert(id, key);
        if self.root.is_none() {
            log::debug!("{} became the graph root", id);
            self.root = Some(key);
        }
        Ok(key)
    }

    /// Insert `node` together with an edge from `in_graph` to it
    ///
    /// Atomic: either the node and the edge are both stored or neither is.
    pub fn add_node_connected(&mut self, in_graph: NodeKey, node: N) -> Result<NodeKey, GraphError> {
        if !self.contains_key(in_graph) {
            log::warn!("Rejected add_node_connected: anchor {:?} is not in the graph", in_graph);
            return Err(GraphError::NodeNotInGraph(in_graph));
        }

        let key = self.add_node(node)?;
        if let Err(err) = self.insert_edge(EdgeBase::new(in_graph, key)) {
            self.discard_node(key);
            return Err(err);
        }
        Ok(key)
    }

    /// Validate and store an edge
    ///
    /// Rejects edges whose ends are missing or identical, edges duplicating
    /// an existing `src → dst` connection, and edge objects already stored.
    pub(crate) fn insert_edge(&mut self, edge: EdgeBase) -> Result<EdgeKey, GraphError> {
        let (src, dst) = (edge.src_node(), edge.dst_node());

        let rejection = if self.edge_index.contains_key(&edge.id()) {
            Some(GraphError::DuplicateEdge(edge.id()))
        } else if !self.contains_key(src) {
            Some(GraphError::NodeNotInGraph(src))
        } else if !self.contains_key(dst) {
            Some(GraphError::NodeNotInGraph(dst))
        } else if src == dst {
            Some(GraphError::SelfLoop(src))
        } else if self.edge_between(src, dst).is_some() {
            Some(GraphError::EdgeAlreadyConnected { src, dst })
        } else {
            None
        };
        if let Some(err) = rejection {
            log::warn!("Rejected edge {}: {}", edge.id(), err);
            return Err(err);
        }

        let id = edge.id();
        let key = self.edges.insert(edge);
        self.edge_index.insert(id, key);

        let stored = &self.edges[key];
        for end in [src, dst] {
            if let Some(node) = self.nodes.get_mut(end.slot) {
                node.incidence_mut().record_edge(end, key, stored);
            }
        }
        Ok(key)
    }

    /// Remove a node that has no edges yet; used to roll back a failed insertion
    fn discard_node(&mut self, key: NodeKey) {
        if let Some(node) = self.local(key).and_then(|slot| self.nodes.remove(slot)) {
            self.node_index.remove(&node.id());
        }
        if self.root == Some(key) {
            self.root = None;
        }
    }

    /// Reassign the root; the node must already be stored
    pub(crate) fn set_root(&mut self, key: NodeKey) -> Result<(), GraphError> {
        if !self.contains_key(key) {
            log::warn!("Rejected set_root: {:?} is not in the graph", key);
            return Err(GraphError::NodeNotInGraph(key));
        }
        self.root = Some(key);
        Ok(())
    }

    /// The edge running directly from `src` to `dst`, if any
    pub fn edge_between(&self, src: NodeKey, dst: NodeKey) -> Option<EdgeKey> {
        let node = self.node(src)?;
        node.incidence()
            .incident_edges()
            .into_iter()
            .find(|key| self.edges.get(*key).is_some_and(|edge| edge.connects(src, dst)))
    }

    /// Whether an edge runs directly from `src` to `dst`
    pub fn is_connected(&self, src: NodeKey, dst: NodeKey) -> bool {
        self.edge_between(src, dst).is_some()
    }

    /// Nodes reachable in one step along this node's traversal edges, in edge order
    pub fn neighbours(&self, key: NodeKey) -> Vec<NodeKey> {
        self.node(key).map_or_else(Vec::new, |node| {
            node.incidence()
                .traversal_edges()
                .iter()
                .filter_map(|edge| self.edges.get(*edge))
                .filter_map(|edge| edge.other_end(key))
                .collect()
        })
    }

    /// Visit every stored node, in storage order
    ///
    /// Connectivity is ignored; this is a housekeeping sweep, not a
    /// hierarchy walk.
    pub fn visit_nodes(&self, mut visitor: impl FnMut(NodeKey, &N)) {
        for (slot, node) in &self.nodes {
            visitor(NodeKey::new(self.id, slot), node);
        }
    }

    /// Mutable variant of [`visit_nodes`](Self::visit_nodes)
    pub fn visit_nodes_mut(&mut self, mut visitor: impl FnMut(NodeKey, &mut N)) {
        let id = self.id;
        for (slot, node) in &mut self.nodes {
            visitor(NodeKey::new(id, slot), node);
        }
    }

    /// Visit every stored edge, in storage order
    pub fn visit_edges(&self, mut visitor: impl FnMut(EdgeKey, &EdgeBase)) {
        for (key, edge) in &self.edges {
            visitor(key, edge);
        }
    }

    /// Run `algorithm` starting at the root; `None` if the graph is empty
    pub fn visit_from_root<A: GraphAlgorithm<N>>(&mut self, algorithm: &mut A) -> Option<A::Output> {
        let root = self.root?;
        Some(algorithm.run(self, root))
    }

    /// Run `algorithm` starting at `start`; `None` if `start` is not stored
    pub fn visit_from<A: GraphAlgorithm<N>>(
        &mut self,
        start: NodeKey,
        algorithm: &mut A,
    ) -> Option<A::Output> {
        if !self.contains_key(start) {
            return None;
        }
        Some(algorithm.run(self, start))
    }

    /// Whether the graph holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of stored nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of stored edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Identity of this graph
    pub fn id(&self) -> GraphId {
        self.id
    }

    /// Current root
    pub fn root(&self) -> Option<NodeKey> {
        self.root
    }

    /// Node stored under `key`
    pub fn node(&self, key: NodeKey) -> Option<&N> {
        self.nodes.get(self.local(key)?)
    }

    /// Mutable node stored under `key`
    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut N> {
        let slot = self.local(key)?;
        self.nodes.get_mut(slot)
    }

    /// Mutable node together with read access to the edge arena
    pub fn node_with_edges_mut(&mut self, key: NodeKey) -> Option<(&mut N, &EdgeStore)> {
        let slot = self.local(key)?;
        let node = self.nodes.get_mut(slot)?;
        Some((node, &self.edges))
    }

    /// Edge stored under `key`
    pub fn edge(&self, key: EdgeKey) -> Option<&EdgeBase> {
        self.edges.get(key)
    }

    /// The edge arena
    pub fn edges(&self) -> &EdgeStore {
        &self.edges
    }

    /// Key of the node with identity `id`
    pub fn key_of(&self, id: NodeId) -> Option<NodeKey> {
        self.node_index.get(&id).copied()
    }

    /// Whether `key` was issued by this graph and refers to a live node
    pub fn contains_key(&self, key: NodeKey) -> bool {
        self.local(key).is_some_and(|slot| self.nodes.contains_key(slot))
    }

    /// Arena slot of `key`, if this graph issued it
    fn local(&self, key: NodeKey) -> Option<NodeSlot> {
        (key.graph == self.id).then_some(key.slot)
    }

    /// Whether a node with identity `id` is stored
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.node_index.contains_key(&id)
    }

    /// Whether an edge object with identity `id` is stored
    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edge_index.contains_key(&id)
    }
}

impl<N: GraphNode> Default for GraphBase<N> {
    fn default() -> Self {
        Self::new()
    }
}
