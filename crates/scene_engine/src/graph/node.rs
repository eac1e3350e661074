//! Node implementations
//!
//! Nodes never own edges. They keep `EdgeKey`s into the graph's edge arena,
//! one list for undirected nodes and an incoming/outgoing split for directed
//! nodes. Duplicate detection is a linear scan over the stored keys, which is
//! O(degree); scene nodes have few incident edges.

use super::{EdgeBase, EdgeKey, EdgeStore, GraphError, NodeId, NodeKey};

/// Incident-edge storage a graph can route new edges into
///
/// This is the neighbour-iteration capability the traversal algorithms are
/// written against.
pub trait Incidence {
    /// Record `edge` (stored under `key`) as incident to the node at `owner`
    ///
    /// Returns `false` if the edge was already recorded or does not touch
    /// `owner`.
    fn record_edge(&mut self, owner: NodeKey, key: EdgeKey, edge: &EdgeBase) -> bool;

    /// Edges a traversal may follow away from this node
    fn traversal_edges(&self) -> &[EdgeKey];

    /// Every incident edge, regardless of direction
    fn incident_edges(&self) -> Vec<EdgeKey>;

    /// Whether `key` is recorded on this node
    fn has_edge(&self, key: EdgeKey) -> bool;
}

/// A value that can be stored in a [`GraphBase`](super::GraphBase)
pub trait GraphNode {
    /// Incident-edge storage embedded in the node
    type Links: Incidence;

    /// Object identity of this node
    fn id(&self) -> NodeId;

    /// Read access to the incident edges
    fn incidence(&self) -> &Self::Links;

    /// Write access to the incident edges
    fn incidence_mut(&mut self) -> &mut Self::Links;
}

fn checked_index(edges: &[EdgeKey], index: usize) -> Result<EdgeKey, GraphError> {
    edges
        .get(index)
        .copied()
        .ok_or(GraphError::EdgeIndexOutOfRange { index, len: edges.len() })
}

/// Undirected node storage: one combined incident-edge list
#[derive(Debug, Clone, Default)]
pub struct NodeBase {
    edges: Vec<EdgeKey>,
}

impl NodeBase {
    /// Create an empty node
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an edge reference; `false` if it is already stored
    pub fn connect(&mut self, edge: EdgeKey) -> bool {
        if self.edges.contains(&edge) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    /// Stored edges in insertion order
    pub fn edges(&self) -> &[EdgeKey] {
        &self.edges
    }

    /// Number of incident edges
    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    /// Bounds-checked indexed access
    pub fn edge_at(&self, index: usize) -> Result<EdgeKey, GraphError> {
        checked_index(&self.edges, index)
    }

    /// Whether any incident edge has `other` at its far end
    ///
    /// `this` must be the key this node is stored under.
    pub fn is_connected_to(&self, this: NodeKey, other: NodeKey, edges: &EdgeStore) -> bool {
        self.edges
            .iter()
            .filter_map(|key| edges.get(*key))
            .any(|edge| edge.other_end(this) == Some(other))
    }
}

impl Incidence for NodeBase {
    fn record_edge(&mut self, owner: NodeKey, key: EdgeKey, edge: &EdgeBase) -> bool {
        edge.touches(owner) && self.connect(key)
    }

    fn traversal_edges(&self) -> &[EdgeKey] {
        &self.edges
    }

    fn incident_edges(&self) -> Vec<EdgeKey> {
        self.edges.clone()
    }

    fn has_edge(&self, key: EdgeKey) -> bool {
        self.edges.contains(&key)
    }
}

/// Directed node storage: separate incoming and outgoing edge lists
#[derive(Debug, Clone, Default)]
pub struct DirectedNodeBase {
    incoming: Vec<EdgeKey>,
    outgoing: Vec<EdgeKey>,
}

impl DirectedNodeBase {
    /// Create an empty node
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an incoming edge reference; `false` if it is already stored
    pub fn connect_incoming(&mut self, edge: EdgeKey) -> bool {
        if self.incoming.contains(&edge) {
            return false;
        }
        self.incoming.push(edge);
        true
    }

    /// Add an outgoing edge reference; `false` if it is already stored
    pub fn connect_outgoing(&mut self, edge: EdgeKey) -> bool {
        if self.outgoing.contains(&edge) {
            return false;
        }
        self.outgoing.push(edge);
        true
    }

    /// Incoming edges in insertion order
    pub fn incoming(&self) -> &[EdgeKey] {
        &self.incoming
    }

    /// Outgoing edges in insertion order
    pub fn outgoing(&self) -> &[EdgeKey] {
        &self.outgoing
    }

    /// Bounds-checked access to the incoming list
    pub fn incoming_at(&self, index: usize) -> Result<EdgeKey, GraphError> {
        checked_index(&self.incoming, index)
    }

    /// Bounds-checked access to the outgoing list
    pub fn outgoing_at(&self, index: usize) -> Result<EdgeKey, GraphError> {
        checked_index(&self.outgoing, index)
    }

    /// Whether an outgoing edge leads from `this` to `other`
    ///
    /// Only the `this → other` direction is checked: `false` does not rule
    /// out an edge from `other` back to `this`.
    pub fn is_connected_to(&self, this: NodeKey, other: NodeKey, edges: &EdgeStore) -> bool {
        self.outgoing
            .iter()
            .filter_map(|key| edges.get(*key))
            .any(|edge| edge.connects(this, other))
    }
}

impl Incidence for DirectedNodeBase {
    fn record_edge(&mut self, owner: NodeKey, key: EdgeKey, edge: &EdgeBase) -> bool {
        if edge.src_node() == owner {
            self.connect_outgoing(key)
        } else if edge.dst_node() == owner {
            self.connect_incoming(key)
        } else {
            false
        }
    }

    fn traversal_edges(&self) -> &[EdgeKey] {
        &self.outgoing
    }

    fn incident_edges(&self) -> Vec<EdgeKey> {
        self.incoming.iter().chain(&self.outgoing).copied().collect()
    }

    fn has_edge(&self, key: EdgeKey) -> bool {
        self.incoming.contains(&key) || self.outgoing.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_nodes::detached_keys;

    fn arena() -> (NodeKey, NodeKey, EdgeStore, EdgeKey) {
        let keys = detached_keys(2);
        let (a, b) = (keys[0], keys[1]);
        let mut edges = EdgeStore::with_key();
        let ab = edges.insert(EdgeBase::new(a, b));
        (a, b, edges, ab)
    }

    #[test]
    fn test_undirected_connect_rejects_duplicates() {
        let (_, _, _, ab) = arena();
        let mut node = NodeBase::new();

        assert!(node.connect(ab));
        assert!(!node.connect(ab));
        assert_eq!(node.degree(), 1);
    }

    #[test]
    fn test_undirected_connection_is_symmetric() {
        let (a, b, edges, ab) = arena();
        let mut node_a = NodeBase::new();
        let mut node_b = NodeBase::new();
        assert!(node_a.record_edge(a, ab, &edges[ab]));
        assert!(node_b.record_edge(b, ab, &edges[ab]));

        assert!(node_a.is_connected_to(a, b, &edges));
        assert!(node_b.is_connected_to(b, a, &edges));
    }

    #[test]
    fn test_directed_connection_has_direction() {
        let (a, b, edges, ab) = arena();
        let mut node_a = DirectedNodeBase::new();
        let mut node_b = DirectedNodeBase::new();
        assert!(node_a.record_edge(a, ab, &edges[ab]));
        assert!(node_b.record_edge(b, ab, &edges[ab]));

        assert_eq!(node_a.outgoing(), &[ab]);
        assert_eq!(node_b.incoming(), &[ab]);
        assert!(node_a.is_connected_to(a, b, &edges));
        assert!(!node_b.is_connected_to(b, a, &edges));
        assert!(node_b.traversal_edges().is_empty());
    }

    #[test]
    fn test_record_edge_ignores_foreign_edges() {
        let keys = detached_keys(3);
        let (a, b, stranger) = (keys[0], keys[1], keys[2]);
        let mut edges = EdgeStore::with_key();
        let ab = edges.insert(EdgeBase::new(a, b));

        let mut node = DirectedNodeBase::new();
        assert!(!node.record_edge(stranger, ab, &edges[ab]));
        assert!(!node.has_edge(ab));
    }

    #[test]
    fn test_indexed_access_is_bounds_checked() {
        let (_, _, _, ab) = arena();
        let mut node = DirectedNodeBase::new();
        node.connect_outgoing(ab);

        assert_eq!(node.outgoing_at(0), Ok(ab));
        assert_eq!(
            node.outgoing_at(1),
            Err(GraphError::EdgeIndexOutOfRange { index: 1, len: 1 })
        );
        assert_eq!(
            node.incoming_at(0),
            Err(GraphError::EdgeIndexOutOfRange { index: 0, len: 0 })
        );
        assert!(NodeBase::new().edge_at(0).is_err());
    }
}
