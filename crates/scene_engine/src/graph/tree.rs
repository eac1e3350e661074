//! Single-parent graph specialization

use std::ops::Deref;

use super::{EdgeStore, GraphAlgorithm, GraphBase, GraphError, GraphNode, Incidence, NodeKey};

/// Graph restricted to tree growth
///
/// The first node becomes the root through [`add_node`](Self::add_node);
/// after that every node joins through
/// [`add_node_connected`](Self::add_node_connected), so each node except the
/// root has exactly one incoming edge and there is a single path to the root.
/// There is no API that adds a bare edge, which keeps the structure acyclic.
#[derive(Debug)]
pub struct TreeGraph<N: GraphNode> {
    base: GraphBase<N>,
}

impl<N: GraphNode> TreeGraph<N> {
    /// Create an empty tree
    pub fn new() -> Self {
        Self { base: GraphBase::new() }
    }

    /// Create a tree with `root` already in place
    pub fn with_root(root: N, capacity: usize) -> (Self, NodeKey) {
        let (base, key) = GraphBase::with_root(root, capacity);
        (Self { base }, key)
    }

    /// Establish the root; fails once the tree is non-empty
    pub fn add_node(&mut self, node: N) -> Result<NodeKey, GraphError> {
        if !self.base.is_empty() {
            log::warn!("Rejected add_node on {}: tree already has a root", node.id());
            return Err(GraphError::RootAlreadySet);
        }
        self.base.add_node(node)
    }

    /// Attach `node` as a child of the stored node `parent`
    pub fn add_node_connected(&mut self, parent: NodeKey, node: N) -> Result<NodeKey, GraphError> {
        self.base.add_node_connected(parent, node)
    }

    /// The node `key` hangs from; `None` for the root or unknown keys
    pub fn parent_of(&self, key: NodeKey) -> Option<NodeKey> {
        let node = self.base.node(key)?;
        node.incidence()
            .incident_edges()
            .into_iter()
            .filter_map(|edge| self.base.edge(edge))
            .find(|edge| edge.dst_node() == key)
            .map(|edge| edge.src_node())
    }

    /// Direct children of `key`, in attachment order
    pub fn children_of(&self, key: NodeKey) -> Vec<NodeKey> {
        self.base.neighbours(key)
    }

    /// Mutable node stored under `key`
    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut N> {
        self.base.node_mut(key)
    }

    /// Mutable node together with read access to the edge arena
    pub fn node_with_edges_mut(&mut self, key: NodeKey) -> Option<(&mut N, &EdgeStore)> {
        self.base.node_with_edges_mut(key)
    }

    /// Mutable sweep over every stored node
    pub fn visit_nodes_mut(&mut self, visitor: impl FnMut(NodeKey, &mut N)) {
        self.base.visit_nodes_mut(visitor);
    }

    /// Run `algorithm` from the root
    pub fn visit_from_root<A: GraphAlgorithm<N>>(&mut self, algorithm: &mut A) -> Option<A::Output> {
        self.base.visit_from_root(algorithm)
    }

    /// Run `algorithm` from `start`
    pub fn visit_from<A: GraphAlgorithm<N>>(
        &mut self,
        start: NodeKey,
        algorithm: &mut A,
    ) -> Option<A::Output> {
        self.base.visit_from(start, algorithm)
    }
}

impl<N: GraphNode> Default for TreeGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: GraphNode> Deref for TreeGraph<N> {
    type Target = GraphBase<N>;

    fn deref(&self) -> &GraphBase<N> {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_nodes::Directed;

    #[test]
    fn test_second_add_node_fails() {
        let mut tree = TreeGraph::new();
        let root = tree.add_node(Directed::new("root")).unwrap();

        assert_eq!(tree.add_node(Directed::new("other")), Err(GraphError::RootAlreadySet));
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.root(), Some(root));
    }

    #[test]
    fn test_growth_through_connected_insertion() {
        let mut tree = TreeGraph::new();
        let root = tree.add_node(Directed::new("root")).unwrap();
        let a = tree.add_node_connected(root, Directed::new("a")).unwrap();
        let b = tree.add_node_connected(a, Directed::new("b")).unwrap();
        let c = tree.add_node_connected(root, Directed::new("c")).unwrap();

        assert_eq!(tree.parent_of(root), None);
        assert_eq!(tree.parent_of(a), Some(root));
        assert_eq!(tree.parent_of(b), Some(a));
        assert_eq!(tree.children_of(root), vec![a, c]);
    }

    #[test]
    fn test_every_node_has_at_most_one_incoming_edge() {
        let (mut tree, root) = TreeGraph::with_root(Directed::new("root"), 8);
        let a = tree.add_node_connected(root, Directed::new("a")).unwrap();
        let _b = tree.add_node_connected(a, Directed::new("b")).unwrap();
        let _c = tree.add_node_connected(a, Directed::new("c")).unwrap();

        tree.visit_nodes(|key, node| {
            let expected = usize::from(key != root);
            assert_eq!(node.links.incoming().len(), expected);
        });
    }

    #[test]
    fn test_attach_requires_present_parent() {
        let mut donor = TreeGraph::new();
        let donor_root = donor.add_node(Directed::new("donor")).unwrap();

        let mut tree = TreeGraph::new();
        let root = tree.add_node(Directed::new("root")).unwrap();

        assert_eq!(
            tree.add_node_connected(donor_root, Directed::new("orphan")),
            Err(GraphError::NodeNotInGraph(donor_root))
        );
        assert_eq!(tree.node_count(), 1);
        assert!(tree.children_of(root).is_empty());
        assert_eq!(tree.parent_of(donor_root), None);
    }
}
