//! Unconstrained graph specialization

use std::ops::Deref;

use super::{EdgeBase, EdgeKey, GraphAlgorithm, GraphBase, GraphError, GraphNode, NodeKey};

/// Graph that accepts arbitrary edges between stored nodes
///
/// Read access goes through `Deref` to [`GraphBase`].
#[derive(Debug)]
pub struct SimpleGraph<N: GraphNode> {
    base: GraphBase<N>,
}

impl<N: GraphNode> SimpleGraph<N> {
    /// Create an empty graph
    pub fn new() -> Self {
        Self { base: GraphBase::new() }
    }

    /// Insert a node; the first one becomes root
    pub fn add_node(&mut self, node: N) -> Result<NodeKey, GraphError> {
        self.base.add_node(node)
    }

    /// Insert a node connected from a stored node
    pub fn add_node_connected(&mut self, in_graph: NodeKey, node: N) -> Result<NodeKey, GraphError> {
        self.base.add_node_connected(in_graph, node)
    }

    /// Make a stored node the root
    pub fn set_root_node(&mut self, key: NodeKey) -> Result<(), GraphError> {
        self.base.set_root(key)
    }

    /// Add a constructed edge
    pub fn add_edge(&mut self, edge: EdgeBase) -> Result<EdgeKey, GraphError> {
        self.base.insert_edge(edge)
    }

    /// Add an edge from `src` to `dst`
    pub fn connect(&mut self, src: NodeKey, dst: NodeKey) -> Result<EdgeKey, GraphError> {
        self.base.insert_edge(EdgeBase::new(src, dst))
    }

    /// Mutable node stored under `key`
    pub fn node_mut(&mut self, key: NodeKey) -> Option<&mut N> {
        self.base.node_mut(key)
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

impl<N: GraphNode> Default for SimpleGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: GraphNode> Deref for SimpleGraph<N> {
    type Target = GraphBase<N>;

    fn deref(&self) -> &GraphBase<N> {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_nodes::Plain;

    #[test]
    fn test_root_stays_until_reassigned() {
        let mut graph = SimpleGraph::new();
        let a = graph.add_node(Plain::new("a")).unwrap();
        for label in ["b", "c", "d"] {
            graph.add_node(Plain::new(label)).unwrap();
        }
        assert_eq!(graph.root(), Some(a));

        let e = graph.add_node(Plain::new("e")).unwrap();
        graph.set_root_node(e).unwrap();
        assert_eq!(graph.root(), Some(e));
    }

    #[test]
    fn test_set_root_requires_stored_node() {
        let mut donor = SimpleGraph::new();
        let foreign = donor.add_node(Plain::new("x")).unwrap();

        let mut graph = SimpleGraph::new();
        let a = graph.add_node(Plain::new("a")).unwrap();

        assert_eq!(graph.set_root_node(foreign), Err(GraphError::NodeNotInGraph(foreign)));
        assert_eq!(graph.root(), Some(a));
    }

    #[test]
    fn test_both_edge_overloads_share_validation() {
        let mut graph = SimpleGraph::new();
        let a = graph.add_node(Plain::new("a")).unwrap();
        let b = graph.add_node(Plain::new("b")).unwrap();
        let c = graph.add_node(Plain::new("c")).unwrap();

        graph.add_edge(EdgeBase::new(a, b)).unwrap();
        graph.connect(b, c).unwrap();

        assert!(graph.connect(a, b).is_err());
        assert!(graph.add_edge(EdgeBase::new(b, c)).is_err());
        assert!(graph.connect(c, c).is_err());
        assert_eq!(graph.edge_count(), 2);

        let a_links = &graph.node(a).unwrap().links;
        assert!(a_links.is_connected_to(a, b, graph.edges()));
        assert!(!a_links.is_connected_to(a, c, graph.edges()));
    }
}
