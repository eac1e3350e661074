//! Edge implementation

use std::hash::{Hash, Hasher};

use super::{EdgeId, NodeKey};

/// Immutable directed connection between two nodes of the same graph
///
/// Both endpoints are non-owning keys into the graph's node arena. Equality
/// and hashing use the edge's own identity: two edges joining the same pair
/// of nodes are still different edges. Cloning an edge yields a second
/// reference to the same edge.
#[derive(Debug, Clone)]
pub struct EdgeBase {
    id: EdgeId,
    src: NodeKey,
    dst: NodeKey,
}

impl EdgeBase {
    /// Create a new edge from `src` to `dst`
    pub fn new(src: NodeKey, dst: NodeKey) -> Self {
        Self { id: EdgeId::next(), src, dst }
    }

    /// Edge identity
    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// Source end
    pub fn src_node(&self) -> NodeKey {
        self.src
    }

    /// Destination end
    pub fn dst_node(&self) -> NodeKey {
        self.dst
    }

    /// The end opposite to `given`, or `None` if `given` is not an end of this edge
    pub fn other_end(&self, given: NodeKey) -> Option<NodeKey> {
        if given == self.src {
            Some(self.dst)
        } else if given == self.dst {
            Some(self.src)
        } else {
            None
        }
    }

    /// Whether this edge runs from `src` to `dst`
    pub fn connects(&self, src: NodeKey, dst: NodeKey) -> bool {
        self.src == src && self.dst == dst
    }

    /// Whether `node` is one of the two ends
    pub fn touches(&self, node: NodeKey) -> bool {
        self.src == node || self.dst == node
    }
}

impl PartialEq for EdgeBase {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EdgeBase {}

impl Hash for EdgeBase {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::test_nodes::detached_keys;

    fn three_keys() -> (NodeKey, NodeKey, NodeKey) {
        let keys = detached_keys(3);
        (keys[0], keys[1], keys[2])
    }

    #[test]
    fn test_other_end_round_trip() {
        let (a, b, stranger) = three_keys();
        let edge = EdgeBase::new(a, b);

        assert_eq!(edge.other_end(edge.src_node()), Some(edge.dst_node()));
        assert_eq!(edge.other_end(edge.dst_node()), Some(edge.src_node()));
        assert_eq!(edge.other_end(stranger), None);
    }

    #[test]
    fn test_equality_is_identity() {
        let (a, b, _) = three_keys();
        let first = EdgeBase::new(a, b);
        let second = EdgeBase::new(a, b);
        let alias = first.clone();

        assert_ne!(first, second);
        assert_eq!(first, alias);
    }

    #[test]
    fn test_direction_queries() {
        let (a, b, c) = three_keys();
        let edge = EdgeBase::new(a, b);

        assert!(edge.connects(a, b));
        assert!(!edge.connects(b, a));
        assert!(edge.touches(b));
        assert!(!edge.touches(c));
    }
}
