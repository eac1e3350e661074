//! Graph errors

use thiserror::Error;

use super::{EdgeId, NodeId, NodeKey};

/// Structural-invariant violations reported by graph operations
///
/// A failed operation never leaves the graph partially modified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The node identity is already stored in the graph
    #[error("{0} is already part of the graph")]
    DuplicateNode(NodeId),

    /// A referenced node is not stored in the graph
    #[error("node {0:?} is not part of the graph")]
    NodeNotInGraph(NodeKey),

    /// The edge object was already added
    #[error("{0} was already added to the graph")]
    DuplicateEdge(EdgeId),

    /// An edge already directly connects the same ordered pair
    #[error("nodes {src:?} and {dst:?} are already connected")]
    EdgeAlreadyConnected {
        /// Source end
        src: NodeKey,
        /// Destination end
        dst: NodeKey,
    },

    /// Both ends of the edge are the same node
    #[error("edge would connect node {0:?} to itself")]
    SelfLoop(NodeKey),

    /// A tree already has a root; growth must go through connected insertion
    #[error("tree already has a root; attach the node to an existing node instead")]
    RootAlreadySet,

    /// Indexed edge access outside the stored range
    #[error("edge index {index} out of range (node has {len} edges)")]
    EdgeIndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of stored edges
        len: usize,
    },
}
