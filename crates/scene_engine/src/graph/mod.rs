//! Generic graph core
//!
//! Provides the owning graph containers the scene hierarchy is built on. A
//! graph is the single owner of its nodes and edges; everything else refers
//! to them through generation-checked keys, so a key that outlives its slot
//! resolves to `None` instead of aliasing a newer node.
//!
//! ## Architecture
//!
//! ```text
//! NodeKey             slot plus the GraphId of the issuing graph
//! EdgeBase            immutable (src, dst) pair of NodeKeys
//! NodeBase            undirected incident-edge list
//! DirectedNodeBase    incoming / outgoing edge lists
//!      ↓
//! GraphBase<N>        node + edge arenas, root tracking, validation
//!      ↓
//! SimpleGraph<N>      arbitrary edges, explicit root reassignment
//! TreeGraph<N>        single-parent growth only
//!      ↓
//! GraphAlgorithm      resettable traversal functors (DepthFirstSearch)
//! ```

pub mod algorithm;
mod edge;
mod error;
mod graph_base;
mod node;
mod simple;
mod tree;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use slotmap::SlotMap;

pub use algorithm::{DepthFirstSearch, GraphAlgorithm, TraversalState};
pub use edge::EdgeBase;
pub use error::GraphError;
pub use graph_base::GraphBase;
pub use node::{DirectedNodeBase, GraphNode, Incidence, NodeBase};
pub use simple::SimpleGraph;
pub use tree::TreeGraph;

slotmap::new_key_type! {
    /// Slot inside one graph's node arena
    pub(crate) struct NodeSlot;

    /// Generation-checked reference to an edge slot inside a graph
    pub struct EdgeKey;
}

/// Identity of a graph container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphId(u64);

impl GraphId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for GraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "graph#{}", self.0)
    }
}

/// Generation-checked reference to a node slot
///
/// A key is bound to the graph that issued it. Any other graph resolves it
/// to nothing, even one holding a live node in the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    graph: GraphId,
    slot: NodeSlot,
}

impl NodeKey {
    pub(crate) fn new(graph: GraphId, slot: NodeSlot) -> Self {
        Self { graph, slot }
    }

    /// Graph that issued this key
    pub fn graph(&self) -> GraphId {
        self.graph
    }
}

/// Edge arena owned by a graph
pub type EdgeStore = SlotMap<EdgeKey, EdgeBase>;

/// Object identity of a node
///
/// Allocated once when the node object is constructed. Two node values with
/// the same `NodeId` are two references to the same object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Allocate a fresh, process-unique node identity
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value, for diagnostics
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Object identity of an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(u64);

impl EdgeId {
    /// Allocate a fresh, process-unique edge identity
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value, for diagnostics
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "edge#{}", self.0)
    }
}
