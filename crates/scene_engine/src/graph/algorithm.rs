//! Traversal algorithms
//!
//! Algorithms are stateful functors: they keep their bookkeeping between
//! runs and are cleared with [`GraphAlgorithm::reset`], so the same instance
//! can be reused frame after frame without reallocating.

use std::collections::HashSet;

use super::{GraphBase, GraphNode, Incidence, NodeKey};

/// A resettable algorithm that runs over a graph from a start node
pub trait GraphAlgorithm<N: GraphNode> {
    /// Result of one run
    type Output;

    /// Run from `start`, which must be stored in `graph`
    fn run(&mut self, graph: &mut GraphBase<N>, start: NodeKey) -> Self::Output;

    /// Forget all state gathered by previous runs
    fn reset(&mut self);
}

/// Depth-first pre-order traversal
///
/// Each reachable node is handed to the callback once, parents before
/// children. Neighbours come from [`Incidence::traversal_edges`]: every
/// incident edge for undirected nodes, outgoing edges only for directed
/// nodes, so a directed walk never climbs back towards the start.
///
/// Siblings are visited in the order their edges were added. Callers should
/// treat that order as unspecified.
///
/// A node rejected by the skip predicate is not handed to the callback and
/// none of its descendants are reached through it. It still counts as
/// visited for the current run.
///
/// The walk uses an explicit stack and the visited set doubles as a cycle
/// guard, so neither deep hierarchies nor malformed cyclic graphs can
/// overflow the call stack.
pub struct DepthFirstSearch<N, F> {
    state: TraversalState,
    callback: F,
    skip: Option<fn(&N) -> bool>,
}

impl<N, F> DepthFirstSearch<N, F>
where
    N: GraphNode,
    F: FnMut(NodeKey, &mut N),
{
    /// Create a traversal that hands every reachable node to `callback`
    pub fn new(callback: F) -> Self {
        Self {
            state: TraversalState::default(),
            callback,
            skip: None,
        }
    }

    /// Run on the buffers of an earlier traversal instead of fresh ones
    ///
    /// `state` is cleared first, so only its allocations carry over.
    pub fn reusing(mut self, mut state: TraversalState) -> Self {
        state.clear();
        self.state = state;
        self
    }

    /// Clear the bookkeeping and hand it back for the next traversal
    pub fn into_state(self) -> TraversalState {
        let mut state = self.state;
        state.clear();
        state
    }

    /// Prune every node for which `predicate` returns `true`, with its subtree
    pub fn skipping(mut self, predicate: fn(&N) -> bool) -> Self {
        self.skip = Some(predicate);
        self
    }

    /// Whether `key` was reached since the last reset
    pub fn has_visited(&self, key: NodeKey) -> bool {
        self.state.visited.contains(&key)
    }

    /// Number of nodes reached since the last reset, skipped ones included
    pub fn visited_count(&self) -> usize {
        self.state.visited.len()
    }
}

impl<N, F> GraphAlgorithm<N> for DepthFirstSearch<N, F>
where
    N: GraphNode,
    F: FnMut(NodeKey, &mut N),
{
    /// Number of nodes handed to the callback
    type Output = usize;

    fn run(&mut self, graph: &mut GraphBase<N>, start: NodeKey) -> usize {
        let mut delivered = 0;
        let mut next = Vec::new();

        let state = &mut self.state;
        state.stack.clear();
        state.stack.push(start);
        while let Some(key) = state.stack.pop() {
            if !state.visited.insert(key) {
                continue;
            }
            let Some((node, edges)) = graph.node_with_edges_mut(key) else {
                continue;
            };
            if self.skip.is_some_and(|skip| skip(node)) {
                continue;
            }

            (self.callback)(key, node);
            delivered += 1;

            next.clear();
            next.extend(
                node.incidence()
                    .traversal_edges()
                    .iter()
                    .filter_map(|edge| edges.get(*edge))
                    .filter_map(|edge| edge.other_end(key)),
            );
            // Reversed so the first child is popped first
            let visited = &state.visited;
            state
                .stack
                .extend(next.iter().rev().filter(|neighbour| !visited.contains(*neighbour)));
        }
        delivered
    }

    fn reset(&mut self) {
        self.state.clear();
    }
}

/// Visited set and work stack of a [`DepthFirstSearch`]
///
/// Kept by owners that walk the same graph every frame with a different
/// callback each time; see [`DepthFirstSearch::reusing`].
#[derive(Debug, Default)]
pub struct TraversalState {
    visited: HashSet<NodeKey>,
    stack: Vec<NodeKey>,
}

impl TraversalState {
    fn clear(&mut self) {
        self.visited.clear();
        self.stack.clear();
    }

    /// Slots currently allocated for the visited set
    pub fn capacity(&self) -> usize {
        self.visited.capacity()
    }
}
