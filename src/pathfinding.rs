//! Dijkstra's and A* search on top of an [`ExtrinsicMinPQ`]
//!
//! The search loop is the classic edge-relaxation pattern that motivates a
//! queue with `change_priority`: the start node is added with priority 0, the
//! frontier node with the smallest tentative distance is removed next, and
//! whenever a shorter path to a neighbor is found the neighbor is either added
//! or has its priority lowered in place.
//!
//! # Design
//!
//! Only lightweight indices are queued. A hash map (FxHash) maps node states to
//! their index, and a dense table keeps each node's best known distance,
//! predecessor, and whether it has been settled.
//!
//! Any queue implementing [`ExtrinsicMinPQ<NodeIndex>`] can drive the search,
//! which lets the optimized and reference queues be compared on the same
//! graphs.
//!
//! # Example
//!
//! ```rust
//! use extrinsic_minpq::pathfinding::{dijkstra, SearchNode};
//! use extrinsic_minpq::OptimizedHeapMinPQ;
//!
//! #[derive(Clone, PartialEq, Eq, Hash)]
//! struct Step { at: u32, goal: u32 }
//!
//! impl SearchNode for Step {
//!     fn successors(&self) -> Vec<(Self, f64)> {
//!         vec![
//!             (Step { at: self.at + 1, goal: self.goal }, 1.0),
//!             (Step { at: self.at + 2, goal: self.goal }, 1.5),
//!         ]
//!     }
//!
//!     fn is_goal(&self) -> bool {
//!         self.at == self.goal
//!     }
//! }
//!
//! let start = Step { at: 0, goal: 4 };
//! let (path, cost) = dijkstra::<_, OptimizedHeapMinPQ<_>>(&start).unwrap().unwrap();
//! assert_eq!(cost, 3.0);
//! assert_eq!(path.len(), 3);
//! ```

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::traits::{ExtrinsicMinPQ, QueueError};

/// Index of a discovered node; this is what the queue stores.
pub type NodeIndex = usize;

/// Error type for graph searches
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchError {
    /// An edge weight was negative or NaN
    InvalidEdgeWeight(f64),
    /// A search cost bound was NaN
    InvalidCostBound(f64),
    /// The underlying queue rejected an operation
    Queue(QueueError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::InvalidEdgeWeight(w) => {
                write!(f, "edge weight {w} is not a non-negative number")
            }
            SearchError::InvalidCostBound(b) => write!(f, "cost bound {b} is not a number"),
            SearchError::Queue(e) => write!(f, "queue error: {e}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::Queue(e) => Some(e),
            SearchError::InvalidEdgeWeight(_) | SearchError::InvalidCostBound(_) => None,
        }
    }
}

impl From<QueueError> for SearchError {
    fn from(e: QueueError) -> Self {
        SearchError::Queue(e)
    }
}

/// Trait for nodes in a search graph.
///
/// The node carries all context needed to generate its successors and to
/// decide whether it is a goal.
pub trait SearchNode: Clone + Eq + Hash {
    /// Returns every neighbor along with the (non-negative) cost of reaching it.
    fn successors(&self) -> Vec<(Self, f64)>;

    /// Returns true if this node is a goal state.
    fn is_goal(&self) -> bool;
}

/// Nodes that can estimate their remaining distance to a goal, for A*.
///
/// The estimate must never exceed the true remaining cost, or A* may return a
/// suboptimal path.
pub trait AStarNode: SearchNode {
    fn heuristic(&self) -> f64;
}

/// Bookkeeping for one discovered node
#[derive(Debug, Clone)]
struct NodeEntry<N> {
    node: N,
    /// Best known distance from the start
    g_score: f64,
    came_from: Option<NodeIndex>,
    /// Removed from the queue; `g_score` is final
    closed: bool,
}

/// Discovered nodes, indexed densely in discovery order
#[derive(Debug, Clone)]
struct PathFinder<N: SearchNode> {
    nodes: Vec<NodeEntry<N>>,
    state_to_index: FxHashMap<N, NodeIndex>,
}

impl<N: SearchNode> PathFinder<N> {
    fn new() -> Self {
        PathFinder {
            nodes: Vec::new(),
            state_to_index: FxHashMap::default(),
        }
    }

    /// Gets or creates the index for a node state.
    fn index_of(&mut self, node: N) -> NodeIndex {
        if let Some(&index) = self.state_to_index.get(&node) {
            return index;
        }
        let index = self.nodes.len();
        self.state_to_index.insert(node.clone(), index);
        self.nodes.push(NodeEntry {
            node,
            g_score: f64::INFINITY,
            came_from: None,
            closed: false,
        });
        index
    }

    fn settled(&self, node: &N) -> Option<&NodeEntry<N>> {
        self.state_to_index
            .get(node)
            .map(|&index| &self.nodes[index])
            .filter(|entry| entry.closed)
    }

    /// Walks predecessor links back to the start.
    fn reconstruct_path(&self, mut current: NodeIndex) -> Vec<N> {
        let mut path = vec![self.nodes[current].node.clone()];
        while let Some(prev) = self.nodes[current].came_from {
            path.push(self.nodes[prev].node.clone());
            current = prev;
        }
        path.reverse();
        path
    }
}

/// Search configuration shared by the public entry points
struct SearchLimits {
    stop_at_goal: bool,
    max_cost: f64,
}

/// Runs the relaxation loop, returning the discovered nodes and the goal's
/// index if one was reached.
fn search_impl<N, Q>(
    start: &N,
    heuristic: impl Fn(&N) -> f64,
    limits: SearchLimits,
) -> Result<(PathFinder<N>, Option<NodeIndex>), SearchError>
where
    N: SearchNode,
    Q: ExtrinsicMinPQ<NodeIndex>,
{
    let mut open = Q::new();
    let mut finder = PathFinder::new();

    let start_index = finder.index_of(start.clone());
    finder.nodes[start_index].g_score = 0.0;
    open.add(start_index, heuristic(start))?;

    while let Ok(current) = open.remove_min() {
        let entry = &mut finder.nodes[current];
        if entry.g_score > limits.max_cost {
            continue;
        }
        entry.closed = true;
        let current_node = entry.node.clone();
        let current_g = entry.g_score;

        if limits.stop_at_goal && current_node.is_goal() {
            log::debug!(
                "goal reached at cost {current_g} after discovering {} nodes",
                finder.nodes.len()
            );
            return Ok((finder, Some(current)));
        }

        for (neighbor, weight) in current_node.successors() {
            if weight.is_nan() || weight < 0.0 {
                return Err(SearchError::InvalidEdgeWeight(weight));
            }
            let tentative_g = current_g + weight;
            if tentative_g > limits.max_cost {
                continue;
            }

            let h = heuristic(&neighbor);
            let neighbor_index = finder.index_of(neighbor);
            let neighbor_entry = &mut finder.nodes[neighbor_index];
            if neighbor_entry.closed || tentative_g >= neighbor_entry.g_score {
                continue;
            }

            neighbor_entry.g_score = tentative_g;
            neighbor_entry.came_from = Some(current);
            log::trace!("relax {current} -> {neighbor_index}: {tentative_g}");
            open.add_or_change_priority(neighbor_index, tentative_g + h)?;
        }
    }

    log::debug!("frontier exhausted after discovering {} nodes", finder.nodes.len());
    Ok((finder, None))
}

/// Runs Dijkstra's algorithm from `start` until a node's `is_goal()` is true.
///
/// # Type Parameters
/// - `N`: the node type
/// - `Q`: the queue used for the frontier
///
/// # Returns
/// - `Ok(Some((path, cost)))` with the path from start to goal (inclusive)
/// - `Ok(None)` if no goal is reachable
///
/// # Errors
/// [`SearchError::InvalidEdgeWeight`] if a negative or NaN edge weight is seen.
pub fn dijkstra<N, Q>(start: &N) -> Result<Option<(Vec<N>, f64)>, SearchError>
where
    N: SearchNode,
    Q: ExtrinsicMinPQ<NodeIndex>,
{
    let limits = SearchLimits {
        stop_at_goal: true,
        max_cost: f64::INFINITY,
    };
    let (finder, goal) = search_impl::<N, Q>(start, |_| 0.0, limits)?;
    Ok(goal.map(|index| (finder.reconstruct_path(index), finder.nodes[index].g_score)))
}

/// Runs A* search from `start`, guided by the node's `heuristic()`.
///
/// # Errors
/// [`SearchError::InvalidEdgeWeight`] if a negative or NaN edge weight is seen,
/// or [`SearchError::Queue`] if the heuristic returns NaN.
pub fn astar<N, Q>(start: &N) -> Result<Option<(Vec<N>, f64)>, SearchError>
where
    N: AStarNode,
    Q: ExtrinsicMinPQ<NodeIndex>,
{
    let limits = SearchLimits {
        stop_at_goal: true,
        max_cost: f64::INFINITY,
    };
    let (finder, goal) = search_impl::<N, Q>(start, |n| n.heuristic(), limits)?;
    Ok(goal.map(|index| (finder.reconstruct_path(index), finder.nodes[index].g_score)))
}

/// Shortest distances and paths from one start node to everything reachable
#[derive(Debug, Clone)]
pub struct ShortestPaths<N: SearchNode> {
    finder: PathFinder<N>,
}

impl<N: SearchNode> ShortestPaths<N> {
    /// Distance from the start to `node`, or `None` if unreachable
    pub fn distance_to(&self, node: &N) -> Option<f64> {
        self.finder.settled(node).map(|entry| entry.g_score)
    }

    /// Shortest path from the start to `node` (inclusive), or `None` if unreachable
    pub fn path_to(&self, node: &N) -> Option<Vec<N>> {
        let index = *self.finder.state_to_index.get(node)?;
        self.finder.nodes[index]
            .closed
            .then(|| self.finder.reconstruct_path(index))
    }

    /// Number of reachable nodes, the start included
    pub fn len(&self) -> usize {
        self.finder.nodes.iter().filter(|entry| entry.closed).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reachable nodes with their distances, in discovery order
    pub fn iter(&self) -> impl Iterator<Item = (&N, f64)> {
        self.finder
            .nodes
            .iter()
            .filter(|entry| entry.closed)
            .map(|entry| (&entry.node, entry.g_score))
    }
}

/// Computes the shortest-path tree from `start` to every reachable node.
///
/// Goals are ignored; the search runs until the frontier is empty, so the
/// graph reachable from `start` must be finite.
pub fn shortest_path_tree<N, Q>(start: &N) -> Result<ShortestPaths<N>, SearchError>
where
    N: SearchNode,
    Q: ExtrinsicMinPQ<NodeIndex>,
{
    let limits = SearchLimits {
        stop_at_goal: false,
        max_cost: f64::INFINITY,
    };
    let (finder, _) = search_impl::<N, Q>(start, |_| 0.0, limits)?;
    Ok(ShortestPaths { finder })
}

/// Returns every node reachable from `start` at a cost of at most `max_cost`,
/// with its distance, nearest first.
///
/// A negative `max_cost` reaches nothing, not even `start`.
///
/// # Errors
/// [`SearchError::InvalidCostBound`] if `max_cost` is NaN, or
/// [`SearchError::InvalidEdgeWeight`] if a negative or NaN edge weight is seen.
pub fn reachable_within<N, Q>(start: &N, max_cost: f64) -> Result<Vec<(N, f64)>, SearchError>
where
    N: SearchNode,
    Q: ExtrinsicMinPQ<NodeIndex>,
{
    if max_cost.is_nan() {
        return Err(SearchError::InvalidCostBound(max_cost));
    }
    let limits = SearchLimits {
        stop_at_goal: false,
        max_cost,
    };
    let (finder, _) = search_impl::<N, Q>(start, |_| 0.0, limits)?;
    let mut reached: Vec<(N, f64)> = finder
        .nodes
        .into_iter()
        .filter(|entry| entry.closed)
        .map(|entry| (entry.node, entry.g_score))
        .collect();
    reached.sort_by(|a, b| a.1.total_cmp(&b.1));
    Ok(reached)
}
