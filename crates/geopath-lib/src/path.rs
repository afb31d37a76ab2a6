use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};

/// Shared flag that lets another thread stop a running search.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, AtomicOrdering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(AtomicOrdering::Relaxed)
    }
}

/// Bounds applied to a single search. Cancellation and the deadline are
/// checked whenever a node is taken from the frontier; the expansion budget
/// is checked before a node's neighbours are relaxed.
#[derive(Debug, Clone, Default)]
pub struct SearchLimits {
    /// Abort with [`Error::SearchDeadlineExceeded`] once this instant passes.
    pub deadline: Option<Instant>,
    /// Abort with [`Error::SearchCancelled`] once the token is cancelled.
    pub cancellation: Option<CancellationToken>,
    /// Abort with [`Error::ExpansionLimitReached`] after this many expansions.
    pub max_expansions: Option<usize>,
}

impl SearchLimits {
    fn check_interrupted(&self) -> Result<()> {
        if let Some(token) = &self.cancellation {
            if token.is_cancelled() {
                return Err(Error::SearchCancelled);
            }
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(Error::SearchDeadlineExceeded);
            }
        }
        Ok(())
    }

    fn check_budget(&self, expansions: usize) -> Result<()> {
        if let Some(limit) = self.max_expansions {
            if expansions >= limit {
                return Err(Error::ExpansionLimitReached { limit });
            }
        }
        Ok(())
    }
}

/// Find a path from `start` to `goal` with A*, guided by the haversine
/// distance to `goal`.
///
/// Returns `Ok(None)` when `goal` is unreachable. Edges without a recorded
/// length are weighted by the same haversine distance, so on graphs that
/// contain such edges the result is a close approximation rather than a
/// guaranteed shortest path.
pub fn find_path(graph: &Graph, start: NodeId, goal: NodeId) -> Result<Option<Vec<NodeId>>> {
    find_path_with(graph, start, goal, &SearchLimits::default())
}

/// Run A* search bounded by `limits`.
pub fn find_path_with(
    graph: &Graph,
    start: NodeId,
    goal: NodeId,
    limits: &SearchLimits,
) -> Result<Option<Vec<NodeId>>> {
    search(graph, start, goal, limits, |graph, node| {
        graph.straight_line(node, goal)
    })
}

/// Run Dijkstra's algorithm, which yields an exact shortest path regardless
/// of which edges carry recorded lengths.
pub fn find_path_dijkstra(
    graph: &Graph,
    start: NodeId,
    goal: NodeId,
) -> Result<Option<Vec<NodeId>>> {
    find_path_dijkstra_with(graph, start, goal, &SearchLimits::default())
}

/// Run Dijkstra's algorithm bounded by `limits`.
pub fn find_path_dijkstra_with(
    graph: &Graph,
    start: NodeId,
    goal: NodeId,
    limits: &SearchLimits,
) -> Result<Option<Vec<NodeId>>> {
    search(graph, start, goal, limits, |_, _| 0.0)
}

fn search<H>(
    graph: &Graph,
    start: NodeId,
    goal: NodeId,
    limits: &SearchLimits,
    heuristic: H,
) -> Result<Option<Vec<NodeId>>>
where
    H: Fn(&Graph, NodeId) -> f64,
{
    for id in [start, goal] {
        if !graph.contains(id) {
            return Err(Error::NodeNotFound { id });
        }
    }
    if start == goal {
        return Ok(Some(vec![start]));
    }

    let mut state = SearchState::default();
    state.g_score.insert(start, 0.0);
    state.push(start, 0.0, heuristic(graph, start));

    while let Some(entry) = state.frontier.pop() {
        if let Err(err) = limits.check_interrupted() {
            warn!(start, goal, expansions = state.expansions, %err, "search aborted");
            return Err(err);
        }

        let current_score = match state.g_score.get(&entry.node) {
            Some(score) if *score < entry.cost.0 => continue,
            Some(score) => *score,
            None => continue,
        };

        if entry.node == goal {
            debug!(start, goal, expansions = state.expansions, "path found");
            return Ok(Some(state.reconstruct_path(start, goal)));
        }
        if let Err(err) = limits.check_budget(state.expansions) {
            warn!(start, goal, expansions = state.expansions, %err, "search aborted");
            return Err(err);
        }
        state.expansions += 1;

        for edge in graph.neighbours(entry.node) {
            let next = edge.target;
            let tentative_g = current_score + graph.weight_of(entry.node, edge);
            if tentative_g < state.best(next) {
                state.g_score.insert(next, tentative_g);
                state.parents.insert(next, entry.node);
                state.push(next, tentative_g, heuristic(graph, next));
            }
        }
    }

    debug!(start, goal, expansions = state.expansions, "goal unreachable");
    Ok(None)
}

/// Bookkeeping owned by a single search call.
#[derive(Debug, Default)]
struct SearchState {
    g_score: HashMap<NodeId, f64>,
    parents: HashMap<NodeId, NodeId>,
    frontier: BinaryHeap<FrontierEntry>,
    sequence: u64,
    expansions: usize,
}

impl SearchState {
    /// Best known cost from the start; unseen nodes are infinitely far.
    fn best(&self, node: NodeId) -> f64 {
        self.g_score.get(&node).copied().unwrap_or(f64::INFINITY)
    }

    fn push(&mut self, node: NodeId, cost: f64, heuristic: f64) {
        self.frontier
            .push(FrontierEntry::new(node, cost, heuristic, self.sequence));
        self.sequence += 1;
    }

    fn reconstruct_path(&self, start: NodeId, goal: NodeId) -> Vec<NodeId> {
        let mut path = vec![goal];
        let mut current = goal;
        while current != start {
            match self.parents.get(&current) {
                Some(&parent) => {
                    path.push(parent);
                    current = parent;
                }
                None => break,
            }
        }
        path.reverse();
        path
    }
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Frontier entry ordered by estimated total cost, then by insertion
/// sequence so that equal estimates are expanded first-in first-out.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct FrontierEntry {
    node: NodeId,
    cost: FloatOrd,
    estimate: FloatOrd,
    sequence: u64,
}

impl FrontierEntry {
    fn new(node: NodeId, cost: f64, heuristic: f64, sequence: u64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
            sequence,
        }
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap.
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
