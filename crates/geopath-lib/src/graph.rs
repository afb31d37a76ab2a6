use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::{haversine_distance, GeoPoint};

/// Numeric identifier for a road-network node.
pub type NodeId = i64;

/// Whether edges are one-way or traversable in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphKind {
    #[default]
    Directed,
    Undirected,
}

/// Node within the road network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub position: GeoPoint,
}

/// Outgoing edge within the road network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub target: NodeId,
    /// Recorded length in metres. When absent the haversine distance between
    /// the endpoints is used instead.
    pub length: Option<f64>,
}

#[derive(Debug, Default)]
struct GraphInner {
    nodes: HashMap<NodeId, Node>,
    adjacency: HashMap<NodeId, Vec<Edge>>,
    edge_count: usize,
    implicit_lengths: bool,
}

/// Immutable road-network graph used by the pathfinding algorithms.
///
/// Clones share the same storage, so a graph can be handed to several
/// threads that each run their own searches.
#[derive(Debug, Clone)]
pub struct Graph {
    kind: GraphKind,
    inner: Arc<GraphInner>,
}

impl Graph {
    /// Start building a graph of the given kind.
    pub fn builder(kind: GraphKind) -> GraphBuilder {
        GraphBuilder::new(kind)
    }

    /// Edge semantics this graph was built with.
    pub fn kind(&self) -> GraphKind {
        self.kind
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.inner.nodes.get(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.inner.nodes.contains_key(&id)
    }

    pub fn position(&self, id: NodeId) -> Option<GeoPoint> {
        self.inner.nodes.get(&id).map(|node| node.position)
    }

    pub fn node_count(&self) -> usize {
        self.inner.nodes.len()
    }

    /// Number of stored directed edges. An undirected edge counts twice.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count
    }

    /// Iterate over all nodes in unspecified order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.inner.nodes.values()
    }

    /// Every outgoing edge of `id`, parallel edges included, in insertion
    /// order.
    pub fn edges(&self, id: NodeId) -> &[Edge] {
        self.inner
            .adjacency
            .get(&id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Outgoing edges of `id` with one edge per distinct neighbour.
    ///
    /// When several parallel edges lead to the same neighbour, the first one
    /// inserted is returned and the rest are ignored.
    pub fn neighbours(&self, id: NodeId) -> impl Iterator<Item = &Edge> {
        let mut seen = HashSet::new();
        self.edges(id)
            .iter()
            .filter(move |edge| seen.insert(edge.target))
    }

    /// First edge inserted from `from` to `to`, if any.
    pub fn edge_between(&self, from: NodeId, to: NodeId) -> Option<&Edge> {
        self.edges(from).iter().find(|edge| edge.target == to)
    }

    /// Weight the search assigns to `edge` leaving `from`: its recorded
    /// length, or the haversine distance between the endpoints.
    pub fn weight_of(&self, from: NodeId, edge: &Edge) -> f64 {
        edge.length
            .unwrap_or_else(|| self.straight_line(from, edge.target))
    }

    /// Weight of the edge `from -> to` chosen by the parallel edge policy.
    pub fn edge_weight(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.edge_between(from, to)
            .map(|edge| self.weight_of(from, edge))
    }

    /// Total weight along `path`, or `None` if two consecutive nodes are not
    /// connected.
    pub fn path_length(&self, path: &[NodeId]) -> Option<f64> {
        path.windows(2)
            .map(|pair| self.edge_weight(pair[0], pair[1]))
            .sum()
    }

    /// `true` when at least one edge lacks a recorded length, which makes A*
    /// results approximate rather than guaranteed optimal.
    pub fn has_implicit_lengths(&self) -> bool {
        self.inner.implicit_lengths
    }

    /// Closest node to `point` by great-circle distance, with its distance in
    /// metres. Ties resolve to the smallest identifier.
    pub fn nearest_node(&self, point: &GeoPoint) -> Option<(NodeId, f64)> {
        self.inner
            .nodes
            .values()
            .map(|node| (node.id, haversine_distance(&node.position, point)))
            .min_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)))
    }

    /// Haversine distance between two nodes; zero if either is unknown.
    pub(crate) fn straight_line(&self, from: NodeId, to: NodeId) -> f64 {
        match (self.position(from), self.position(to)) {
            (Some(a), Some(b)) => haversine_distance(&a, &b),
            _ => 0.0,
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self {
            kind: GraphKind::Directed,
            inner: Arc::new(GraphInner::default()),
        }
    }
}

/// Incremental constructor for [`Graph`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    kind: GraphKind,
    inner: GraphInner,
}

impl GraphBuilder {
    pub fn new(kind: GraphKind) -> Self {
        Self {
            kind,
            inner: GraphInner::default(),
        }
    }

    /// Insert a node. Identifiers must be unique.
    pub fn add_node(&mut self, id: NodeId, position: GeoPoint) -> Result<&mut Self> {
        if self.inner.nodes.contains_key(&id) {
            return Err(Error::DuplicateNode { id });
        }
        self.inner.nodes.insert(id, Node { id, position });
        Ok(self)
    }

    /// Insert an edge between two previously added nodes.
    ///
    /// Undirected graphs store the edge in both directions. Parallel edges
    /// are kept in insertion order.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, length: Option<f64>) -> Result<&mut Self> {
        for missing in [from, to] {
            if !self.inner.nodes.contains_key(&missing) {
                return Err(Error::UnknownEdgeEndpoint { from, to, missing });
            }
        }
        if let Some(length) = length {
            if !length.is_finite() || length < 0.0 {
                return Err(Error::InvalidEdgeLength { from, to, length });
            }
        }

        self.push_edge(from, to, length);
        if self.kind == GraphKind::Undirected && from != to {
            self.push_edge(to, from, length);
        }
        if length.is_none() {
            self.inner.implicit_lengths = true;
        }
        Ok(self)
    }

    fn push_edge(&mut self, from: NodeId, target: NodeId, length: Option<f64>) {
        self.inner
            .adjacency
            .entry(from)
            .or_default()
            .push(Edge { target, length });
        self.inner.edge_count += 1;
    }

    pub fn build(self) -> Graph {
        debug!(
            nodes = self.inner.nodes.len(),
            edges = self.inner.edge_count,
            kind = ?self.kind,
            "graph built"
        );
        Graph {
            kind: self.kind,
            inner: Arc::new(self.inner),
        }
    }
}
