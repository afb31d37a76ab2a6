use thiserror::Error;

use crate::graph::NodeId;

/// Convenient result alias for the geopath library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// The absence of a path is not represented here: searches report it as
/// `Ok(None)` because disconnected graphs are an expected condition.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a search endpoint or lookup refers to an unknown node.
    #[error("node {id} not found in graph")]
    NodeNotFound { id: NodeId },

    /// Raised when a latitude/longitude pair falls outside the valid range.
    #[error("invalid coordinate (lat {lat}, lon {lon}); expected lat in [-90, 90] and lon in [-180, 180]")]
    InvalidCoordinate { lat: f64, lon: f64 },

    /// Raised when the same node identifier is inserted twice.
    #[error("duplicate node identifier {id}")]
    DuplicateNode { id: NodeId },

    /// Raised when an edge references a node that has not been added.
    #[error("edge {from} -> {to} references unknown node {missing}")]
    UnknownEdgeEndpoint {
        from: NodeId,
        to: NodeId,
        missing: NodeId,
    },

    /// Raised when an explicit edge length is negative or not finite.
    #[error("edge {from} -> {to} has invalid length {length}")]
    InvalidEdgeLength { from: NodeId, to: NodeId, length: f64 },

    /// Raised when a search observes its cancellation token.
    #[error("search was cancelled")]
    SearchCancelled,

    /// Raised when a search runs past its deadline.
    #[error("search deadline exceeded")]
    SearchDeadlineExceeded,

    /// Raised when a search expands more nodes than allowed.
    #[error("search expansion limit of {limit} nodes reached")]
    ExpansionLimitReached { limit: usize },

    /// Raised when a computed route plan lacks any nodes.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// Raised when consecutive route steps are not joined by an edge.
    #[error("route from {start} to {goal} has steps not joined by an edge")]
    DisconnectedRoute { start: NodeId, goal: NodeId },

    /// Raised when a CSV table lacks a required column.
    #[error("{table} table is missing a {column} column")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },

    /// Raised when a CSV record cannot be interpreted.
    #[error("invalid {table} record on line {line}: {message}")]
    InvalidRecord {
        table: &'static str,
        line: u64,
        message: String,
    },

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
