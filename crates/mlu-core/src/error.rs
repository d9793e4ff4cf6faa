//! Error taxonomy for topology queries and path selection.
//!
//! Every variant is detected at the start of an operation, before any search
//! or evaluation work is done. "No feasible path" is deliberately absent: it
//! is a valid [`Selection`](crate::Selection) with no best path.

use crate::model::NodeId;
use thiserror::Error;

/// Errors raised by the routing core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A source, target or path node is not part of the topology.
    #[error("node {0} not found in topology")]
    NodeNotFound(NodeId),

    /// A node pair that is expected to be adjacent has no link.
    #[error("no link between {0} and {1}")]
    EdgeNotFound(NodeId, NodeId),

    /// The requested bandwidth is negative or not a finite number.
    #[error("invalid bandwidth demand: {0}")]
    InvalidDemand(f64),

    /// The topology cannot be evaluated (no links, unusable capacity).
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// A link load supplied at construction is negative or not finite.
    #[error("invalid load {load} on link {u}-{v}")]
    InvalidLoad { u: NodeId, v: NodeId, load: f64 },

    /// A caller-supplied path is not a simple path between the requested endpoints.
    #[error("invalid path: {0}")]
    InvalidPath(String),
}

/// Result alias used across the core.
pub type Result<T> = std::result::Result<T, Error>;
