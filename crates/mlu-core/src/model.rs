//! Core data structures for the routing engine

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Capacity shared by every link unless the topology says otherwise.
pub const DEFAULT_LINK_CAPACITY: f64 = 10.0;

/// Opaque node label, unique within a topology.
///
/// Integer labels are stored by their decimal text, which matches how the
/// persisted graph files name their nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(label: impl Into<String>) -> Self {
        NodeId(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(label: &str) -> Self {
        NodeId(label.to_string())
    }
}

impl From<String> for NodeId {
    fn from(label: String) -> Self {
        NodeId(label)
    }
}

impl From<&NodeId> for NodeId {
    fn from(id: &NodeId) -> Self {
        id.clone()
    }
}

impl From<u64> for NodeId {
    fn from(label: u64) -> Self {
        NodeId(label.to_string())
    }
}

impl From<usize> for NodeId {
    fn from(label: usize) -> Self {
        NodeId(label.to_string())
    }
}

/// Stable identifier of a link, in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct LinkId(pub u32);

/// An undirected link and its committed load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: LinkId,
    pub source: NodeId,
    pub target: NodeId,
    /// Currently committed load, in the same unit as the capacity.
    pub load: f64,
}

impl Link {
    /// True if this link joins `u` and `v`, in either direction.
    pub fn connects(&self, u: &NodeId, v: &NodeId) -> bool {
        (&self.source == u && &self.target == v) || (&self.source == v && &self.target == u)
    }
}

/// A simple path: source first, target last, no repeated node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    nodes: Vec<NodeId>,
}

impl Path {
    pub fn new(nodes: Vec<NodeId>) -> Self {
        Path { nodes }
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<NodeId> {
        self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Number of links traversed.
    pub fn hops(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn source(&self) -> Option<&NodeId> {
        self.nodes.first()
    }

    pub fn target(&self) -> Option<&NodeId> {
        self.nodes.last()
    }

    /// Consecutive node pairs, i.e. the links walked by this path.
    pub fn links(&self) -> impl Iterator<Item = (&NodeId, &NodeId)> {
        self.nodes.windows(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// True if some consecutive pair of the path is `{u, v}`, in either direction.
    pub fn traverses(&self, u: &NodeId, v: &NodeId) -> bool {
        self.links()
            .any(|(a, b)| (a == u && b == v) || (a == v && b == u))
    }

    /// True if no node appears twice.
    pub fn is_simple(&self) -> bool {
        let mut seen = std::collections::HashSet::with_capacity(self.nodes.len());
        self.nodes.iter().all(|n| seen.insert(n))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", node)?;
        }
        Ok(())
    }
}

impl From<Vec<NodeId>> for Path {
    fn from(nodes: Vec<NodeId>) -> Self {
        Path::new(nodes)
    }
}

impl<N: Into<NodeId>> FromIterator<N> for Path {
    fn from_iter<T: IntoIterator<Item = N>>(iter: T) -> Self {
        Path::new(iter.into_iter().map(Into::into).collect())
    }
}

/// A candidate path and the MLU it would produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateResult {
    pub path: Path,
    pub mlu: f64,
}

/// A single flow to place: already parsed, not yet validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowRequest {
    pub source: NodeId,
    pub target: NodeId,
    pub bandwidth: f64,
    /// Upper bound on path length in hops; `None` means unbounded.
    #[serde(default)]
    pub max_hops: Option<usize>,
}

impl FlowRequest {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>, bandwidth: f64) -> Self {
        FlowRequest {
            source: source.into(),
            target: target.into(),
            bandwidth,
            max_hops: None,
        }
    }

    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = Some(max_hops);
        self
    }
}

/// Provisional state of one link under a what-if allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkUtilization {
    pub source: NodeId,
    pub target: NodeId,
    /// Load before the allocation.
    pub load: f64,
    /// Load after adding the demand (unchanged for links off the path).
    pub provisional_load: f64,
    pub utilization: f64,
    pub on_path: bool,
}
