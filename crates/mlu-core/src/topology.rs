//! Network topology backed by `petgraph::StableUnGraph` with label lookup

use crate::error::{Error, Result};
use crate::model::*;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableUnGraph};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// An undirected network: labelled nodes, links carrying a committed load,
/// and one capacity shared by every link.
///
/// Neighbor iteration follows link insertion order. Path enumeration, and
/// therefore tie-breaking between equally good paths, depends on it.
#[derive(Clone)]
pub struct Topology {
    inner: StableUnGraph<NodeId, Link>,
    index: HashMap<NodeId, NodeIndex>,
    capacity: f64,
}

impl std::fmt::Debug for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Topology")
            .field("node_count", &self.inner.node_count())
            .field("link_count", &self.inner.edge_count())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl Topology {
    pub fn new() -> Self {
        Self::with_link_capacity(DEFAULT_LINK_CAPACITY)
    }

    /// Empty topology whose links all share `capacity`.
    pub fn with_link_capacity(capacity: f64) -> Self {
        Topology {
            inner: StableUnGraph::default(),
            index: HashMap::new(),
            capacity,
        }
    }

    /// Capacity shared by every link.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Add a node if it is not already present. Returns true if it was added.
    pub fn add_node(&mut self, id: impl Into<NodeId>) -> bool {
        let id = id.into();
        if self.index.contains_key(&id) {
            return false;
        }
        self.insert_node(id);
        true
    }

    fn insert_node(&mut self, id: NodeId) -> NodeIndex {
        if let Some(&idx) = self.index.get(&id) {
            return idx;
        }
        let idx = self.inner.add_node(id.clone());
        self.index.insert(id, idx);
        idx
    }

    /// Add an undirected link, creating missing endpoints.
    ///
    /// Linking an already-linked pair replaces its load and keeps its
    /// original position in the neighbor order.
    pub fn add_link(
        &mut self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        load: f64,
    ) -> Result<LinkId> {
        let source = source.into();
        let target = target.into();
        check_load(&source, &target, load)?;

        let a = self.insert_node(source.clone());
        let b = self.insert_node(target.clone());

        if let Some(existing) = self.inner.find_edge(a, b) {
            if let Some(link) = self.inner.edge_weight_mut(existing) {
                tracing::debug!("Replacing load on link {}-{}: {} -> {}", source, target, link.load, load);
                link.load = load;
                return Ok(link.id);
            }
        }

        let id = next_link_id(self.inner.edge_count())?;
        let idx = self.inner.add_edge(
            a,
            b,
            Link {
                id,
                source,
                target,
                load,
            },
        );
        debug_assert_eq!(idx.index(), id.0 as usize);
        Ok(id)
    }

    /// Replace the committed load of an existing link.
    pub fn set_load(&mut self, u: &NodeId, v: &NodeId, load: f64) -> Result<()> {
        check_load(u, v, load)?;
        let edge = self.edge_index(u, v)?;
        if let Some(link) = self.inner.edge_weight_mut(edge) {
            link.load = load;
        }
        Ok(())
    }

    /// Current committed load of link `{u, v}`.
    pub fn load(&self, u: &NodeId, v: &NodeId) -> Result<f64> {
        let edge = self.edge_index(u, v)?;
        self.inner
            .edge_weight(edge)
            .map(|link| link.load)
            .ok_or_else(|| Error::EdgeNotFound(u.clone(), v.clone()))
    }

    /// Nodes adjacent to `node`, in link insertion order.
    pub fn neighbors(&self, node: &NodeId) -> Result<Vec<NodeId>> {
        let idx = self.node_index(node)?;
        Ok(self
            .neighbor_indices(idx)
            .into_iter()
            .map(|n| self.inner[n].clone())
            .collect())
    }

    pub fn contains_node(&self, node: &NodeId) -> bool {
        self.index.contains_key(node)
    }

    /// True if `{u, v}` is a link, in either direction.
    pub fn has_link(&self, u: &NodeId, v: &NodeId) -> bool {
        self.edge_index(u, v).is_ok()
    }

    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn link_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Iterate over all nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.inner
            .node_indices()
            .filter_map(move |idx| self.inner.node_weight(idx))
    }

    /// Iterate over all links in insertion order.
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.inner
            .edge_indices()
            .filter_map(move |idx| self.inner.edge_weight(idx))
    }

    /// Reject topologies that utilization cannot be computed on.
    pub fn validate(&self) -> Result<()> {
        if self.inner.edge_count() == 0 {
            return Err(Error::InvalidTopology("topology has no links".to_string()));
        }
        if !self.capacity.is_finite() || self.capacity <= 0.0 {
            return Err(Error::InvalidTopology(format!(
                "link capacity must be positive, got {}",
                self.capacity
            )));
        }
        Ok(())
    }

    /// Maximum utilization of the topology as it stands, before any allocation.
    pub fn current_mlu(&self) -> Result<f64> {
        self.validate()?;
        Ok(self
            .links()
            .map(|link| link.load / self.capacity)
            .fold(0.0, f64::max))
    }

    pub(crate) fn node_index(&self, node: &NodeId) -> Result<NodeIndex> {
        self.index
            .get(node)
            .copied()
            .ok_or_else(|| Error::NodeNotFound(node.clone()))
    }

    pub(crate) fn node_at(&self, idx: NodeIndex) -> &NodeId {
        &self.inner[idx]
    }

    /// Upper bound on node indices, for index-addressed scratch arrays.
    pub(crate) fn node_bound(&self) -> usize {
        self.inner
            .node_indices()
            .map(|idx| idx.index() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Adjacent node indices ordered by link insertion.
    pub(crate) fn neighbor_indices(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut incident: Vec<(EdgeIndex, NodeIndex)> = self
            .inner
            .edges(idx)
            .map(|edge| {
                let other = if edge.source() == idx {
                    edge.target()
                } else {
                    edge.source()
                };
                (edge.id(), other)
            })
            .collect();
        incident.sort_by_key(|(edge, _)| edge.index());
        incident.dedup_by_key(|(edge, _)| *edge);
        incident.into_iter().map(|(_, other)| other).collect()
    }

    pub(crate) fn link_between(&self, a: NodeIndex, b: NodeIndex) -> Option<LinkId> {
        self.inner
            .find_edge(a, b)
            .and_then(|edge| self.inner.edge_weight(edge))
            .map(|link| link.id)
    }

    fn edge_index(&self, u: &NodeId, v: &NodeId) -> Result<EdgeIndex> {
        let a = self.node_index(u)?;
        let b = self.node_index(v)?;
        self.inner
            .find_edge(a, b)
            .ok_or_else(|| Error::EdgeNotFound(u.clone(), v.clone()))
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::new()
    }
}

/// Id for the next link; links are never removed, so it equals the edge count.
pub(crate) fn next_link_id(count: usize) -> Result<LinkId> {
    u32::try_from(count)
        .map(LinkId)
        .map_err(|_| Error::InvalidTopology(format!("link count {} exceeds the u32 id range", count)))
}

fn check_load(u: &NodeId, v: &NodeId, load: f64) -> Result<()> {
    if !load.is_finite() || load < 0.0 {
        return Err(Error::InvalidLoad {
            u: u.clone(),
            v: v.clone(),
            load,
        });
    }
    Ok(())
}
