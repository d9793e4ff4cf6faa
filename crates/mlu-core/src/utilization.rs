//! Provisional link utilization under a single-path allocation
//!
//! All functions here compute on copies of the committed loads; the topology
//! itself is never written to.

use crate::error::{Error, Result};
use crate::model::{LinkId, LinkUtilization, NodeId, Path};
use crate::topology::Topology;
use std::collections::HashSet;

/// Two utilizations closer than this are treated as equal when picking out
/// the links that set a path's MLU.
pub const BOTTLENECK_TOLERANCE: f64 = 1e-3;

/// MLU of the whole topology after adding `bandwidth` to every link on `path`.
///
/// Every link is scanned, not just those on the path: the global bottleneck
/// may be a link the path never touches.
pub fn evaluate_mlu(topology: &Topology, path: &Path, bandwidth: f64) -> Result<f64> {
    let rows = link_utilizations(topology, path, bandwidth)?;
    Ok(rows.iter().map(|row| row.utilization).fold(0.0, f64::max))
}

/// Provisional state of every link, in link insertion order.
pub fn link_utilizations(
    topology: &Topology,
    path: &Path,
    bandwidth: f64,
) -> Result<Vec<LinkUtilization>> {
    check_demand(bandwidth)?;
    topology.validate()?;
    check_path(path)?;
    let on_path = path_link_ids(topology, path)?;
    let capacity = topology.capacity();

    Ok(topology
        .links()
        .map(|link| {
            let traversed = on_path.contains(&link.id);
            let provisional_load = if traversed {
                link.load + bandwidth
            } else {
                link.load
            };
            LinkUtilization {
                source: link.source.clone(),
                target: link.target.clone(),
                load: link.load,
                provisional_load,
                utilization: provisional_load / capacity,
                on_path: traversed,
            }
        })
        .collect())
}

/// Provisional state of the links on `path`, in the order the path walks them.
///
/// Endpoints are reported in walking direction.
pub fn path_link_usage(
    topology: &Topology,
    path: &Path,
    bandwidth: f64,
) -> Result<Vec<LinkUtilization>> {
    check_demand(bandwidth)?;
    topology.validate()?;
    check_path(path)?;
    let capacity = topology.capacity();

    path.links()
        .map(|(u, v)| {
            let load = topology.load(u, v)?;
            let provisional_load = load + bandwidth;
            Ok(LinkUtilization {
                source: u.clone(),
                target: v.clone(),
                load,
                provisional_load,
                utilization: provisional_load / capacity,
                on_path: true,
            })
        })
        .collect()
}

/// Links whose provisional utilization equals the path's MLU, within
/// [`BOTTLENECK_TOLERANCE`].
pub fn bottleneck_links(
    topology: &Topology,
    path: &Path,
    bandwidth: f64,
) -> Result<Vec<LinkUtilization>> {
    let rows = link_utilizations(topology, path, bandwidth)?;
    let mlu = rows.iter().map(|row| row.utilization).fold(0.0, f64::max);
    Ok(rows
        .into_iter()
        .filter(|row| (row.utilization - mlu).abs() < BOTTLENECK_TOLERANCE)
        .collect())
}

pub(crate) fn check_demand(bandwidth: f64) -> Result<()> {
    if !bandwidth.is_finite() || bandwidth < 0.0 {
        return Err(Error::InvalidDemand(bandwidth));
    }
    Ok(())
}

/// A path must name at least one node and never revisit one.
pub(crate) fn check_path(path: &Path) -> Result<()> {
    if path.is_empty() {
        return Err(Error::InvalidPath("path is empty".to_string()));
    }
    if !path.is_simple() {
        return Err(Error::InvalidPath(format!("[{}] repeats a node", path)));
    }
    Ok(())
}

/// Resolve each consecutive pair of `path` to the link it walks.
fn path_link_ids(topology: &Topology, path: &Path) -> Result<HashSet<LinkId>> {
    if let Some(missing) = path.nodes().iter().find(|n| !topology.contains_node(n)) {
        return Err(Error::NodeNotFound(missing.clone()));
    }

    path.links()
        .map(|(u, v)| lookup_link(topology, u, v))
        .collect()
}

fn lookup_link(topology: &Topology, u: &NodeId, v: &NodeId) -> Result<LinkId> {
    let a = topology.node_index(u)?;
    let b = topology.node_index(v)?;
    topology
        .link_between(a, b)
        .ok_or_else(|| Error::EdgeNotFound(u.clone(), v.clone()))
}
