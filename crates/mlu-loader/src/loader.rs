//! File-level entry points

use crate::error::{LoadError, Result};
use crate::formats::{TopologyFormat, get_format};
use mlu_core::Topology;
use std::path::Path;

/// Read and parse a topology file, picking the format from its extension.
pub fn load_topology(path: &Path, capacity: Option<f64>) -> Result<Topology> {
    let format = get_format(path).ok_or_else(|| LoadError::UnsupportedFormat(path.to_path_buf()))?;
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let topology = parse_topology(format.as_ref(), &content, capacity)?;
    tracing::info!(
        "Loaded {} topology {}: {} nodes, {} links",
        format.name(),
        path.display(),
        topology.node_count(),
        topology.link_count()
    );
    Ok(topology)
}

/// Parse in-memory content with a known format.
pub fn parse_topology(
    format: &dyn TopologyFormat,
    content: &str,
    capacity: Option<f64>,
) -> Result<Topology> {
    let topology = format.parse(content, capacity)?;
    if topology.link_count() == 0 {
        tracing::warn!("{} topology has no links", format.name());
    }
    Ok(topology)
}
