//! Topology file formats

pub mod gml;
pub mod json;

use crate::error::Result;
use mlu_core::Topology;
use std::path::Path;

/// A persisted graph format that can be turned into a [`Topology`].
pub trait TopologyFormat: Send + Sync {
    /// Short format name, used in logs.
    fn name(&self) -> &'static str;

    /// Parse `content`. An explicit `capacity` wins over one declared in the file.
    fn parse(&self, content: &str, capacity: Option<f64>) -> Result<Topology>;
}

/// Get the appropriate format for a file based on its extension
pub fn get_format(path: &Path) -> Option<Box<dyn TopologyFormat>> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();

    match ext.as_str() {
        "gml" => Some(Box::new(gml::GmlFormat)),
        "json" => Some(Box::new(json::JsonFormat)),
        _ => None,
    }
}
