//! JSON edge-list topologies
//!
//! Accepts both a plain form and networkx `node_link_data` output:
//!
//! ```json
//! { "capacity": 10, "nodes": ["a", {"id": "b"}],
//!   "links": [{ "source": "a", "target": "b", "load": 2 }] }
//! ```
//!
//! `weight` is accepted in place of `load`. Labels may be strings or integers.

use super::TopologyFormat;
use crate::error::Result;
use mlu_core::{DEFAULT_LINK_CAPACITY, NodeId, Topology};
use serde::Deserialize;

pub struct JsonFormat;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Text(String),
    Integer(i64),
}

impl From<RawLabel> for NodeId {
    fn from(raw: RawLabel) -> Self {
        match raw {
            RawLabel::Text(text) => NodeId::new(text),
            RawLabel::Integer(n) => NodeId::new(n.to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawNode {
    Bare(RawLabel),
    Object { id: RawLabel },
}

#[derive(Debug, Deserialize)]
struct RawLink {
    source: RawLabel,
    target: RawLabel,
    #[serde(default, alias = "weight")]
    load: f64,
}

#[derive(Debug, Deserialize)]
struct RawTopology {
    #[serde(default)]
    capacity: Option<f64>,
    #[serde(default)]
    nodes: Vec<RawNode>,
    #[serde(default, alias = "edges")]
    links: Vec<RawLink>,
}

impl TopologyFormat for JsonFormat {
    fn name(&self) -> &'static str {
        "JSON"
    }

    fn parse(&self, content: &str, capacity: Option<f64>) -> Result<Topology> {
        let raw: RawTopology = serde_json::from_str(content)?;

        let mut topology = Topology::with_link_capacity(
            capacity.or(raw.capacity).unwrap_or(DEFAULT_LINK_CAPACITY),
        );
        for node in raw.nodes {
            let label = match node {
                RawNode::Bare(label) | RawNode::Object { id: label } => label,
            };
            topology.add_node(NodeId::from(label));
        }
        for link in raw.links {
            topology.add_link(NodeId::from(link.source), NodeId::from(link.target), link.load)?;
        }
        Ok(topology)
    }
}
