//! Test fixtures for MLU Core

use crate::model::{NodeId, Path};
use crate::topology::Topology;

/// Node label from an integer.
pub fn node(label: u64) -> NodeId {
    NodeId::from(label)
}

/// Path from integer labels.
pub fn path(labels: &[u64]) -> Path {
    labels.iter().map(|&label| node(label)).collect()
}

/// Build a topology with default capacity from `(u, v, load)` triples, in order.
pub fn topology_from(links: &[(u64, u64, f64)]) -> Topology {
    let mut topology = Topology::new();
    for &(u, v, load) in links {
        topology.add_link(u, v, load).unwrap();
    }
    topology
}

/// Ring 1-2-3-4-1, every link at `load`.
pub fn ring4(load: f64) -> Topology {
    topology_from(&[(1, 2, load), (2, 3, load), (3, 4, load), (4, 1, load)])
}

/// Chain 1-2-...-n with the given loads, one per link.
pub fn chain(loads: &[f64]) -> Topology {
    let links: Vec<(u64, u64, f64)> = loads
        .iter()
        .enumerate()
        .map(|(i, &load)| (i as u64 + 1, i as u64 + 2, load))
        .collect();
    topology_from(&links)
}

/// Complete graph on nodes `0..n`, every link at `load`.
pub fn complete_graph(n: u64, load: f64) -> Topology {
    let mut topology = Topology::new();
    for u in 0..n {
        for v in (u + 1)..n {
            topology.add_link(u, v, load).unwrap();
        }
    }
    topology
}

/// Two components: triangle 1-2-3 and the pair 4-5.
pub fn two_components() -> Topology {
    topology_from(&[(1, 2, 1.0), (2, 3, 1.0), (3, 1, 1.0), (4, 5, 1.0)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_shapes() {
        assert_eq!(ring4(2.0).link_count(), 4);
        assert_eq!(chain(&[1.0, 8.0]).node_count(), 3);
        assert_eq!(complete_graph(5, 0.0).link_count(), 10);

        let split = two_components();
        assert_eq!(split.node_count(), 5);
        assert_eq!(split.link_count(), 4);
    }
}
