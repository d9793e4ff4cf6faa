//! Exhaustive simple-path enumeration
//!
//! The search is a backtracking depth-first traversal driven by an explicit
//! stack, so long paths cannot exhaust the call stack. A node is marked only
//! while it sits on the current branch, which lets sibling branches reuse it.
//!
//! # Cost
//!
//! The number of simple paths between two nodes grows exponentially with the
//! size of the graph (a complete graph on `n` nodes has on the order of
//! `(n - 2)!` of them). Nothing here approximates that away: on dense or
//! large topologies callers are expected to pass `max_hops`.

use crate::error::Result;
use crate::model::{NodeId, Path};
use crate::topology::Topology;
use petgraph::stable_graph::NodeIndex;

/// One level of the DFS: the neighbors of a node on the current branch and
/// how many of them have been tried.
struct Frame {
    neighbors: Vec<NodeIndex>,
    cursor: usize,
}

impl Frame {
    fn new(neighbors: Vec<NodeIndex>) -> Self {
        Frame {
            neighbors,
            cursor: 0,
        }
    }

    /// Advance to the next neighbor that is not already on the branch.
    fn next_unvisited(&mut self, on_path: &[bool]) -> Option<NodeIndex> {
        while let Some(&next) = self.neighbors.get(self.cursor) {
            self.cursor += 1;
            if !on_path[next.index()] {
                return Some(next);
            }
        }
        None
    }
}

/// All simple paths from `source` to `target`, in depth-first discovery order.
///
/// `max_hops` bounds the number of links in a returned path; a branch that
/// reaches the bound without arriving at `target` is abandoned. When
/// `source == target` the single zero-hop path `[source]` is returned.
///
/// An empty result means the endpoints are not connected within the bound.
/// Fails with `NodeNotFound` if either endpoint is missing.
pub fn enumerate_simple_paths(
    topology: &Topology,
    source: &NodeId,
    target: &NodeId,
    max_hops: Option<usize>,
) -> Result<Vec<Path>> {
    let start = topology.node_index(source)?;
    let goal = topology.node_index(target)?;

    if start == goal {
        return Ok(vec![Path::new(vec![source.clone()])]);
    }
    if max_hops == Some(0) {
        return Ok(Vec::new());
    }

    let mut found: Vec<Path> = Vec::new();
    let mut on_path = vec![false; topology.node_bound()];
    let mut branch: Vec<NodeIndex> = vec![start];
    let mut stack: Vec<Frame> = vec![Frame::new(topology.neighbor_indices(start))];
    on_path[start.index()] = true;

    while let Some(frame) = stack.last_mut() {
        let Some(next) = frame.next_unvisited(&on_path) else {
            stack.pop();
            if let Some(done) = branch.pop() {
                on_path[done.index()] = false;
            }
            continue;
        };

        branch.push(next);

        if next == goal {
            found.push(materialize(topology, &branch));
            branch.pop();
            continue;
        }

        // hops so far = branch.len() - 1
        if max_hops.is_some_and(|limit| branch.len() - 1 >= limit) {
            branch.pop();
            continue;
        }

        on_path[next.index()] = true;
        stack.push(Frame::new(topology.neighbor_indices(next)));
    }

    tracing::debug!(
        "Enumerated {} simple paths from {} to {} (max_hops: {:?})",
        found.len(),
        source,
        target,
        max_hops
    );

    Ok(found)
}

/// Copy the current branch out of the search buffer.
fn materialize(topology: &Topology, branch: &[NodeIndex]) -> Path {
    branch
        .iter()
        .map(|&idx| topology.node_at(idx).clone())
        .collect()
}
