//! Human-readable reports for the CLI

use mlu_core::{FlowRequest, Link, LinkUtilization, PathComparison, Selection, Topology};
use std::fmt;

/// How many of the most loaded links `inspect` lists.
pub const BUSIEST_LINKS: usize = 5;

pub struct SelectionReport<'a> {
    pub request: &'a FlowRequest,
    pub selection: &'a Selection,
    pub usage: &'a [LinkUtilization],
    pub bottlenecks: &'a [LinkUtilization],
    pub top: usize,
}

impl fmt::Display for SelectionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_request(f, self.request)?;
        writeln!(f, "Candidates: {} simple paths", self.selection.ranking.len())?;
        writeln!(f)?;

        let Some(best) = self.selection.best() else {
            return writeln!(f, "No feasible path found!");
        };

        writeln!(f, "Optimal path (minimizing MLU):")?;
        writeln!(f, "  Path: {}", best.path)?;
        writeln!(f, "  Hops: {}", best.path.hops())?;
        writeln!(f, "  MLU: {:.3}", best.mlu)?;
        writeln!(f)?;

        let top = self.selection.top(self.top);
        writeln!(f, "Top {} of {} paths:", top.len(), self.selection.ranking.len())?;
        for (i, candidate) in top.iter().enumerate() {
            writeln!(f, "  {}. MLU={:.3}  {}", i + 1, candidate.mlu, candidate.path)?;
        }
        writeln!(f)?;

        writeln!(f, "Link usage on optimal path:")?;
        if self.usage.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for row in self.usage {
            writeln!(
                f,
                "  ({}, {}): {} -> {}, utilization {:.3}",
                row.source, row.target, row.load, row.provisional_load, row.utilization
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Bottleneck links (determining MLU):")?;
        for row in self.bottlenecks {
            writeln!(
                f,
                "  ({}, {}): load {}, utilization {:.3}",
                row.source, row.target, row.provisional_load, row.utilization
            )?;
        }
        Ok(())
    }
}

pub struct ComparisonReport<'a> {
    pub request: &'a FlowRequest,
    pub comparison: &'a PathComparison,
    pub candidates: usize,
}

impl fmt::Display for ComparisonReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.comparison;
        write_request(f, self.request)?;
        writeln!(f)?;
        writeln!(f, "Proposed path: {}", c.proposed)?;
        writeln!(f, "  MLU: {:.3}", c.proposed_mlu)?;
        match c.rank {
            Some(rank) => writeln!(f, "  Rank: {} of {}", rank, self.candidates)?,
            None => writeln!(f, "  Rank: not among enumerated candidates")?,
        }
        match c.gap {
            Some(gap) => {
                writeln!(f, "Optimal MLU: {:.3}", c.optimal_mlu)?;
                let verdict = if c.is_optimal() { "optimal" } else { "suboptimal" };
                writeln!(f, "Gap: {:+.3} ({})", gap, verdict)
            }
            None => writeln!(f, "Optimal MLU: n/a (no feasible path within the hop bound)"),
        }
    }
}

pub struct TopologyReport<'a> {
    pub topology: &'a Topology,
}

impl fmt::Display for TopologyReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let topology = self.topology;
        let capacity = topology.capacity();
        writeln!(f, "Nodes: {}", topology.node_count())?;
        writeln!(f, "Links: {}", topology.link_count())?;
        writeln!(f, "Link capacity: {}", capacity)?;

        let Ok(mlu) = topology.current_mlu() else {
            return writeln!(f, "Current MLU: n/a (no usable links)");
        };
        writeln!(f, "Current MLU: {:.3}", mlu)?;

        let mut links: Vec<&Link> = topology.links().collect();
        links.sort_by(|a, b| b.load.total_cmp(&a.load));
        writeln!(f, "Busiest links:")?;
        for link in links.iter().take(BUSIEST_LINKS) {
            writeln!(
                f,
                "  ({}, {}): load {}, utilization {:.3}",
                link.source,
                link.target,
                link.load,
                link.load / capacity
            )?;
        }
        Ok(())
    }
}

fn write_request(f: &mut fmt::Formatter<'_>, request: &FlowRequest) -> fmt::Result {
    write!(
        f,
        "Flow: {} -> {}, bandwidth {}, ",
        request.source, request.target, request.bandwidth
    )?;
    match request.max_hops {
        Some(hops) => writeln!(f, "max hops {}", hops),
        None => writeln!(f, "max hops unbounded"),
    }
}
