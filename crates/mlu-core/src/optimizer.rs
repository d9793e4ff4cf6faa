//! Optimal path selection: enumerate, evaluate, rank

use crate::error::{Error, Result};
use crate::model::{CandidateResult, FlowRequest, LinkUtilization, NodeId, Path};
use crate::paths::enumerate_simple_paths;
use crate::topology::Topology;
use crate::utilization::{self, check_demand, evaluate_mlu};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Outcome of a search.
///
/// `best_path == None` with `best_mlu == +inf` is the "no feasible path"
/// outcome; callers must check for it, it is not reported as an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub best_path: Option<Path>,
    pub best_mlu: f64,
    /// Demand the candidates were evaluated with.
    pub bandwidth: f64,
    /// Every candidate, ascending by MLU; ties in discovery order.
    pub ranking: Vec<CandidateResult>,
}

impl Selection {
    fn infeasible(bandwidth: f64) -> Self {
        Selection {
            best_path: None,
            best_mlu: f64::INFINITY,
            bandwidth,
            ranking: Vec::new(),
        }
    }

    pub fn is_feasible(&self) -> bool {
        self.best_path.is_some()
    }

    pub fn best(&self) -> Option<&CandidateResult> {
        self.ranking.first()
    }

    /// The `n` best candidates (fewer if the ranking is shorter).
    pub fn top(&self, n: usize) -> &[CandidateResult] {
        &self.ranking[..n.min(self.ranking.len())]
    }

    /// 1-based position of `path` in the ranking.
    pub fn rank_of(&self, path: &Path) -> Option<usize> {
        self.ranking
            .iter()
            .position(|candidate| &candidate.path == path)
            .map(|i| i + 1)
    }

    /// Per-link usage along the best path; empty when infeasible.
    pub fn path_link_usage(&self, topology: &Topology) -> Result<Vec<LinkUtilization>> {
        match &self.best_path {
            Some(path) => utilization::path_link_usage(topology, path, self.bandwidth),
            None => Ok(Vec::new()),
        }
    }

    /// Links that set the best MLU; empty when infeasible.
    pub fn bottleneck_links(&self, topology: &Topology) -> Result<Vec<LinkUtilization>> {
        match &self.best_path {
            Some(path) => utilization::bottleneck_links(topology, path, self.bandwidth),
            None => Ok(Vec::new()),
        }
    }
}

/// Search knobs that do not change results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Evaluate candidates on the rayon pool. The ranking is identical either way.
    #[serde(default)]
    pub parallel: bool,
}

/// Brute-force MLU minimizer over all simple paths.
#[derive(Debug, Clone, Default)]
pub struct Optimizer {
    config: OptimizerConfig,
}

impl Optimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Optimizer { config }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Place `request` on the path that minimizes the resulting MLU.
    ///
    /// Demand, endpoints and topology are all checked before the search
    /// starts, in that order.
    pub fn select(&self, topology: &Topology, request: &FlowRequest) -> Result<Selection> {
        check_demand(request.bandwidth)?;
        topology.node_index(&request.source)?;
        topology.node_index(&request.target)?;
        topology.validate()?;

        let candidates = enumerate_simple_paths(
            topology,
            &request.source,
            &request.target,
            request.max_hops,
        )?;

        if candidates.is_empty() {
            tracing::debug!(
                "No feasible path from {} to {} (max_hops: {:?})",
                request.source,
                request.target,
                request.max_hops
            );
            return Ok(Selection::infeasible(request.bandwidth));
        }

        let mut ranking = self.evaluate_all(topology, candidates, request.bandwidth)?;
        // Stable: equal MLUs keep discovery order.
        ranking.sort_by(|a, b| a.mlu.total_cmp(&b.mlu));

        let best = &ranking[0];
        tracing::debug!(
            "Best of {} candidates: {} (MLU {:.3})",
            ranking.len(),
            best.path,
            best.mlu
        );

        Ok(Selection {
            best_path: Some(best.path.clone()),
            best_mlu: best.mlu,
            bandwidth: request.bandwidth,
            ranking,
        })
    }

    /// Evaluate every candidate; output order always matches input order.
    fn evaluate_all(
        &self,
        topology: &Topology,
        candidates: Vec<Path>,
        bandwidth: f64,
    ) -> Result<Vec<CandidateResult>> {
        let evaluate = |path: Path| -> Result<CandidateResult> {
            let mlu = evaluate_mlu(topology, &path, bandwidth)?;
            Ok(CandidateResult { path, mlu })
        };

        if self.config.parallel {
            candidates.into_par_iter().map(evaluate).collect()
        } else {
            candidates.into_iter().map(evaluate).collect()
        }
    }
}

/// Sequential search with an explicit hop bound.
pub fn find_optimal_path(
    topology: &Topology,
    source: &NodeId,
    target: &NodeId,
    bandwidth: f64,
    max_hops: Option<usize>,
) -> Result<Selection> {
    let request = FlowRequest {
        source: source.clone(),
        target: target.clone(),
        bandwidth,
        max_hops,
    };
    find_optimal_path_for(topology, &request)
}

/// Sequential search for an already-built request.
pub fn find_optimal_path_for(topology: &Topology, request: &FlowRequest) -> Result<Selection> {
    Optimizer::default().select(topology, request)
}

/// How an externally proposed path measures up against the optimum.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathComparison {
    pub proposed: Path,
    pub proposed_mlu: f64,
    pub optimal_mlu: f64,
    /// `proposed_mlu - optimal_mlu`; `None` when the search found no path.
    pub gap: Option<f64>,
    /// 1-based position of the proposed path in the ranking, if it was enumerated.
    pub rank: Option<usize>,
}

impl PathComparison {
    /// True if the proposal is as good as the optimum, within the bottleneck tolerance.
    pub fn is_optimal(&self) -> bool {
        self.gap
            .is_some_and(|gap| gap.abs() < utilization::BOTTLENECK_TOLERANCE)
    }
}

/// Evaluate `proposed` for `request` and compare it with `selection`.
///
/// The proposal must be a simple path from the request's source to its
/// target over existing links.
pub fn compare_path(
    topology: &Topology,
    request: &FlowRequest,
    proposed: &Path,
    selection: &Selection,
) -> Result<PathComparison> {
    if proposed.source() != Some(&request.source) || proposed.target() != Some(&request.target) {
        return Err(Error::InvalidPath(format!(
            "expected a path from {} to {}, got [{}]",
            request.source, request.target, proposed
        )));
    }
    utilization::check_path(proposed)?;

    let proposed_mlu = evaluate_mlu(topology, proposed, request.bandwidth)?;
    let gap = selection
        .is_feasible()
        .then(|| proposed_mlu - selection.best_mlu);

    Ok(PathComparison {
        proposed: proposed.clone(),
        proposed_mlu,
        optimal_mlu: selection.best_mlu,
        gap,
        rank: selection.rank_of(proposed),
    })
}
