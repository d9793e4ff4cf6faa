//! CLI command implementations

use crate::FlowArgs;
use crate::config::{Config, LARGE_TOPOLOGY_NODES};
use crate::report::{ComparisonReport, SelectionReport, TopologyReport};
use crate::results;
use anyhow::Context;
use mlu_core::{FlowRequest, Optimizer, Path, Selection, Topology, compare_path};
use std::path::PathBuf;

pub fn optimize(
    config: &Config,
    flow: &FlowArgs,
    top: Option<usize>,
    json: bool,
    save: Option<PathBuf>,
) -> anyhow::Result<()> {
    let topology = load(config, flow.topology.clone(), flow.capacity)?;
    let request = config.flow_request(flow)?;
    let selection = select(config, flow, &topology, &request)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&selection)?);
    } else {
        let usage = selection.path_link_usage(&topology)?;
        let bottlenecks = selection.bottleneck_links(&topology)?;
        print!(
            "{}",
            SelectionReport {
                request: &request,
                selection: &selection,
                usage: &usage,
                bottlenecks: &bottlenecks,
                top: config.top(top),
            }
        );
    }

    if let Some(dir) = config.results_dir(save) {
        let path = results::save_solution(&dir, &request, &selection)?;
        tracing::info!("Saved solution to {}", path.display());
    }

    Ok(())
}

pub fn evaluate(config: &Config, flow: &FlowArgs, path: &[String]) -> anyhow::Result<()> {
    let topology = load(config, flow.topology.clone(), flow.capacity)?;
    let request = config.flow_request(flow)?;
    let proposed: Path = path.iter().map(|label| label.trim()).collect();

    let selection = select(config, flow, &topology, &request)?;
    let comparison = compare_path(&topology, &request, &proposed, &selection)
        .with_context(|| format!("Cannot evaluate [{}]", proposed))?;

    print!(
        "{}",
        ComparisonReport {
            request: &request,
            comparison: &comparison,
            candidates: selection.ranking.len(),
        }
    );
    Ok(())
}

pub fn inspect(
    config: &Config,
    topology: Option<PathBuf>,
    capacity: Option<f64>,
) -> anyhow::Result<()> {
    let topology = load(config, topology, capacity)?;
    print!("{}", TopologyReport { topology: &topology });
    Ok(())
}

fn load(config: &Config, flag: Option<PathBuf>, capacity: Option<f64>) -> anyhow::Result<Topology> {
    let path = config.topology_path(flag)?;
    let topology = mlu_loader::load_topology(&path, config.capacity(capacity))
        .with_context(|| format!("Failed to load topology {}", path.display()))?;
    Ok(topology)
}

fn select(
    config: &Config,
    flow: &FlowArgs,
    topology: &Topology,
    request: &FlowRequest,
) -> anyhow::Result<Selection> {
    if request.max_hops.is_none() && topology.node_count() > LARGE_TOPOLOGY_NODES {
        tracing::warn!(
            "Unbounded search over {} nodes may take very long; consider --max-hops",
            topology.node_count()
        );
    }

    let optimizer = Optimizer::new(config.optimizer(flow));
    tracing::info!(
        "Searching paths {} -> {} (bandwidth {})",
        request.source,
        request.target,
        request.bandwidth
    );
    let selection = optimizer.select(topology, request)?;
    tracing::info!(
        "Evaluated {} candidate paths, best MLU {}",
        selection.ranking.len(),
        selection.best_mlu
    );
    Ok(selection)
}
