//! Persisted solutions

use anyhow::{Context, Result};
use mlu_core::{FlowRequest, Selection};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// File name prefix for saved solutions
pub const SOLUTION_PREFIX: &str = "solution";

#[derive(Debug, Serialize)]
pub struct SavedSolution<'a> {
    pub generated_at: String,
    pub version: &'static str,
    pub request: &'a FlowRequest,
    pub feasible: bool,
    pub selection: &'a Selection,
}

/// Ensure results directory exists
pub fn ensure_results_dir(dir: &Path) -> std::io::Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Write `selection` to `<dir>/solution_<YYYYmmdd_HHMMSS>.json` and return the path.
pub fn save_solution(dir: &Path, request: &FlowRequest, selection: &Selection) -> Result<PathBuf> {
    ensure_results_dir(dir)
        .with_context(|| format!("Failed to create results directory {}", dir.display()))?;

    let now = chrono::Local::now();
    let path = dir.join(format!(
        "{}_{}.json",
        SOLUTION_PREFIX,
        now.format("%Y%m%d_%H%M%S")
    ));

    let saved = SavedSolution {
        generated_at: now.to_rfc3339(),
        version: env!("CARGO_PKG_VERSION"),
        request,
        feasible: selection.is_feasible(),
        selection,
    };
    let json_str = serde_json::to_string_pretty(&saved)?;
    std::fs::write(&path, json_str)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::debug!("Solution saved: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlu_core::{Topology, find_optimal_path_for};
    use tempfile::TempDir;

    #[test]
    fn test_save_solution() {
        let mut topology = Topology::new();
        topology.add_link("a", "b", 1.0).unwrap();
        let request = FlowRequest::new("a", "b", 2.0);
        let selection = find_optimal_path_for(&topology, &request).unwrap();

        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("results");
        let path = save_solution(&dir, &request, &selection).unwrap();

        let file_name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(file_name.starts_with("solution_") && file_name.ends_with(".json"));

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["feasible"], true);
        assert_eq!(saved["request"]["source"], "a");
        assert_eq!(saved["selection"]["best_path"], serde_json::json!(["a", "b"]));
        assert!(saved["generated_at"].as_str().is_some());
    }
}
