//! Integration tests for mlu-router
//!
//! These tests drive the binary end to end against topology files on disk.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const RING_GML: &str = r#"graph [
  node [ id 0 label "1" ]
  node [ id 1 label "2" ]
  node [ id 2 label "3" ]
  node [ id 3 label "4" ]
  edge [ source 0 target 1 weight 2 ]
  edge [ source 1 target 2 weight 2 ]
  edge [ source 2 target 3 weight 2 ]
  edge [ source 3 target 0 weight 2 ]
]
"#;

/// Detour-favoring square: the direct link is hot, the long way round is idle.
const DETOUR_JSON: &str = r#"{
  "nodes": ["a", "b", "c", "d"],
  "links": [
    {"source": "a", "target": "b", "load": 9},
    {"source": "a", "target": "c", "load": 1},
    {"source": "c", "target": "d", "load": 1},
    {"source": "d", "target": "b", "load": 1}
  ]
}"#;

fn mlu_router(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_mlu-router"))
        .args(args)
        .output()
        .expect("Failed to execute mlu-router")
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_string_lossy().to_string()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_cli_invocation() {
    let output = mlu_router(&["--help"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("maximum link utilization"));

    let output = mlu_router(&["version"]);
    assert!(stdout(&output).starts_with("mlu-router v"));
}

#[test]
fn test_optimize_ring() {
    let temp_dir = TempDir::new().unwrap();
    let ring = write(temp_dir.path(), "ring.gml", RING_GML);

    let output = mlu_router(&["optimize", "-t", &ring, "-s", "1", "-d", "3", "-b", "3"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let report = stdout(&output);
    assert!(report.contains("Path: 1 -> 2 -> 3"), "{}", report);
    assert!(report.contains("MLU: 0.500"));
    assert!(report.contains("Top 2 of 2 paths:"));
    assert!(report.contains("(2, 3): 2 -> 5, utilization 0.500"));
}

#[test]
fn test_optimize_json_prefers_detour() {
    let temp_dir = TempDir::new().unwrap();
    let net = write(temp_dir.path(), "square.json", DETOUR_JSON);

    let output = mlu_router(&["optimize", "-t", &net, "-s", "a", "-d", "b", "-b", "2", "--json"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let selection: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(selection["best_path"], serde_json::json!(["a", "c", "d", "b"]));
    assert!((selection["best_mlu"].as_f64().unwrap() - 0.9).abs() < 1e-9);
    assert_eq!(selection["ranking"].as_array().unwrap().len(), 2);
}

#[test]
fn test_optimize_infeasible_within_hop_bound() {
    let temp_dir = TempDir::new().unwrap();
    let net = write(temp_dir.path(), "square.json", DETOUR_JSON);

    let output = mlu_router(&[
        "optimize", "-t", &net, "-s", "a", "-d", "d", "-b", "1", "--max-hops", "1",
    ]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No feasible path found!"));

    let output = mlu_router(&[
        "optimize", "-t", &net, "-s", "a", "-d", "d", "-b", "1", "-H", "1", "--json",
    ]);
    let selection: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(selection["best_path"].is_null());
    assert!(selection["best_mlu"].is_null());
}

#[test]
fn test_optimize_from_config_and_save() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "ring.gml", RING_GML);
    let config = write(
        temp_dir.path(),
        "route.toml",
        "topology = \"ring.gml\"\ncapacity = 20\nparallel = true\n\n[flow]\nsource = \"1\"\ntarget = \"3\"\nbandwidth = 6\n",
    );
    let results = temp_dir.path().join("results");

    let output = mlu_router(&[
        "--config",
        &config,
        "optimize",
        "--save",
        &results.to_string_lossy(),
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(stdout(&output).contains("MLU: 0.400"));

    let saved: Vec<_> = fs::read_dir(&results)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .collect();
    assert_eq!(saved.len(), 1);
    let name = saved[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("solution_") && name.ends_with(".json"), "{}", name);

    let solution: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&saved[0]).unwrap()).unwrap();
    assert_eq!(solution["feasible"], true);
    assert_eq!(solution["request"]["bandwidth"], 6.0);
}

#[test]
fn test_evaluate_proposed_path() {
    let temp_dir = TempDir::new().unwrap();
    let net = write(temp_dir.path(), "square.json", DETOUR_JSON);

    let output = mlu_router(&[
        "evaluate", "-t", &net, "-s", "a", "-d", "b", "-b", "2", "--path", "a,b",
    ]);
    assert!(output.status.success(), "{}", stderr(&output));
    let report = stdout(&output);
    assert!(report.contains("MLU: 1.100"), "{}", report);
    assert!(report.contains("Rank: 2 of 2"));
    assert!(report.contains("Gap: +0.200 (suboptimal)"));
}

#[test]
fn test_evaluate_rejects_missing_link() {
    let temp_dir = TempDir::new().unwrap();
    let net = write(temp_dir.path(), "square.json", DETOUR_JSON);

    let output = mlu_router(&[
        "evaluate", "-t", &net, "-s", "a", "-d", "b", "-b", "2", "--path", "a,d,b",
    ]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Cannot evaluate"));
}

#[test]
fn test_inspect() {
    let temp_dir = TempDir::new().unwrap();
    let net = write(temp_dir.path(), "square.json", DETOUR_JSON);

    let output = mlu_router(&["inspect", "-t", &net]);
    assert!(output.status.success(), "{}", stderr(&output));
    let report = stdout(&output);
    assert!(report.contains("Nodes: 4\nLinks: 4\nLink capacity: 10\nCurrent MLU: 0.900\n"));
    assert!(report.contains("Busiest links:\n  (a, b): load 9, utilization 0.900\n"));
}

#[test]
fn test_errors_exit_nonzero() {
    let temp_dir = TempDir::new().unwrap();
    let ring = write(temp_dir.path(), "ring.gml", RING_GML);

    let unknown = mlu_router(&["optimize", "-t", &ring, "-s", "1", "-d", "99", "-b", "1"]);
    assert!(!unknown.status.success());
    assert!(stderr(&unknown).contains("99"));

    let negative = mlu_router(&["optimize", "-t", &ring, "-s", "1", "-d", "3", "--bandwidth=-1"]);
    assert!(!negative.status.success());

    let no_topology = mlu_router(&["optimize", "-s", "1", "-d", "3", "-b", "1"]);
    assert!(!no_topology.status.success());
    assert!(stderr(&no_topology).contains("No topology given"));

    let unsupported = write(temp_dir.path(), "ring.dot", "graph {}");
    let output = mlu_router(&["inspect", "-t", &unsupported]);
    assert!(!output.status.success());
}
