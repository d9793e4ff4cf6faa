//! Run configuration: config file defaults merged with command-line flags

use crate::FlowArgs;
use anyhow::{Context, Result, bail};
use mlu_core::{FlowRequest, NodeId, OptimizerConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Ranked alternatives listed when neither flag nor file says otherwise.
pub const DEFAULT_TOP: usize = 10;

/// Past this many nodes an unbounded search is worth a warning.
pub const LARGE_TOPOLOGY_NODES: usize = 20;

/// Contents of a config file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Relative paths are resolved against the config file's directory.
    pub topology: Option<PathBuf>,
    pub capacity: Option<f64>,
    pub flow: FlowConfig,
    pub parallel: bool,
    pub top: Option<usize>,
    pub results_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FlowConfig {
    pub source: Option<String>,
    pub target: Option<String>,
    pub bandwidth: Option<f64>,
    pub max_hops: Option<usize>,
}

impl Config {
    /// Load a config file, choosing the parser by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;

        let mut config: Config = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("Invalid TOML in {}", path.display()))?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("Invalid YAML in {}", path.display()))?,
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON in {}", path.display()))?,
            _ => bail!("Unsupported config format: {}", path.display()),
        };

        if let (Some(topology), Some(dir)) = (&config.topology, path.parent()) {
            if topology.is_relative() {
                config.topology = Some(dir.join(topology));
            }
        }

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Topology file: flag first, then config file.
    pub fn topology_path(&self, flag: Option<PathBuf>) -> Result<PathBuf> {
        flag.or_else(|| self.topology.clone())
            .context("No topology given: pass --topology or set `topology` in the config file")
    }

    pub fn capacity(&self, flag: Option<f64>) -> Option<f64> {
        flag.or(self.capacity)
    }

    pub fn top(&self, flag: Option<usize>) -> usize {
        flag.or(self.top).unwrap_or(DEFAULT_TOP)
    }

    pub fn results_dir(&self, flag: Option<PathBuf>) -> Option<PathBuf> {
        flag.or_else(|| self.results_dir.clone())
    }

    pub fn optimizer(&self, args: &FlowArgs) -> OptimizerConfig {
        OptimizerConfig {
            parallel: args.parallel || self.parallel,
        }
    }

    /// Build the flow request from flags, falling back to the `[flow]` section.
    pub fn flow_request(&self, args: &FlowArgs) -> Result<FlowRequest> {
        let source = args
            .source
            .clone()
            .or_else(|| self.flow.source.clone())
            .context("No source node: pass --source or set flow.source")?;
        let target = args
            .target
            .clone()
            .or_else(|| self.flow.target.clone())
            .context("No target node: pass --target or set flow.target")?;
        let bandwidth = args
            .bandwidth
            .or(self.flow.bandwidth)
            .context("No bandwidth: pass --bandwidth or set flow.bandwidth")?;

        Ok(FlowRequest {
            source: NodeId::new(source),
            target: NodeId::new(target),
            bandwidth,
            max_hops: args.max_hops.or(self.flow.max_hops),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_toml_resolves_topology_relative_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("route.toml");
        fs::write(
            &path,
            r#"
topology = "graphs/w20.gml"
top = 3

[flow]
source = "1"
target = "7"
bandwidth = 2.5
max_hops = 10
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.topology, Some(temp_dir.path().join("graphs/w20.gml")));
        assert_eq!(config.top(None), 3);
        assert_eq!(config.flow.max_hops, Some(10));
    }

    #[test]
    fn test_load_yaml_and_json() {
        let temp_dir = TempDir::new().unwrap();

        let yaml = temp_dir.path().join("route.yaml");
        fs::write(&yaml, "capacity: 40\nparallel: true\nflow:\n  source: a\n  target: b\n  bandwidth: 1\n").unwrap();
        let config = Config::load(&yaml).unwrap();
        assert_eq!(config.capacity, Some(40.0));
        assert!(config.parallel);

        let json = temp_dir.path().join("route.json");
        fs::write(&json, r#"{"topology": "/abs/net.json", "flow": {"bandwidth": 4}}"#).unwrap();
        let config = Config::load(&json).unwrap();
        assert_eq!(config.topology, Some(PathBuf::from("/abs/net.json")));
        assert_eq!(config.flow.bandwidth, Some(4.0));
    }

    #[test]
    fn test_load_rejects_unknown_keys_and_formats() {
        let temp_dir = TempDir::new().unwrap();

        let typo = temp_dir.path().join("route.toml");
        fs::write(&typo, "topolgy = \"x.gml\"\n").unwrap();
        assert!(Config::load(&typo).is_err());

        let ini = temp_dir.path().join("route.ini");
        fs::write(&ini, "").unwrap();
        assert!(Config::load(&ini).is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let config = Config {
            flow: FlowConfig {
                source: Some("1".to_string()),
                target: Some("3".to_string()),
                bandwidth: Some(2.0),
                max_hops: Some(4),
            },
            ..Config::default()
        };
        let args = FlowArgs {
            target: Some("9".to_string()),
            bandwidth: Some(5.0),
            ..FlowArgs::default()
        };

        let request = config.flow_request(&args).unwrap();
        assert_eq!(request, FlowRequest::new("1", "9", 5.0).with_max_hops(4));
        assert_eq!(config.top(None), DEFAULT_TOP);
        assert_eq!(config.top(Some(2)), 2);
    }

    #[test]
    fn test_missing_request_fields() {
        let config = Config::default();
        let args = FlowArgs {
            source: Some("1".to_string()),
            ..FlowArgs::default()
        };
        let err = config.flow_request(&args).unwrap_err();
        assert!(err.to_string().contains("target"), "{}", err);
        assert!(config.topology_path(None).is_err());
    }
}
