//! MLU Core: topology model, simple-path enumeration, and MLU-minimizing path selection

pub mod error;
pub mod model;
pub mod topology;
pub mod paths;
pub mod utilization;
pub mod optimizer;


#[cfg(test)]
pub mod test_utils;

pub use error::{Error, Result};
pub use model::{NodeId, LinkId, Link, Path, CandidateResult, FlowRequest, LinkUtilization, DEFAULT_LINK_CAPACITY};
pub use topology::Topology;
pub use paths::enumerate_simple_paths;
pub use utilization::{BOTTLENECK_TOLERANCE, evaluate_mlu, link_utilizations, path_link_usage, bottleneck_links};
pub use optimizer::{Selection, Optimizer, OptimizerConfig, PathComparison, find_optimal_path, find_optimal_path_for, compare_path};
