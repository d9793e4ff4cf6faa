//! Topology loading from persisted graph files

pub mod error;
pub mod formats;
pub mod loader;


pub use error::{LoadError, Result};
pub use formats::{TopologyFormat, get_format};
pub use loader::{load_topology, parse_topology};
