//! Loader errors

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unsupported topology format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("GML syntax error at line {line}: {message}")]
    Gml { line: usize, message: String },

    #[error("JSON topology error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Topology(#[from] mlu_core::Error),
}

pub type Result<T> = std::result::Result<T, LoadError>;
