//! Error type for the outer layers of lexgraph.
//!
//! The extraction engine itself (scrubbing, matching, unit extraction, call
//! scanning, graph building) never fails; it skips what it cannot recognise.
//! Errors only arise when loading sources, reading configuration, compiling
//! user-supplied patterns, or writing reports.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexgraphError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid signature pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("unknown dialect `{0}` (expected `c` or `cobol`)")]
    UnknownDialect(String),

    #[error("graph document error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("no source files to analyze")]
    NoSources,
}

impl LexgraphError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, LexgraphError>;
