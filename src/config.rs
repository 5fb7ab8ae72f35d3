//! Run configuration loaded from TOML.
//!
//! ```toml
//! [policy]
//! exclude_prefixes = ["str", "mem"]
//! only_defined_callees = true
//!
//! [c]
//! return_types = ['int', 'void', 'size_t']
//!
//! [cobol]
//! fold_case = false
//! ```
//!
//! Every section and key is optional; omitted values keep their defaults.

use crate::domain::dialect::{CLikeConfig, CobolConfig, DialectRegistry};
use crate::domain::policy::GraphPolicy;
use crate::error::{LexgraphError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexgraphConfig {
    pub policy: GraphPolicy,
    pub c: CLikeConfig,
    pub cobol: CobolConfig,
}

impl LexgraphConfig {
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| LexgraphError::Config {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| LexgraphError::io(path, e))?;
        let config = Self::from_toml_str(&content, path)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Compile the dialect strategies this configuration describes.
    pub fn registry(&self) -> Result<DialectRegistry> {
        DialectRegistry::new(&self.c, &self.cobol)
    }
}
