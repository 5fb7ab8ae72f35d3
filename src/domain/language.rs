//! Dialect Domain Module
//!
//! Source language families the extractor understands.

use crate::domain::scrub::CommentSyntax;
use crate::error::LexgraphError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Supported source dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Dialect {
    #[default]
    #[serde(rename = "c")]
    CLike,
    #[serde(rename = "cobol")]
    Cobol,
}

impl Dialect {
    /// Infer dialect from file extension.
    pub fn from_extension(ext: &str) -> Option<Dialect> {
        match ext.to_lowercase().as_str() {
            "c" | "h" | "pc" => Some(Dialect::CLike),
            "cbl" | "cob" | "cpy" => Some(Dialect::Cobol),
            _ => None,
        }
    }

    /// Infer dialect from a file path.
    pub fn from_path(path: &Path) -> Option<Dialect> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Get the display name of the dialect.
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::CLike => "C-like",
            Dialect::Cobol => "COBOL-like",
        }
    }

    /// Get the file extensions for this dialect.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Dialect::CLike => &["c", "h", "pc"],
            Dialect::Cobol => &["cbl", "cob", "cpy"],
        }
    }

    /// Comment and literal conventions used when scrubbing.
    pub fn comment_syntax(&self) -> &'static CommentSyntax {
        match self {
            Dialect::CLike => &CommentSyntax::C_LIKE,
            Dialect::Cobol => &CommentSyntax::COBOL,
        }
    }
}

impl FromStr for Dialect {
    type Err = LexgraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "c" | "c-like" | "clike" => Ok(Dialect::CLike),
            "cobol" | "cbl" | "cob" => Ok(Dialect::Cobol),
            _ => Err(LexgraphError::UnknownDialect(s.to_string())),
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
