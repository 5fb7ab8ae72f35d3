use crate::domain::language::Dialect;
use std::path::PathBuf;

/// One decoded input handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub dialect: Dialect,
    pub text: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, dialect: Dialect, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            dialect,
            text: text.into(),
        }
    }
}
