// Main library entry point for lexgraph.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ports;

pub use application::{analyze_source, Analysis, AnalyzeUsecase};
pub use config::LexgraphConfig;
pub use domain::callgraph::{CallGraph, CallKind, CallSite};
pub use domain::language::Dialect;
pub use domain::policy::GraphPolicy;
pub use error::{LexgraphError, Result};
