// Infrastructure for lexgraph: file system access and worker pools.

pub mod concurrency;
pub mod source_loader;

pub use concurrency::{build_pool, default_workers};
pub use source_loader::SourceLoader;
