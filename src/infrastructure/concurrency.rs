//! Worker pool sizing for multi-file extraction runs.
//! Leaves roughly half the machine free for the caller.

use crate::error::Result;

/// Default worker count: half the logical cores, at least one.
pub fn default_workers() -> usize {
    std::cmp::max(1, num_cpus::get() / 2)
}

/// Build a dedicated rayon pool for one run. The global pool is never
/// configured. `None` or zero selects [`default_workers`].
pub fn build_pool(workers: Option<usize>) -> Result<rayon::ThreadPool> {
    let workers = workers.filter(|&n| n > 0).unwrap_or_else(default_workers);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("lexgraph-worker-{}", i))
        .build()?;

    tracing::debug!(workers, cores = num_cpus::get(), "worker pool ready");
    Ok(pool)
}
