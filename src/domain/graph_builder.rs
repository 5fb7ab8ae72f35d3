//! Graph Builder
//!
//! Applies a [`GraphPolicy`] to raw call observations and assembles the
//! resulting [`CallGraph`]. Pure: no I/O, no errors.

use crate::domain::callgraph::{CallGraph, CallSite};
use crate::domain::policy::{FilterReason, GraphPolicy};
use crate::domain::unit::UnitMap;
use std::collections::HashMap;

/// Counts of what happened to each observation during a build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub observed: usize,
    pub kept: usize,
    pub dropped: HashMap<FilterReason, usize>,
}

impl FilterStats {
    pub fn dropped_for(&self, reason: FilterReason) -> usize {
        self.dropped.get(&reason).copied().unwrap_or(0)
    }
}

/// Build the call graph for `units` from the observed `calls`.
pub fn build<'a, I>(units: &UnitMap, calls: I, policy: &GraphPolicy) -> CallGraph
where
    I: IntoIterator<Item = &'a CallSite>,
{
    build_with_stats(units, calls, policy).0
}

/// [`build`], also reporting how many observations each rule dropped.
pub fn build_with_stats<'a, I>(units: &UnitMap, calls: I, policy: &GraphPolicy) -> (CallGraph, FilterStats)
where
    I: IntoIterator<Item = &'a CallSite>,
{
    let mut stats = FilterStats::default();
    let mut edges = Vec::new();

    for site in calls {
        stats.observed += 1;
        match policy.rejects(site, units) {
            Some(reason) => {
                tracing::trace!(
                    caller = %site.caller,
                    callee = %site.callee,
                    ?reason,
                    "call dropped"
                );
                *stats.dropped.entry(reason).or_insert(0) += 1;
            }
            None => {
                stats.kept += 1;
                edges.push((site.caller.clone(), site.callee.clone()));
            }
        }
    }

    let graph = CallGraph::from_edges(edges);
    tracing::debug!(
        observed = stats.observed,
        kept = stats.kept,
        edges = graph.edge_count(),
        "call graph built"
    );
    (graph, stats)
}
