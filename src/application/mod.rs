//! Extraction pipeline: scrub -> extract units -> scan calls -> build graph.

use crate::domain::callgraph::{CallGraph, CallSite};
use crate::domain::dialect::DialectRegistry;
use crate::domain::graph_builder::{self, FilterStats};
use crate::domain::language::Dialect;
use crate::domain::policy::GraphPolicy;
use crate::domain::source::SourceFile;
use crate::domain::unit::UnitMap;
use crate::ports::UnitExtractor;
use rayon::prelude::*;

/// Everything one run derives from its inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    pub units: UnitMap,
    /// Raw observations of the surviving units, grouped by caller name.
    pub calls: Vec<CallSite>,
    pub graph: CallGraph,
    pub stats: FilterStats,
}

pub struct AnalyzeUsecase<'a> {
    pub registry: &'a DialectRegistry,
    pub policy: &'a GraphPolicy,
}

impl<'a> AnalyzeUsecase<'a> {
    pub fn new(registry: &'a DialectRegistry, policy: &'a GraphPolicy) -> Self {
        Self { registry, policy }
    }

    /// Analyse `sources` on the current thread.
    pub fn run(&self, sources: &[SourceFile]) -> Analysis {
        let per_file = sources.iter().map(|s| self.extract(s)).collect();
        self.assemble(per_file)
    }

    /// Analyse `sources`, extracting units from different files in parallel.
    /// The result is identical to [`AnalyzeUsecase::run`].
    pub fn run_parallel(&self, sources: &[SourceFile], pool: &rayon::ThreadPool) -> Analysis {
        let per_file = pool.install(|| sources.par_iter().map(|s| self.extract(s)).collect());
        self.assemble(per_file)
    }

    fn extract(&self, source: &SourceFile) -> UnitMap {
        let units = self.registry.engine(source.dialect).extract_units(&source.text);
        tracing::debug!(
            path = %source.path.display(),
            dialect = %source.dialect,
            units = units.len(),
            "units extracted"
        );
        units
    }

    /// Merge per-file units in input order (later files win on name
    /// clashes), then scan and filter.
    fn assemble(&self, per_file: Vec<UnitMap>) -> Analysis {
        let mut units = UnitMap::new();
        for file_units in per_file {
            units.merge(file_units);
        }

        let calls: Vec<CallSite> = units
            .iter()
            .flat_map(|unit| self.registry.engine(unit.dialect).scan_calls(unit))
            .collect();

        let (graph, stats) = graph_builder::build_with_stats(&units, &calls, self.policy);
        Analysis {
            units,
            calls,
            graph,
            stats,
        }
    }
}

/// Run the whole pipeline over one in-memory source with default dialect
/// settings.
pub fn analyze_source(text: &str, dialect: Dialect, policy: &GraphPolicy) -> Analysis {
    let registry = DialectRegistry::default();
    let source = SourceFile::new("<memory>", dialect, text);
    AnalyzeUsecase::new(&registry, policy).run(std::slice::from_ref(&source))
}
