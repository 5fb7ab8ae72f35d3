use crate::domain::callgraph::{CallGraph, CallSite};
use crate::domain::language::Dialect;
use crate::domain::unit::{Unit, UnitMap};
use crate::error::{LexgraphError, Result};

pub mod graph_exporter;

/// Dialect strategy: how units are delimited and how calls are spelled.
pub trait UnitExtractor {
    fn dialect(&self) -> Dialect;

    /// Locate every unit definition in raw source text.
    fn extract_units(&self, source: &str) -> UnitMap;

    /// Raw call observations inside one unit's body, in source order.
    fn scan_calls(&self, unit: &Unit) -> Vec<CallSite>;
}

/// Renders a finished call graph. Exporters never mutate the graph.
pub trait GraphExporter {
    fn render(&self, graph: &CallGraph) -> Result<String>;

    fn export(&self, graph: &CallGraph, path: &str) -> Result<()> {
        let content = self.render(graph)?;
        std::fs::write(path, content).map_err(|e| LexgraphError::io(path, e))
    }
}
