//! Call Graph Exporters
//!
//! Renders a CallGraph as a console report, a JSON document, or Graphviz DOT.

use crate::domain::callgraph::CallGraph;
use crate::error::{LexgraphError, Result};
use crate::ports::GraphExporter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Serialized form of a call graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub edges: Vec<(String, String)>,
    pub calls: BTreeMap<String, Vec<String>>,
    pub called_by: BTreeMap<String, Vec<String>>,
}

impl From<&CallGraph> for GraphDocument {
    fn from(graph: &CallGraph) -> Self {
        Self {
            edges: graph
                .edges()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
            calls: graph.forward().clone(),
            called_by: graph.reverse().clone(),
        }
    }
}

/// Edge list followed by both adjacency views.
pub struct TextExporter;

impl GraphExporter for TextExporter {
    fn render(&self, graph: &CallGraph) -> Result<String> {
        let mut lines = vec!["=== Edges (caller → callee) ===".to_string()];
        lines.extend(graph.edges().map(|(a, b)| format!("{} -> {}", a, b)));
        lines.push(String::new());
        lines.push("=== Calls (caller → [callees]) ===".to_string());
        lines.push(serde_json::to_string_pretty(graph.forward())?);
        lines.push(String::new());
        lines.push("=== Called By (callee ← [callers]) ===".to_string());
        lines.push(serde_json::to_string_pretty(graph.reverse())?);
        Ok(lines.join("\n") + "\n")
    }
}

/// `{"edges": [...], "calls": {...}, "called_by": {...}}`.
pub struct JsonExporter;

impl JsonExporter {
    /// Rebuild a graph from a document written by this exporter.
    ///
    /// Only `edges` is authoritative; both views are re-derived from it.
    pub fn parse(content: &str) -> Result<CallGraph> {
        let document: GraphDocument = serde_json::from_str(content)?;
        Ok(CallGraph::from_edges(document.edges))
    }

    pub fn load(path: &Path) -> Result<CallGraph> {
        let content = std::fs::read_to_string(path).map_err(|e| LexgraphError::io(path, e))?;
        Self::parse(&content)
    }
}

impl GraphExporter for JsonExporter {
    fn render(&self, graph: &CallGraph) -> Result<String> {
        Ok(serde_json::to_string_pretty(&GraphDocument::from(graph))? + "\n")
    }
}

/// Graphviz digraph, one node per name.
pub struct DotExporter;

impl DotExporter {
    fn escape_label(label: &str) -> String {
        label
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n")
    }
}

impl GraphExporter for DotExporter {
    fn render(&self, graph: &CallGraph) -> Result<String> {
        let mut lines = Vec::new();

        lines.push("digraph CallGraph {".to_string());
        lines.push("    rankdir=LR;".to_string());
        lines.push("    node [shape=box, fontname=\"Helvetica\", fontsize=12];".to_string());
        lines.push(String::new());

        for node in graph.nodes() {
            let label = Self::escape_label(node);
            lines.push(format!("    \"{}\" [label=\"{}\"];", label, label));
        }

        lines.push(String::new());

        for (caller, callee) in graph.edges() {
            lines.push(format!(
                "    \"{}\" -> \"{}\";",
                Self::escape_label(caller),
                Self::escape_label(callee)
            ));
        }

        lines.push("}".to_string());
        Ok(lines.join("\n") + "\n")
    }
}
