// Call graph structures for lexgraph.
// Represents caller -> callee relationships between extracted units.

use crate::domain::unit::UnitMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

/// How a call-like token refers to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallKind {
    /// Expected to resolve to a unit in the analysed source.
    Local,
    /// Names another program (COBOL `CALL`); never required to resolve.
    External,
}

/// A raw, unfiltered observation of a call inside a caller's body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallSite {
    pub caller: String,
    pub callee: String,
    /// Byte offset of the callee token in the source.
    pub position: usize,
    pub kind: CallKind,
}

/// Deduplicated caller -> callee edges with sorted adjacency views.
///
/// `forward` and `reverse` are always derived from `edges`; the graph is
/// immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallGraph {
    edges: BTreeSet<(String, String)>,
    forward: BTreeMap<String, Vec<String>>,
    reverse: BTreeMap<String, Vec<String>>,
}

impl CallGraph {
    /// Build a graph from an edge list. Duplicate edges collapse.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let edges: BTreeSet<(String, String)> = edges.into_iter().collect();
        let mut forward: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut reverse: BTreeMap<String, Vec<String>> = BTreeMap::new();

        // Set iteration is ordered by (caller, callee), so both views come
        // out sorted and unique without a second pass.
        for (caller, callee) in &edges {
            forward.entry(caller.clone()).or_default().push(callee.clone());
            reverse.entry(callee.clone()).or_default().push(caller.clone());
        }

        Self {
            edges,
            forward,
            reverse,
        }
    }

    /// Edges in lexicographic `(caller, callee)` order.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges.iter().map(|(a, b)| (a.as_str(), b.as_str()))
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains_edge(&self, caller: &str, callee: &str) -> bool {
        self.edges.contains(&(caller.to_string(), callee.to_string()))
    }

    /// caller -> sorted callees.
    pub fn forward(&self) -> &BTreeMap<String, Vec<String>> {
        &self.forward
    }

    /// callee -> sorted callers.
    pub fn reverse(&self) -> &BTreeMap<String, Vec<String>> {
        &self.reverse
    }

    pub fn callees_of(&self, name: &str) -> &[String] {
        self.forward.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn callers_of(&self, name: &str) -> &[String] {
        self.reverse.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every name that appears on either end of an edge.
    pub fn nodes(&self) -> BTreeSet<&str> {
        self.edges
            .iter()
            .flat_map(|(a, b)| [a.as_str(), b.as_str()])
            .collect()
    }

    /// Defined units that no other unit calls, sorted.
    pub fn roots<'a>(&self, units: &'a UnitMap) -> Vec<&'a str> {
        units
            .names()
            .filter(|name| self.callers_of(name).iter().all(|caller| caller == name))
            .collect()
    }

    /// Names reachable from `root` by following call edges, sorted.
    ///
    /// `root` itself is only included when it lies on a cycle. With
    /// `max_depth`, traversal stops after that many hops.
    pub fn reachable_from(&self, root: &str, max_depth: Option<usize>) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<(&str, usize)> = VecDeque::from([(root, 0)]);

        while let Some((node, depth)) = queue.pop_front() {
            if max_depth.is_some_and(|max| depth >= max) {
                continue;
            }
            for callee in self.callees_of(node) {
                if seen.insert(callee.as_str()) {
                    queue.push_back((callee.as_str(), depth + 1));
                }
            }
        }

        let mut reached: Vec<String> = seen.into_iter().map(str::to_string).collect();
        reached.sort();
        reached
    }
}
