//! Exclusion policy applied when turning call observations into edges.

use crate::domain::callgraph::{CallKind, CallSite};
use crate::domain::unit::UnitMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Call-target names that are language keywords rather than calls in the
/// C-like dialect (`if (x)`, `sizeof(int)`, ...).
pub const DEFAULT_RESERVED: &[&str] = &["if", "for", "while", "switch", "return", "sizeof"];

/// Filtering rules for one graph build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphPolicy {
    pub reserved: BTreeSet<String>,
    /// Literal prefixes; a callee starting with any of them is dropped.
    pub exclude_prefixes: Vec<String>,
    pub only_defined_callees: bool,
    pub include_self_calls: bool,
}

impl Default for GraphPolicy {
    fn default() -> Self {
        Self {
            reserved: DEFAULT_RESERVED.iter().map(|s| s.to_string()).collect(),
            exclude_prefixes: Vec::new(),
            only_defined_callees: false,
            include_self_calls: false,
        }
    }
}

/// Why an observation did not become an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterReason {
    Reserved,
    ExcludedPrefix,
    SelfCall,
    Undefined,
}

impl GraphPolicy {
    pub fn with_exclude_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_prefixes.extend(prefixes.into_iter().map(Into::into));
        self
    }

    pub fn only_defined(mut self, on: bool) -> Self {
        self.only_defined_callees = on;
        self
    }

    pub fn self_calls(mut self, on: bool) -> Self {
        self.include_self_calls = on;
        self
    }

    /// First rule that rejects `site`, checked in the order reserved, prefix,
    /// self-call, defined-only. External calls are exempt from the last rule.
    pub fn rejects(&self, site: &CallSite, units: &UnitMap) -> Option<FilterReason> {
        let callee = site.callee.as_str();
        if self.reserved.contains(callee) {
            Some(FilterReason::Reserved)
        } else if self.exclude_prefixes.iter().any(|p| callee.starts_with(p.as_str())) {
            Some(FilterReason::ExcludedPrefix)
        } else if !self.include_self_calls && callee == site.caller {
            Some(FilterReason::SelfCall)
        } else if self.only_defined_callees
            && site.kind == CallKind::Local
            && !units.contains(callee)
        {
            Some(FilterReason::Undefined)
        } else {
            None
        }
    }
}
