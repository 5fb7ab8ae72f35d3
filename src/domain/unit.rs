//! Extracted units (functions, paragraphs, sections).

use crate::domain::language::Dialect;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;

/// A named definition recovered from source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub name: String,
    /// Definition header, trimmed (`static int helper(int x)`, `MAIN-PARA.`).
    pub signature: String,
    /// Byte range of the body in the source the unit was extracted from.
    ///
    /// C-like bodies are a balanced `{ ... }` region, taken from
    /// [`DelimiterSpan::range`](crate::domain::delimiter::DelimiterSpan::range)
    /// with both braces included. COBOL paragraphs have no closing delimiter
    /// and run up to the next header, so the common form is a half-open range.
    pub body_span: Range<usize>,
    /// Text under `body_span`. C-like bodies are sliced from the scrubbed
    /// text; COBOL bodies keep the raw text so quoted `CALL` targets survive.
    pub body: String,
    pub dialect: Dialect,
}

/// Units keyed by name. Re-inserting a name replaces the earlier unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitMap {
    units: BTreeMap<String, Unit>,
}

impl UnitMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a unit, returning the definition it replaced, if any.
    pub fn insert(&mut self, unit: Unit) -> Option<Unit> {
        let replaced = self.units.insert(unit.name.clone(), unit);
        if let Some(old) = &replaced {
            tracing::debug!(name = %old.name, "unit redefined, keeping the later definition");
        }
        replaced
    }

    /// Fold `other` into `self`; units from `other` win on name clashes.
    pub fn merge(&mut self, other: UnitMap) {
        for unit in other.units.into_values() {
            self.insert(unit);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Unit> {
        self.units.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.units.contains_key(name)
    }

    /// Unit names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.units.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl FromIterator<Unit> for UnitMap {
    fn from_iter<I: IntoIterator<Item = Unit>>(iter: I) -> Self {
        let mut map = UnitMap::new();
        for unit in iter {
            map.insert(unit);
        }
        map
    }
}

impl<'a> IntoIterator for &'a UnitMap {
    type Item = &'a Unit;
    type IntoIter = std::collections::btree_map::Values<'a, String, Unit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.values()
    }
}
