//! C-like dialect: functions recognised by a return-type signature and
//! delimited by balanced parentheses and braces.

use crate::domain::callgraph::{CallKind, CallSite};
use crate::domain::delimiter::match_span;
use crate::domain::language::Dialect;
use crate::domain::scrub::scrub;
use crate::domain::unit::{Unit, UnitMap};
use crate::error::Result;
use crate::ports::UnitExtractor;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static CALL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Za-z_]\w*)\s*\(").expect("call pattern is valid"));

/// Signature recognition parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CLikeConfig {
    /// Keywords allowed before the return type (matched literally).
    pub qualifiers: Vec<String>,
    /// Accepted return types as regex fragments, tried in order.
    pub return_types: Vec<String>,
}

impl Default for CLikeConfig {
    fn default() -> Self {
        let qualifiers = ["static", "inline", "extern", "const", "volatile", "register"];
        let return_types = [
            r"unsigned\s+long\s+long",
            r"unsigned\s+long",
            r"unsigned\s+int",
            r"long\s+long",
            r"long",
            r"int",
            r"char\s*\*",
            r"char",
            r"void\s*\*",
            r"void",
            r"struct\s+\w+(?:\s*\*)?",
        ];
        Self {
            qualifiers: qualifiers.iter().map(|s| s.to_string()).collect(),
            return_types: return_types.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CLikeConfig {
    fn signature_pattern(&self) -> String {
        let qualifiers = if self.qualifiers.is_empty() {
            String::new()
        } else {
            let alternatives: Vec<String> = self.qualifiers.iter().map(|q| regex::escape(q)).collect();
            format!(r"(?:\b(?:{})\b\s+)*", alternatives.join("|"))
        };
        format!(
            r"{}\b(?:{})\s+(?P<name>[A-Za-z_]\w*)\s*\(",
            qualifiers,
            self.return_types.join("|")
        )
    }
}

/// Extracts C-style function definitions and call expressions.
#[derive(Debug, Clone)]
pub struct CLikeDialect {
    signature: Option<Regex>,
}

impl CLikeDialect {
    pub fn new(config: &CLikeConfig) -> Result<Self> {
        let signature = if config.return_types.is_empty() {
            None
        } else {
            Some(Regex::new(&config.signature_pattern())?)
        };
        Ok(Self { signature })
    }

    /// Scrubbed text plus the units found in it.
    pub fn extract_scrubbed(&self, source: &str) -> (String, UnitMap) {
        let text = scrub(source, Dialect::CLike.comment_syntax());
        let mut units = UnitMap::new();
        let Some(signature) = &self.signature else {
            return (text, units);
        };

        for caps in signature.captures_iter(&text) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.name("name")) else {
                continue;
            };
            let name = name.as_str();

            let p_open = whole.end() - 1;
            let Some(params) = match_span(&text, p_open, '(', ')') else {
                tracing::debug!(name, offset = p_open, "unbalanced parameter list, candidate skipped");
                continue;
            };

            let after = &text[params.close + 1..];
            let b_open = params.close + 1 + (after.len() - after.trim_start().len());
            if text.as_bytes().get(b_open) != Some(&b'{') {
                tracing::trace!(name, "declaration without body skipped");
                continue;
            }

            let Some(body) = match_span(&text, b_open, '{', '}') else {
                tracing::debug!(name, offset = b_open, "unbalanced body, candidate skipped");
                continue;
            };

            units.insert(Unit {
                name: name.to_string(),
                signature: text[whole.start()..=params.close].trim().to_string(),
                body_span: body.range(),
                body: text[body.range()].to_string(),
                dialect: Dialect::CLike,
            });
        }

        (text, units)
    }
}

impl Default for CLikeDialect {
    fn default() -> Self {
        Self::new(&CLikeConfig::default()).expect("default signature pattern is valid")
    }
}

impl UnitExtractor for CLikeDialect {
    fn dialect(&self) -> Dialect {
        Dialect::CLike
    }

    fn extract_units(&self, source: &str) -> UnitMap {
        self.extract_scrubbed(source).1
    }

    fn scan_calls(&self, unit: &Unit) -> Vec<CallSite> {
        CALL_RE
            .captures_iter(&unit.body)
            .filter_map(|caps| caps.get(1))
            .map(|m| CallSite {
                caller: unit.name.clone(),
                callee: m.as_str().to_string(),
                position: unit.body_span.start + m.start(),
                kind: CallKind::Local,
            })
            .collect()
    }
}
