//! COBOL-like dialect: paragraphs and sections delimited by their header
//! lines, calls spelled `PERFORM name` or `CALL "program"`.

use crate::domain::callgraph::{CallKind, CallSite};
use crate::domain::language::Dialect;
use crate::domain::scrub::scrub;
use crate::domain::unit::{Unit, UnitMap};
use crate::ports::UnitExtractor;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

static PROCEDURE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:\d{6}[ \t]+)?PROCEDURE[ \t]+DIVISION\b[^.]*\.")
        .expect("procedure division pattern is valid")
});

static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:\d{6}[ \t]+)?[ \t]*(?P<head>(?P<name>[A-Za-z0-9][A-Za-z0-9-]*)(?:[ \t]+SECTION)?[ \t]*\.)(?:[ \t]|$)",
    )
    .expect("header pattern is valid")
});

static PERFORM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:^|[^A-Za-z0-9-])PERFORM\s+(?P<target>[A-Za-z0-9][A-Za-z0-9-]*)(?:\s+(?:THRU|THROUGH)\s+(?P<thru>[A-Za-z0-9][A-Za-z0-9-]*))?",
    )
    .expect("perform pattern is valid")
});

static CALL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?:^|[^A-Za-z0-9-])(?P<kw>CALL)\s+["']?(?P<target>[A-Za-z0-9][A-Za-z0-9-]*)"#)
        .expect("call pattern is valid")
});

const DEFAULT_RESERVED: &[&str] = &[
    // Statements that can stand alone as a sentence.
    "EXIT", "GOBACK", "CONTINUE", "STOP", "ELSE", "END", "END-EXEC", "END-IF", "END-READ",
    "END-WRITE", "END-PERFORM", "END-EVALUATE", "END-CALL", "END-COMPUTE", "END-STRING",
    "END-SEARCH", "DECLARATIVES",
    // Division-level paragraphs and sections.
    "PROGRAM-ID", "AUTHOR", "INSTALLATION", "DATE-WRITTEN", "DATE-COMPILED", "SECURITY",
    "SOURCE-COMPUTER", "OBJECT-COMPUTER", "SPECIAL-NAMES", "FILE-CONTROL", "I-O-CONTROL",
    "CONFIGURATION", "INPUT-OUTPUT", "FILE", "WORKING-STORAGE", "LOCAL-STORAGE", "LINKAGE",
    "REPORT", "SCREEN", "COMMUNICATION",
];

const DEFAULT_PERFORM_NOISE: &[&str] = &["UNTIL", "VARYING", "WITH", "TEST", "TIMES", "FOREVER"];

/// Paragraph recognition parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CobolConfig {
    /// Header names that are never units.
    pub reserved: Vec<String>,
    /// Words after `PERFORM` that start an inline perform, not a target.
    pub perform_noise: Vec<String>,
    /// Upper-case unit and callee names.
    pub fold_case: bool,
}

impl Default for CobolConfig {
    fn default() -> Self {
        Self {
            reserved: DEFAULT_RESERVED.iter().map(|s| s.to_string()).collect(),
            perform_noise: DEFAULT_PERFORM_NOISE.iter().map(|s| s.to_string()).collect(),
            fold_case: true,
        }
    }
}

/// Extracts COBOL paragraphs/sections and `PERFORM`/`CALL` references.
#[derive(Debug, Clone)]
pub struct CobolDialect {
    reserved: BTreeSet<String>,
    perform_noise: BTreeSet<String>,
    fold_case: bool,
}

struct Header {
    name: String,
    signature: String,
    name_start: usize,
    name_end: usize,
}

impl CobolDialect {
    pub fn new(config: &CobolConfig) -> Self {
        let upper = |words: &[String]| -> BTreeSet<String> {
            words.iter().map(|w| w.to_ascii_uppercase()).collect()
        };
        Self {
            reserved: upper(&config.reserved),
            perform_noise: upper(&config.perform_noise),
            fold_case: config.fold_case,
        }
    }

    fn normalize(&self, name: &str) -> String {
        if self.fold_case {
            name.to_ascii_uppercase()
        } else {
            name.to_string()
        }
    }

    fn is_target(&self, token: &str) -> bool {
        !token.bytes().all(|b| b.is_ascii_digit())
            && !self.perform_noise.contains(&token.to_ascii_uppercase())
    }

    /// Header lines after the procedure division (or in the whole text when
    /// there is none), in source order.
    fn headers(&self, text: &str) -> Vec<Header> {
        let region_start = PROCEDURE_RE.find(text).map_or(0, |m| m.end());
        let mut headers = Vec::new();
        let mut sentence_closed = true;
        let mut offset = region_start;

        for line in text[region_start..].split_inclusive('\n') {
            let line_start = offset;
            offset += line.len();

            let content = line.trim_end();
            let trimmed = without_sequence_area(content).trim_start();
            if trimmed.is_empty() {
                continue;
            }

            if sentence_closed {
                let found = HEADER_RE
                    .captures(content)
                    .and_then(|c| Some((c.name("name")?, c.name("head")?)));
                if let Some((name, head)) = found {
                    if self.reserved.contains(&name.as_str().to_ascii_uppercase()) {
                        tracing::trace!(name = name.as_str(), "reserved word, not a paragraph");
                    } else {
                        headers.push(Header {
                            name: self.normalize(name.as_str()),
                            signature: head.as_str().to_string(),
                            name_start: line_start + name.start(),
                            name_end: line_start + name.end(),
                        });
                    }
                }
            }
            sentence_closed = trimmed.ends_with('.');
        }

        headers
    }

    fn site(&self, unit: &Unit, m: regex::Match<'_>, kind: CallKind) -> CallSite {
        CallSite {
            caller: unit.name.clone(),
            callee: self.normalize(m.as_str()),
            position: unit.body_span.start + m.start(),
            kind,
        }
    }
}

/// `line` without a leading six-digit sequence number, if it has one.
fn without_sequence_area(line: &str) -> &str {
    match line.as_bytes().get(..6) {
        Some(area) if area.iter().all(u8::is_ascii_digit) => &line[6..],
        _ => line,
    }
}

impl Default for CobolDialect {
    fn default() -> Self {
        Self::new(&CobolConfig::default())
    }
}

impl UnitExtractor for CobolDialect {
    fn dialect(&self) -> Dialect {
        Dialect::Cobol
    }

    fn extract_units(&self, source: &str) -> UnitMap {
        let text = scrub(source, Dialect::Cobol.comment_syntax());
        let headers = self.headers(&text);
        let mut units = UnitMap::new();

        for (i, header) in headers.iter().enumerate() {
            let end = headers.get(i + 1).map_or(text.len(), |next| next.name_start);
            units.insert(Unit {
                name: header.name.clone(),
                signature: header.signature.clone(),
                body_span: header.name_end..end,
                body: source[header.name_end..end].to_string(),
                dialect: Dialect::Cobol,
            });
        }

        tracing::debug!(units = units.len(), "cobol paragraphs extracted");
        units
    }

    fn scan_calls(&self, unit: &Unit) -> Vec<CallSite> {
        // Comments and literal text are blanked; `CALL "PROG"` targets are
        // read from the raw body once the keyword itself is known to be code.
        let masked = scrub(&unit.body, Dialect::Cobol.comment_syntax());
        let mut sites = Vec::new();

        for caps in PERFORM_RE.captures_iter(&masked) {
            let Some(target) = caps.name("target").filter(|t| self.is_target(t.as_str())) else {
                continue;
            };
            sites.push(self.site(unit, target, CallKind::Local));
            if let Some(thru) = caps.name("thru") {
                sites.push(self.site(unit, thru, CallKind::Local));
            }
        }

        for caps in CALL_RE.captures_iter(&unit.body) {
            let (Some(keyword), Some(target)) = (caps.name("kw"), caps.name("target")) else {
                continue;
            };
            if masked.as_bytes()[keyword.start()] == b' ' {
                tracing::trace!(callee = target.as_str(), "CALL inside literal or comment ignored");
                continue;
            }
            sites.push(self.site(unit, target, CallKind::External));
        }

        sites.sort_by_key(|s| s.position);
        sites
    }
}
