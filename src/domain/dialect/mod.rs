//! Dialect strategies and dispatch.
//!
//! Each dialect is configured once; a run picks the strategy per source file
//! through [`DialectEngine`], so the graph builder stays shared.

pub mod c_like;
pub mod cobol;

use crate::domain::callgraph::CallSite;
use crate::domain::language::Dialect;
use crate::domain::unit::{Unit, UnitMap};
use crate::error::Result;
use crate::ports::UnitExtractor;

pub use c_like::{CLikeConfig, CLikeDialect};
pub use cobol::{CobolConfig, CobolDialect};

/// Configured strategies for every supported dialect.
#[derive(Debug, Clone, Default)]
pub struct DialectRegistry {
    c_like: CLikeDialect,
    cobol: CobolDialect,
}

impl DialectRegistry {
    pub fn new(c_like: &CLikeConfig, cobol: &CobolConfig) -> Result<Self> {
        Ok(Self {
            c_like: CLikeDialect::new(c_like)?,
            cobol: CobolDialect::new(cobol),
        })
    }

    pub fn engine(&self, dialect: Dialect) -> DialectEngine<'_> {
        match dialect {
            Dialect::CLike => DialectEngine::CLike(&self.c_like),
            Dialect::Cobol => DialectEngine::Cobol(&self.cobol),
        }
    }
}

/// Tagged dispatch over the configured strategies.
#[derive(Debug, Clone, Copy)]
pub enum DialectEngine<'a> {
    CLike(&'a CLikeDialect),
    Cobol(&'a CobolDialect),
}

impl UnitExtractor for DialectEngine<'_> {
    fn dialect(&self) -> Dialect {
        match self {
            DialectEngine::CLike(d) => d.dialect(),
            DialectEngine::Cobol(d) => d.dialect(),
        }
    }

    fn extract_units(&self, source: &str) -> UnitMap {
        match self {
            DialectEngine::CLike(d) => d.extract_units(source),
            DialectEngine::Cobol(d) => d.extract_units(source),
        }
    }

    fn scan_calls(&self, unit: &Unit) -> Vec<CallSite> {
        match self {
            DialectEngine::CLike(d) => d.scan_calls(unit),
            DialectEngine::Cobol(d) => d.scan_calls(unit),
        }
    }
}
