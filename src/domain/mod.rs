// Domain layer: the extraction engine.
// Source text -> scrubbed text -> units -> call sites -> filtered graph.

pub mod callgraph;
pub mod delimiter;
pub mod dialect;
pub mod graph_builder;
pub mod language;
pub mod policy;
pub mod scrub;
pub mod source;
pub mod unit;
