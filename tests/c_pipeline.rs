//! End-to-end tests for C-like sources: raw text in, filtered graph out.

use indoc::indoc;
use lexgraph::application::{analyze_source, AnalyzeUsecase};
use lexgraph::domain::dialect::DialectRegistry;
use lexgraph::domain::policy::FilterReason;
use lexgraph::domain::source::SourceFile;
use lexgraph::ports::graph_exporter::{JsonExporter, TextExporter};
use lexgraph::ports::GraphExporter;
use lexgraph::{CallGraph, Dialect, GraphPolicy};
use pretty_assertions::assert_eq;

const LOGGER: &str = indoc! {r#"
    #include <stdio.h>

    int add(int a, int b);

    /* helper(): bump(x) by one */
    static int helper(int x) {
        return x + 1;
    }

    int add(int a, int b) {
        return a + b;
    }

    void mycall(void) {
        helper(3);
    }

    void logData(const char *msg) {
        // trace("not a call")
        printf("%s (%d)\n", msg, 42);
        helper(1);
        add(1, 2);
        mycall();
        putchar('}');
    }
"#};

fn logger_policy() -> GraphPolicy {
    GraphPolicy::default()
        .with_exclude_prefixes(["put"])
        .only_defined(true)
        .self_calls(false)
}

fn edges(graph: &CallGraph) -> Vec<(&str, &str)> {
    graph.edges().collect()
}

#[test]
fn logger_scenario_produces_exact_edges() {
    let analysis = analyze_source(LOGGER, Dialect::CLike, &logger_policy());

    let names: Vec<&str> = analysis.units.names().collect();
    assert_eq!(names, vec!["add", "helper", "logData", "mycall"]);

    assert_eq!(
        edges(&analysis.graph),
        vec![
            ("logData", "add"),
            ("logData", "helper"),
            ("logData", "mycall"),
            ("mycall", "helper"),
        ]
    );
    assert!(analysis.graph.callees_of("add").is_empty());
    assert!(analysis.graph.callers_of("putchar").is_empty());
}

#[test]
fn logger_scenario_drop_counts() {
    let analysis = analyze_source(LOGGER, Dialect::CLike, &logger_policy());
    assert_eq!(analysis.stats.observed, 6);
    assert_eq!(analysis.stats.kept, 4);
    assert_eq!(analysis.stats.dropped_for(FilterReason::ExcludedPrefix), 1);
    assert_eq!(analysis.stats.dropped_for(FilterReason::Undefined), 1);
}

#[test]
fn comments_and_literals_never_yield_calls() {
    let analysis = analyze_source(LOGGER, Dialect::CLike, &GraphPolicy::default());
    let callees: Vec<&str> = analysis.calls.iter().map(|c| c.callee.as_str()).collect();
    assert!(!callees.contains(&"trace"));
    assert!(!callees.contains(&"bump"));
    assert!(callees.contains(&"printf"));
    assert!(callees.contains(&"putchar"));
}

#[test]
fn unit_body_slices_raw_source() {
    let analysis = analyze_source(LOGGER, Dialect::CLike, &GraphPolicy::default());
    let unit = analysis.units.get("helper").unwrap();
    assert_eq!(&LOGGER[unit.body_span.clone()], "{\n    return x + 1;\n}");
    assert_eq!(unit.signature, "static int helper(int x)");
}

#[test]
fn prototypes_only_produce_no_units() {
    let source = indoc! {"
        int parse(const char *s);
        void reset(void);
        extern long total(int n);
    "};
    let analysis = analyze_source(source, Dialect::CLike, &GraphPolicy::default());
    assert!(analysis.units.is_empty());
    assert!(analysis.graph.is_empty());
}

#[test]
fn unbalanced_unit_is_skipped_and_scanning_continues() {
    let source = indoc! {"
        int broken(int x {
            return x;
        }
        int ok(void) {
            work();
        }
    "};
    let analysis = analyze_source(source, Dialect::CLike, &GraphPolicy::default());
    assert!(!analysis.units.contains("broken"));
    assert!(analysis.graph.contains_edge("ok", "work"));
}

#[test]
fn redefinition_keeps_last_body() {
    let source = indoc! {"
        void step(void) {
            first();
        }
        void step(void) {
            second();
        }
    "};
    let analysis = analyze_source(source, Dialect::CLike, &GraphPolicy::default());
    assert_eq!(analysis.units.len(), 1);
    assert_eq!(analysis.graph.callees_of("step"), ["second".to_string()]);
}

#[test]
fn self_calls_follow_policy() {
    let source = "int fact(int n) { return n ? n * fact(n - 1) : 1; }";
    let without = analyze_source(source, Dialect::CLike, &GraphPolicy::default());
    assert!(without.graph.is_empty());
    let with = analyze_source(source, Dialect::CLike, &GraphPolicy::default().self_calls(true));
    assert_eq!(edges(&with.graph), vec![("fact", "fact")]);
}

#[test]
fn pipeline_is_idempotent() {
    let registry = DialectRegistry::default();
    let policy = logger_policy();
    let usecase = AnalyzeUsecase::new(&registry, &policy);
    let sources = vec![SourceFile::new("logger.c", Dialect::CLike, LOGGER)];

    let first = usecase.run(&sources);
    let second = usecase.run(&sources);
    assert_eq!(first.graph, second.graph);
    assert_eq!(
        TextExporter.render(&first.graph).unwrap(),
        TextExporter.render(&second.graph).unwrap()
    );
}

#[test]
fn json_report_loads_back() {
    let analysis = analyze_source(LOGGER, Dialect::CLike, &logger_policy());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("callgraph.json");
    JsonExporter.export(&analysis.graph, path.to_str().unwrap()).unwrap();

    let loaded = JsonExporter::load(&path).unwrap();
    assert_eq!(loaded, analysis.graph);
    assert_eq!(loaded.roots(&analysis.units), vec!["logData"]);
    assert_eq!(loaded.reachable_from("logData", None), vec!["add", "helper", "mycall"]);
}
