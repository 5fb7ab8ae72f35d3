//! End-to-end tests for COBOL-like sources.

use indoc::indoc;
use lexgraph::application::{analyze_source, AnalyzeUsecase};
use lexgraph::config::LexgraphConfig;
use lexgraph::domain::source::SourceFile;
use lexgraph::{CallKind, Dialect, GraphPolicy};
use pretty_assertions::assert_eq;
use std::path::Path;

const CUSTRPT: &str = indoc! {r#"
       IDENTIFICATION DIVISION.
       PROGRAM-ID. CUSTRPT.
       DATA DIVISION.
       WORKING-STORAGE SECTION.
       01 WS-COUNT PIC 9(4).
       PROCEDURE DIVISION.
       MAIN-PARA.
           PERFORM READ-CUSTOMERS
           PERFORM CALC-AVERAGE
           CALL "EXT-REPORT" USING WS-COUNT
           STOP RUN.
       READ-CUSTOMERS.
      * PERFORM COMMENTED-OUT
           PERFORM UNTIL WS-COUNT > 10
               ADD 1 TO WS-COUNT
           END-PERFORM
           PERFORM DB-UPDATE.
       CALC-AVERAGE.
           COMPUTE WS-AVG = WS-TOTAL / WS-COUNT.
       DB-UPDATE.
           EXIT.
"#};

fn only_defined() -> GraphPolicy {
    GraphPolicy::default().only_defined(true)
}

#[test]
fn paragraphs_after_procedure_division() {
    let analysis = analyze_source(CUSTRPT, Dialect::Cobol, &only_defined());
    let names: Vec<&str> = analysis.units.names().collect();
    assert_eq!(names, vec!["CALC-AVERAGE", "DB-UPDATE", "MAIN-PARA", "READ-CUSTOMERS"]);
}

#[test]
fn external_calls_survive_only_defined() {
    let analysis = analyze_source(CUSTRPT, Dialect::Cobol, &only_defined());
    let edges: Vec<(&str, &str)> = analysis.graph.edges().collect();
    assert_eq!(
        edges,
        vec![
            ("MAIN-PARA", "CALC-AVERAGE"),
            ("MAIN-PARA", "EXT-REPORT"),
            ("MAIN-PARA", "READ-CUSTOMERS"),
            ("READ-CUSTOMERS", "DB-UPDATE"),
        ]
    );

    let external = analysis
        .calls
        .iter()
        .find(|c| c.callee == "EXT-REPORT")
        .unwrap();
    assert_eq!(external.kind, CallKind::External);
    assert!(!analysis.units.contains("EXT-REPORT"));
}

#[test]
fn comment_lines_and_inline_performs_are_ignored() {
    let analysis = analyze_source(CUSTRPT, Dialect::Cobol, &GraphPolicy::default());
    let callees: Vec<&str> = analysis.calls.iter().map(|c| c.callee.as_str()).collect();
    assert!(!callees.contains(&"COMMENTED-OUT"));
    assert!(!callees.contains(&"UNTIL"));
    assert_eq!(analysis.graph.callees_of("READ-CUSTOMERS"), ["DB-UPDATE".to_string()]);
}

#[test]
fn display_text_never_becomes_an_edge() {
    let source = indoc! {r#"
        MAIN-PARA.
            DISPLAY "PERFORM NOTHING"
            DISPLAY "PLEASE CALL SUPPORT"
            PERFORM SUB-PARA.
        SUB-PARA.
            EXIT.
    "#};
    for policy in [GraphPolicy::default(), only_defined()] {
        let analysis = analyze_source(source, Dialect::Cobol, &policy);
        let edges: Vec<(&str, &str)> = analysis.graph.edges().collect();
        assert_eq!(edges, vec![("MAIN-PARA", "SUB-PARA")]);
    }
}

#[test]
fn header_line_may_carry_a_statement() {
    let source = "PROCEDURE DIVISION.\nMAIN-PARA. PERFORM SUB-PARA.\nSUB-PARA.\n    EXIT.\n";
    let analysis = analyze_source(source, Dialect::Cobol, &GraphPolicy::default());
    let edges: Vec<(&str, &str)> = analysis.graph.edges().collect();
    assert_eq!(edges, vec![("MAIN-PARA", "SUB-PARA")]);
}

#[test]
fn sequence_numbered_comment_is_not_scanned() {
    let source = indoc! {"
        000100 PROCEDURE DIVISION.
        000200 MAIN-PARA.
        000300*    PERFORM GHOST
        000400     PERFORM SUB-PARA.
        000500 SUB-PARA.
        000600     EXIT.
    "};
    let analysis = analyze_source(source, Dialect::Cobol, &GraphPolicy::default());
    let edges: Vec<(&str, &str)> = analysis.graph.edges().collect();
    assert_eq!(edges, vec![("MAIN-PARA", "SUB-PARA")]);
}

#[test]
fn call_positions_point_into_raw_text() {
    let analysis = analyze_source(CUSTRPT, Dialect::Cobol, &GraphPolicy::default());
    for site in &analysis.calls {
        let raw = &CUSTRPT[site.position..site.position + site.callee.len()];
        assert_eq!(raw, site.callee);
    }
}

#[test]
fn exclude_prefix_applies_to_external_calls() {
    let policy = only_defined().with_exclude_prefixes(["EXT-"]);
    let analysis = analyze_source(CUSTRPT, Dialect::Cobol, &policy);
    assert!(!analysis.graph.contains_edge("MAIN-PARA", "EXT-REPORT"));
    assert_eq!(analysis.graph.edge_count(), 3);
}

#[test]
fn mixed_dialect_run_from_config() {
    let config = LexgraphConfig::from_toml_str(
        indoc! {r#"
            [policy]
            only_defined_callees = true

            [cobol]
            fold_case = true
        "#},
        Path::new("inline.toml"),
    )
    .unwrap();
    let registry = config.registry().unwrap();
    let sources = vec![
        SourceFile::new("custrpt.cbl", Dialect::Cobol, CUSTRPT),
        SourceFile::new("report.c", Dialect::CLike, "int report(void) { format(); return 0; }\nvoid format(void) { }"),
    ];

    let analysis = AnalyzeUsecase::new(&registry, &config.policy).run(&sources);
    assert_eq!(analysis.units.len(), 6);
    assert!(analysis.graph.contains_edge("report", "format"));
    assert!(analysis.graph.contains_edge("MAIN-PARA", "EXT-REPORT"));
    assert_eq!(analysis.graph.roots(&analysis.units), vec!["MAIN-PARA", "report"]);
}
