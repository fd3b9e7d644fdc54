//! CLI integration tests.
//!
//! These tests invoke the `owl2shacl` binary via `std::process::Command`
//! against the fixture ontologies and check files, streams and exit codes.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
        .to_str()
        .expect("utf-8 fixture path")
        .to_string()
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_owl2shacl"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("OWL2SHACL_SHAPES_BASE")
        .output()
        .expect("failed to execute binary")
}

#[test]
fn writes_turtle_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("shapes.ttl");
    let output = run(&[out.to_str().unwrap(), "-i", &fixture("works.ttl"), "-q"]);

    assert!(
        output.status.success(),
        "owl2shacl failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(output.stdout.is_empty());
    let text = fs::read_to_string(&out).unwrap();
    assert!(text.starts_with("@prefix "));
    assert!(text.contains("skgsh:Work rdf:type sh:NodeShape .\n"));
    assert!(text.contains("skgsh:Agent-name sh:nodeKind sh:Literal .\n"));
}

#[test]
fn quiet_keeps_stderr_empty() {
    let output = run(&["-i", &fixture("works.ttl"), "-q"]);
    assert!(output.status.success());
    assert!(output.stderr.is_empty(), "{}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn dropped_lines_are_reported_on_stderr() {
    let output = run(&["-i", &fixture("works.ttl")]);
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unresolved prefix 'bogus:'"), "{stderr}");
    assert!(stderr.contains("Generated shapes from"), "{stderr}");
}

#[test]
fn strict_exits_with_two_when_lines_dropped() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("shapes.ttl");
    let output = run(&[
        out.to_str().unwrap(),
        "-i",
        &fixture("works.ttl"),
        "--strict",
        "-q",
    ]);
    assert_eq!(output.status.code(), Some(2));
    assert!(out.exists());
}

#[test]
fn strict_succeeds_on_clean_input() {
    let output = run(&["-i", &fixture("modules"), "--strict", "-q"]);
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn prefix_conflict_exits_with_one_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("shapes.ttl");
    let output = run(&[out.to_str().unwrap(), "-i", &fixture("conflicting"), "-q"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!out.exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error: "), "{stderr}");
    assert!(stderr.contains("prefix 'ex:'"), "{stderr}");
}

#[test]
fn missing_version_names_the_release() {
    let output = run(&[
        "--ontology-root",
        &fixture("releases"),
        "--version",
        "9.9.9",
        "-q",
    ]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Ontology version 9.9.9 not found at"), "{stderr}");
}

#[test]
fn tagged_release_to_stdout() {
    let output = run(&[
        "--ontology-root",
        &fixture("releases"),
        "--version",
        "1.0.0",
        "--shapes-base",
        "http://example.org/shapes/",
        "--shapes-prefix",
        "exsh",
        "-q",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("@prefix exsh: <http://example.org/shapes/> .\n"));
    assert!(stdout.contains("exsh:Agent-name sh:path foaf:name .\n"));
    assert!(!stdout.contains("sh:maxCount \"0\""));
}

#[test]
fn ntriples_format() {
    let output = run(&["-i", &fixture("works.ttl"), "-f", "nt", "-q"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.is_empty());
    for line in stdout.lines() {
        assert!(line.ends_with(" ."), "{line}");
        assert!(line.starts_with('<') || line.starts_with("_:"), "{line}");
    }
}

#[test]
fn lenient_class_targets() {
    let output = run(&["-i", &fixture("works.ttl"), "--allow-untyped-references", "-q"]);
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("sh:nodeKind sh:BlankNodeOrIRI ."));
    assert!(stdout.contains("skgsh:Work-hasFundingAgency sh:or _:b1 .\n"));
}

#[test]
fn report_file_is_json() {
    let dir = TempDir::new().unwrap();
    let report = dir.path().join("report.json");
    let output = run(&[
        "-i",
        &fixture("works.ttl"),
        "--report",
        report.to_str().unwrap(),
        "-q",
    ]);
    assert!(output.status.success());
    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["node_shapes"], 2);
    assert_eq!(json["diagnostics"].as_array().unwrap().len(), 2);
}

#[test]
fn verbose_and_quiet_conflict() {
    let output = run(&["-i", &fixture("works.ttl"), "-v", "-q"]);
    assert!(!output.status.success());
}

#[test]
fn unwritable_report_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("shapes.ttl");
    let report = dir.path().join("missing").join("report.json");
    let output = run(&[
        out.to_str().unwrap(),
        "-i",
        &fixture("works.ttl"),
        "--report",
        report.to_str().unwrap(),
        "-q",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!out.exists());
    assert!(!report.exists());
}

#[test]
fn conflicting_lines_exit_with_one_and_write_nothing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("onto.ttl");
    fs::write(
        &input,
        r#"@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix dc: <http://purl.org/dc/elements/1.1/> .
@prefix dcterms: <http://purl.org/dc/terms/> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix ex: <http://example.org/> .

ex:Work a owl:Class ;
    dc:description """* dcterms:title -[1]-> rdfs:Literal
* dcterms:title -[0..1]-> rdfs:Literal""" .
"#,
    )
    .unwrap();
    let out = dir.path().join("shapes.ttl");
    let output = run(&[out.to_str().unwrap(), "-i", input.to_str().unwrap(), "-q"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!out.exists());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("conflicting descriptors"), "{stderr}");
    assert!(stderr.contains("Work title -[1]-> Literal"), "{stderr}");
}
