//! End-to-end conversion tests through the library pipeline.

use std::fs;
use std::path::PathBuf;

use owl2shacl::config::{ConversionOptions, OutputFormat};
use owl2shacl::error::LineError;
use owl2shacl::loader::document::load_file;
use owl2shacl::loader::InputLocator;
use owl2shacl::model::graph::{OntologyFragment, OntologyGraph};
use owl2shacl::pipeline::{self, write_all_atomic, write_atomic};
use owl2shacl::Error;
use tempfile::TempDir;

const WORK: &str = "http://example.org/Work";

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn works() -> InputLocator {
    InputLocator::File(fixture("works.ttl"))
}

#[test]
fn bad_lines_are_dropped_and_good_lines_kept() {
    let conversion = pipeline::convert(&works(), &ConversionOptions::default()).unwrap();

    assert_eq!(conversion.diagnostics.len(), 2);
    assert!(conversion
        .diagnostics
        .iter()
        .all(|d| d.owner_class == WORK));
    assert!(conversion.diagnostics.iter().any(|d| {
        d.error
            == LineError::UnresolvedPrefix {
                prefix: "bogus".to_string(),
            }
    }));
    assert!(conversion
        .diagnostics
        .iter()
        .any(|d| matches!(d.error, LineError::InvalidCardinality { .. })));

    let work = conversion.shapes.node_shape(WORK).unwrap();
    let paths: Vec<_> = work.properties.keys().map(String::as_str).collect();
    assert_eq!(
        paths,
        vec![
            "http://purl.org/dc/terms/title",
            "http://purl.org/cerif/frapo/hasFundingAgency",
            "http://example.org/pageCount",
            "http://example.org/keyword",
        ]
    );
    assert_eq!(conversion.shapes.len(), 2);
    assert_eq!(conversion.shapes.property_shape_count(), 5);
}

#[test]
fn undocumented_classes_get_no_shape() {
    let conversion = pipeline::convert(&works(), &ConversionOptions::default()).unwrap();
    assert!(conversion.shapes.node_shape("http://example.org/Undocumented").is_none());
    assert!(conversion
        .shapes
        .node_shape("http://purl.org/cerif/frapo/FundingAgency")
        .is_none());
}

#[test]
fn output_is_byte_identical_across_runs() {
    let options = ConversionOptions::default();
    let first = pipeline::convert(&works(), &options)
        .unwrap()
        .render(OutputFormat::Turtle, &options)
        .unwrap();
    let second = pipeline::convert(&works(), &options)
        .unwrap()
        .render(OutputFormat::Turtle, &options)
        .unwrap();
    assert_eq!(first.bytes, second.bytes);
    assert_eq!(first.triples, second.triples);
}

#[test]
fn default_shapes_namespace() {
    let options = ConversionOptions::default();
    let rendered = pipeline::convert(&works(), &options)
        .unwrap()
        .render(OutputFormat::Turtle, &options)
        .unwrap();
    let text = String::from_utf8(rendered.bytes).unwrap();
    assert!(text.contains("@prefix skgsh: <https://w3id.org/skg-if/shapes/> .\n"));
    assert!(text.contains("skgsh:Work-title sh:path dcterms:title .\n"));
    assert!(text.contains("skgsh:Work-hasFundingAgency sh:class frapo:FundingAgency .\n"));
    assert!(text.contains("skgsh:Work-keyword sh:datatype xsd:string .\n"));
}

#[test]
fn modular_ontology_converts() {
    let options = ConversionOptions::default();
    let conversion =
        pipeline::convert(&InputLocator::Directory(fixture("modules")), &options).unwrap();
    assert!(conversion.diagnostics.is_empty());
    assert_eq!(conversion.shapes.len(), 2);
    assert!(conversion
        .shapes
        .node_shape("http://purl.org/cerif/frapo/Grant")
        .is_some());
    assert_eq!(conversion.shapes.property_shape_count(), 4);
}

#[test]
fn prefix_conflict_aborts_before_building() {
    let err = pipeline::convert(
        &InputLocator::Directory(fixture("conflicting")),
        &ConversionOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::PrefixConflict { .. }));
}

#[test]
fn custom_annotation_predicate() {
    let options = ConversionOptions {
        annotation_predicates: vec!["http://www.w3.org/2000/01/rdf-schema#comment".to_string()],
        ..ConversionOptions::default()
    };
    let conversion = pipeline::convert(&works(), &options).unwrap();
    assert!(conversion.shapes.is_empty());
    assert!(conversion.diagnostics.is_empty());
}

#[test]
fn report_serializes_counts_and_diagnostics() {
    let conversion = pipeline::convert(&works(), &ConversionOptions::default()).unwrap();
    let report = conversion.report(&works(), 42);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["node_shapes"], 2);
    assert_eq!(json["property_shapes"], 5);
    assert_eq!(json["triples"], 42);
    let diagnostics = json["diagnostics"].as_array().unwrap();
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics
        .iter()
        .any(|d| d["kind"] == "unresolved_prefix" && d["prefix"] == "bogus"));
    assert!(diagnostics
        .iter()
        .any(|d| d["kind"] == "invalid_cardinality" && d["token"] == "3..1"));
}

#[test]
fn write_atomic_replaces_destination() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shapes.ttl");
    fs::write(&path, "old").unwrap();
    write_atomic(&path, b"new").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[cfg(unix)]
#[test]
fn write_atomic_creates_files_like_a_plain_write() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let plain = dir.path().join("plain.ttl");
    fs::write(&plain, "x").unwrap();
    let atomic = dir.path().join("atomic.ttl");
    write_atomic(&atomic, b"x").unwrap();

    let mode = |p: &std::path::Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode(atomic.as_path()), mode(plain.as_path()));
}

#[cfg(unix)]
#[test]
fn write_atomic_keeps_existing_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shapes.ttl");
    fs::write(&path, "old").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

    write_atomic(&path, b"new").unwrap();
    assert_eq!(fs::metadata(&path).unwrap().permissions().mode() & 0o777, 0o640);
}

#[test]
fn write_all_atomic_touches_nothing_when_one_file_fails() {
    let dir = TempDir::new().unwrap();
    let shapes = dir.path().join("shapes.ttl");
    let report = dir.path().join("missing").join("report.json");

    let files = [
        (shapes.as_path(), b"shapes".as_slice()),
        (report.as_path(), b"{}".as_slice()),
    ];
    assert!(write_all_atomic(&files).is_err());
    assert!(!shapes.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

fn convert_text(turtle: &str) -> owl2shacl::Result<pipeline::Conversion> {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("onto.ttl");
    fs::write(&path, turtle).unwrap();
    pipeline::convert(&InputLocator::File(path), &ConversionOptions::default())
}

#[test]
fn conflicting_lines_abort_the_conversion() {
    let err = convert_text(
        r#"@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix dc: <http://purl.org/dc/elements/1.1/> .
@prefix dcterms: <http://purl.org/dc/terms/> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix ex: <http://example.org/> .

ex:Work a owl:Class ;
    dc:description """* dcterms:title -[1]-> rdfs:Literal
* dcterms:title -[0..N]-> rdfs:Literal""" .
"#,
    )
    .unwrap_err();
    match err {
        Error::ConflictingDescriptor { first, second, .. } => {
            assert_eq!(first, "Work title -[1]-> Literal");
            assert_eq!(second, "Work title -[0..N]-> Literal");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn classes_with_the_same_local_name_collide() {
    let err = convert_text(
        r#"@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix dc: <http://purl.org/dc/elements/1.1/> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix foaf: <http://xmlns.com/foaf/0.1/> .
@prefix ex: <http://example.org/> .

ex:Agent a owl:Class ;
    dc:description "* ex:name -[1]-> rdfs:Literal" .

foaf:Agent a owl:Class ;
    dc:description "* foaf:name -[1]-> rdfs:Literal" .
"#,
    )
    .unwrap_err();
    assert!(matches!(err, Error::ShapeIriCollision { .. }), "{err}");
}

#[test]
fn module_order_does_not_change_the_shapes() {
    let documents = [
        fixture("modules/core/core.ttl"),
        fixture("modules/core/agents.nt"),
        fixture("modules/funding/funding.ttl"),
    ];
    let fragments: Vec<OntologyFragment> =
        documents.iter().map(|p| load_file(p).unwrap()).collect();
    let options = ConversionOptions::default();

    let render = |order: &[usize]| {
        let merged = order
            .iter()
            .try_fold(OntologyFragment::new(), |acc, &i| acc.merge(fragments[i].clone()))
            .unwrap();
        let conversion = pipeline::convert_graph(OntologyGraph::from(merged), &options).unwrap();
        let rendered = conversion.render(OutputFormat::Turtle, &options).unwrap();
        (conversion.shapes, rendered.bytes)
    };

    let (shapes, bytes) = render(&[0, 1, 2]);
    for order in [[2, 1, 0], [1, 2, 0], [2, 0, 1]] {
        let (other_shapes, other_bytes) = render(&order);
        assert_eq!(other_shapes, shapes);
        assert_eq!(other_bytes, bytes);
    }
}
