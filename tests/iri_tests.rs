//! Tests for shape IRI minting.

use owl2shacl::model::iri::{local_name, ShapeIriAllocator, ShapeKey};
use owl2shacl::Error;

const BASE: &str = "https://w3id.org/skg-if/shapes/";

#[test]
fn node_and_property_shape_iris() {
    let allocator = ShapeIriAllocator::new(BASE).unwrap();
    assert_eq!(allocator.base(), BASE);
    assert_eq!(
        allocator.node_shape_iri("http://example.org/Work"),
        "https://w3id.org/skg-if/shapes/Work"
    );
    assert_eq!(
        allocator.property_shape_iri("http://example.org/Work", "http://purl.org/dc/terms/title"),
        "https://w3id.org/skg-if/shapes/Work-title"
    );
}

#[test]
fn local_names_are_percent_encoded() {
    let allocator = ShapeIriAllocator::new(BASE).unwrap();
    assert_eq!(
        allocator.node_shape_iri("urn:example:a b"),
        "https://w3id.org/skg-if/shapes/a%20b"
    );
}

#[test]
fn local_name_variants() {
    assert_eq!(local_name("http://www.w3.org/2000/01/rdf-schema#Literal"), "Literal");
    assert_eq!(local_name("http://purl.org/cerif/frapo/FundingAgency"), "FundingAgency");
    assert_eq!(local_name("plain"), "plain");
}

#[test]
fn relative_base_is_rejected() {
    assert!(matches!(
        ShapeIriAllocator::new("shapes/"),
        Err(Error::InvalidShapesBase { .. })
    ));
}

#[test]
fn same_key_twice_yields_same_iri() {
    let mut allocator = ShapeIriAllocator::new(BASE).unwrap();
    let key = ShapeKey::Node {
        class: "http://example.org/Work".to_string(),
    };
    let first = allocator.allocate(key.clone()).unwrap();
    let second = allocator.allocate(key).unwrap();
    assert_eq!(first, second);
}

#[test]
fn classes_sharing_a_local_name_collide() {
    let mut allocator = ShapeIriAllocator::new(BASE).unwrap();
    allocator
        .allocate(ShapeKey::Node {
            class: "http://example.org/Agent".to_string(),
        })
        .unwrap();
    let err = allocator
        .allocate(ShapeKey::Node {
            class: "http://xmlns.com/foaf/0.1/Agent".to_string(),
        })
        .unwrap_err();
    match err {
        Error::ShapeIriCollision { iri, first, second } => {
            assert_eq!(iri, "https://w3id.org/skg-if/shapes/Agent");
            assert!(first.contains("http://example.org/Agent"));
            assert!(second.contains("http://xmlns.com/foaf/0.1/Agent"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn node_and_property_shapes_can_collide() {
    let mut allocator = ShapeIriAllocator::new(BASE).unwrap();
    allocator
        .allocate(ShapeKey::Property {
            class: "http://example.org/Work".to_string(),
            property: "http://example.org/title".to_string(),
        })
        .unwrap();
    assert!(allocator
        .allocate(ShapeKey::Node {
            class: "http://example.org/Work-title".to_string(),
        })
        .is_err());
}
