//! Writes a [`ShapeGraph`] through a [`TriplesEmitter`].
//!
//! Node shapes are written in class-IRI order and property shapes in the
//! order they were built, so a deterministic shape graph always produces the
//! same bytes.

use std::io;

use crate::config::{ClassTargetMode, ConversionOptions};
use crate::emitter::TriplesEmitter;
use crate::model::graph::PrefixMap;
use crate::model::shapes::{NodeShape, PropertyShape, ShapeGraph, ValueConstraint};
use crate::model::vocab::{sh, standard};

/// Serializes shapes, declaring only the prefixes the output uses.
pub struct ShapeGraphWriter<'a, E: TriplesEmitter> {
    emitter: &'a mut E,
    ontology_prefixes: &'a PrefixMap,
    options: &'a ConversionOptions,
}

impl<'a, E: TriplesEmitter> ShapeGraphWriter<'a, E> {
    pub fn new(
        emitter: &'a mut E,
        ontology_prefixes: &'a PrefixMap,
        options: &'a ConversionOptions,
    ) -> Self {
        Self {
            emitter,
            ontology_prefixes,
            options,
        }
    }

    /// Write every shape. Does not flush the emitter.
    pub fn write(&mut self, shapes: &ShapeGraph) -> io::Result<()> {
        self.register_prefixes(shapes);
        for node in shapes.node_shapes() {
            self.write_node_shape(node)?;
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Prefix registration
    // -----------------------------------------------------------------------

    /// IRIs taken from the ontology: classes, paths and constraint targets.
    fn referenced_iris(shapes: &ShapeGraph) -> Vec<&str> {
        let mut iris = Vec::new();
        for node in shapes.node_shapes() {
            iris.push(node.target_class.as_str());
            for property in node.properties.values() {
                iris.push(property.path.as_str());
                match &property.constraint {
                    // Rendered as sh:nodeKind, the IRI itself is never written.
                    ValueConstraint::Datatype(iri) if iri == standard::RDFS_LITERAL => {}
                    ValueConstraint::Datatype(iri) | ValueConstraint::Class(iri) => {
                        iris.push(iri.as_str())
                    }
                }
            }
        }
        iris
    }

    fn register_prefixes(&mut self, shapes: &ShapeGraph) {
        let mut declared: Vec<(String, String)> = vec![
            (sh::PREFIX.to_string(), sh::NS.to_string()),
            ("rdf".to_string(), standard::RDF.to_string()),
            ("xsd".to_string(), standard::XSD.to_string()),
            (
                self.options.shapes_prefix.clone(),
                self.options.shapes_base.clone(),
            ),
        ];

        for iri in Self::referenced_iris(shapes) {
            if declared.iter().any(|(_, ns)| iri.starts_with(ns.as_str())) {
                continue;
            }
            let binding = self
                .ontology_prefixes
                .iter()
                .filter(|(_, ns)| !ns.is_empty() && iri.starts_with(ns))
                .max_by_key(|(_, ns)| ns.len());
            if let Some((prefix, ns)) = binding {
                if declared.iter().all(|(p, _)| p != prefix) {
                    declared.push((prefix.to_string(), ns.to_string()));
                }
            }
        }

        for (prefix, ns) in &declared {
            self.emitter.add_prefix(prefix, ns);
        }
    }

    // -----------------------------------------------------------------------
    // Shapes
    // -----------------------------------------------------------------------

    fn write_node_shape(&mut self, node: &NodeShape) -> io::Result<()> {
        self.emitter
            .emit_iri(&node.iri, standard::RDF_TYPE, sh::NODE_SHAPE)?;
        self.emitter
            .emit_iri(&node.iri, sh::TARGET_CLASS, &node.target_class)?;
        for property in node.properties.values() {
            self.emitter
                .emit_iri(&node.iri, sh::PROPERTY, &property.iri)?;
        }
        for property in node.properties.values() {
            self.write_property_shape(property)?;
        }
        Ok(())
    }

    fn write_property_shape(&mut self, property: &PropertyShape) -> io::Result<()> {
        let iri = property.iri.as_str();
        self.emitter
            .emit_iri(iri, standard::RDF_TYPE, sh::PROPERTY_SHAPE)?;
        self.emitter.emit_iri(iri, sh::PATH, &property.path)?;
        self.emitter
            .emit_int(iri, sh::MIN_COUNT, i64::from(property.min_count))?;
        if let Some(max) = property.max_count {
            self.emitter.emit_int(iri, sh::MAX_COUNT, i64::from(max))?;
        }
        self.write_constraint(iri, &property.constraint)
    }

    fn write_constraint(&mut self, shape: &str, constraint: &ValueConstraint) -> io::Result<()> {
        match constraint {
            // Every literal is an rdfs:Literal, whatever its datatype.
            ValueConstraint::Datatype(datatype) if datatype == standard::RDFS_LITERAL => {
                self.emitter.emit_iri(shape, sh::NODE_KIND, sh::LITERAL)
            }
            ValueConstraint::Datatype(datatype) => {
                self.emitter.emit_iri(shape, sh::DATATYPE, datatype)
            }
            ValueConstraint::Class(class) => match self.options.class_targets {
                ClassTargetMode::Strict => self.emitter.emit_iri(shape, sh::CLASS, class),
                ClassTargetMode::Lenient => self.write_lenient_class(shape, class),
            },
        }
    }

    /// `sh:or ( [ sh:class C ] [ sh:nodeKind sh:BlankNodeOrIRI ] )`
    fn write_lenient_class(&mut self, shape: &str, class: &str) -> io::Result<()> {
        let head = self.emitter.blank_node();
        self.emitter.emit_iri(shape, sh::OR, &head)?;

        let typed = self.emitter.blank_node();
        self.emitter.emit_iri(&head, standard::RDF_FIRST, &typed)?;
        self.emitter.emit_iri(&typed, sh::CLASS, class)?;

        let tail = self.emitter.blank_node();
        self.emitter.emit_iri(&head, standard::RDF_REST, &tail)?;
        let untyped = self.emitter.blank_node();
        self.emitter.emit_iri(&tail, standard::RDF_FIRST, &untyped)?;
        self.emitter
            .emit_iri(&untyped, sh::NODE_KIND, sh::BLANK_NODE_OR_IRI)?;
        self.emitter
            .emit_iri(&tail, standard::RDF_REST, standard::RDF_NIL)
    }
}
