//! Descriptor extraction: walks documented classes and collects descriptors.
//!
//! Classes are visited in IRI order, annotation literals of a class in text
//! order, and lines in source order, so the descriptor sequence is the same
//! for every run over the same graph.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::error::LineError;
use crate::extraction::annotation::{parse_annotation, LineMatch};
use crate::model::descriptor::PropertyDescriptor;
use crate::model::graph::OntologyGraph;
use crate::model::vocab::standard;

/// A dropped annotation line and why it was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub owner_class: String,
    pub line: String,
    #[serde(flatten)]
    pub error: LineError,
}

/// Output of [`AnnotationExtractor::extract`].
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub descriptors: Vec<PropertyDescriptor>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Reads the documentation annotations of every class in an [`OntologyGraph`].
pub struct AnnotationExtractor<'a> {
    graph: &'a OntologyGraph,
    annotation_predicates: &'a [String],
}

impl<'a> AnnotationExtractor<'a> {
    pub fn new(graph: &'a OntologyGraph, annotation_predicates: &'a [String]) -> Self {
        Self {
            graph,
            annotation_predicates,
        }
    }

    /// Classes that can own descriptors: subjects typed `owl:Class` or `rdfs:Class`.
    fn documented_classes(&self) -> BTreeSet<&'a str> {
        let mut classes = self.graph.instances_of(standard::OWL_CLASS);
        classes.extend(self.graph.instances_of(standard::RDFS_CLASS));
        classes
    }

    /// Run the extraction.
    pub fn extract(&self) -> Extraction {
        let mut out = Extraction::default();
        let prefixes = self.graph.prefixes();

        for class in self.documented_classes() {
            let before = out.descriptors.len();
            for predicate in self.annotation_predicates {
                for text in self.graph.literal_values(class, predicate) {
                    for (line, outcome) in parse_annotation(text, class, prefixes) {
                        match outcome {
                            LineMatch::Matched(descriptor) => out.descriptors.push(descriptor),
                            LineMatch::Skipped => {}
                            LineMatch::Malformed(error) => {
                                debug!(class, line, %error, "dropping annotation line");
                                out.diagnostics.push(Diagnostic {
                                    owner_class: class.to_string(),
                                    line: line.to_string(),
                                    error,
                                });
                            }
                        }
                    }
                }
            }
            let found = out.descriptors.len() - before;
            if found > 0 {
                debug!(class, descriptors = found, "extracted property descriptors");
            }
        }

        out
    }
}
