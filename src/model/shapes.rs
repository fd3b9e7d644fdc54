//! The generated constraints graph.

use std::collections::BTreeMap;

use indexmap::IndexMap;

use crate::model::descriptor::{CardinalityRange, TargetRef};

/// The single value constraint carried by a property shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueConstraint {
    /// Values must be literals of this datatype.
    Datatype(String),
    /// Values must be instances of this class.
    Class(String),
}

impl From<&TargetRef> for ValueConstraint {
    fn from(target: &TargetRef) -> Self {
        match target {
            TargetRef::Datatype(iri) => ValueConstraint::Datatype(iri.clone()),
            TargetRef::Class(iri) => ValueConstraint::Class(iri.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyShape {
    pub iri: String,
    pub path: String,
    pub min_count: u32,
    pub max_count: Option<u32>,
    pub constraint: ValueConstraint,
}

impl PropertyShape {
    pub fn cardinality(&self) -> CardinalityRange {
        CardinalityRange {
            min: self.min_count,
            max: self.max_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeShape {
    pub iri: String,
    pub target_class: String,
    /// Keyed by property IRI, in the order descriptors were first seen.
    pub properties: IndexMap<String, PropertyShape>,
}

impl NodeShape {
    pub fn new(iri: String, target_class: String) -> Self {
        Self {
            iri,
            target_class,
            properties: IndexMap::new(),
        }
    }

    pub fn property(&self, path: &str) -> Option<&PropertyShape> {
        self.properties.get(path)
    }
}

/// Node shapes keyed by target class, iterated in class-IRI order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShapeGraph {
    nodes: BTreeMap<String, NodeShape>,
}

impl ShapeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_shape(&self, class: &str) -> Option<&NodeShape> {
        self.nodes.get(class)
    }

    pub(crate) fn node_shape_mut(&mut self, class: &str) -> Option<&mut NodeShape> {
        self.nodes.get_mut(class)
    }

    pub(crate) fn insert_node_shape(&mut self, shape: NodeShape) {
        self.nodes.insert(shape.target_class.clone(), shape);
    }

    pub fn node_shapes(&self) -> impl Iterator<Item = &NodeShape> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn property_shape_count(&self) -> usize {
        self.nodes.values().map(|n| n.properties.len()).sum()
    }
}
