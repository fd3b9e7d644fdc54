//! Property descriptors parsed out of class documentation.

use std::fmt;

use serde::Serialize;

use crate::model::iri::local_name;
use crate::model::vocab;

/// Allowed number of values for a property. `max == None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CardinalityRange {
    pub min: u32,
    pub max: Option<u32>,
}

impl CardinalityRange {
    pub fn exactly(n: u32) -> Self {
        Self {
            min: n,
            max: Some(n),
        }
    }

    pub fn at_least(min: u32) -> Self {
        Self { min, max: None }
    }

    pub fn is_unbounded(&self) -> bool {
        self.max.is_none()
    }
}

impl fmt::Display for CardinalityRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) if max == self.min => write!(f, "[{}]", self.min),
            Some(max) => write!(f, "[{}..{}]", self.min, max),
            None => write!(f, "[{}..N]", self.min),
        }
    }
}

/// A resolved target type, classified by what kind of constraint it needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "iri", rename_all = "snake_case")]
pub enum TargetRef {
    Datatype(String),
    Class(String),
}

impl TargetRef {
    /// Classify `iri` as a datatype (XSD and RDF literal types) or a class.
    pub fn classify(iri: String) -> Self {
        if vocab::is_datatype(&iri) {
            TargetRef::Datatype(iri)
        } else {
            TargetRef::Class(iri)
        }
    }

    pub fn iri(&self) -> &str {
        match self {
            TargetRef::Datatype(iri) | TargetRef::Class(iri) => iri,
        }
    }
}

/// One `prefix:property -[cardinality]-> prefix:Target` line, resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    pub owner_class: String,
    pub property: String,
    pub cardinality: CardinalityRange,
    pub target: TargetRef,
}

impl fmt::Display for PropertyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} -{}-> {}",
            local_name(&self.owner_class),
            local_name(&self.property),
            self.cardinality,
            local_name(self.target.iri())
        )
    }
}
