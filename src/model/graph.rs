//! In-memory ontology graph and the fragment value type it is merged from.
//!
//! Each loaded document becomes an [`OntologyFragment`]. Fragments combine
//! with [`OntologyFragment::merge`], which is a set union over triples and
//! prefix bindings and therefore independent of merge order. The merged
//! fragment is frozen into an [`OntologyGraph`] that nothing downstream can
//! extend.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::model::vocab::standard;

/// An RDF term, owned and totally ordered so triple sets are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Term {
    Iri(String),
    Blank(String),
    Literal {
        value: String,
        datatype: String,
        language: Option<String>,
    },
}

impl Term {
    pub fn iri(value: impl Into<String>) -> Self {
        Term::Iri(value.into())
    }

    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Term::Literal { value, .. } => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Triple {
    pub subject: Term,
    pub predicate: String,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: Term, predicate: impl Into<String>, object: Term) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }
}

/// Prefix-to-namespace bindings.
///
/// Binding the same prefix twice is allowed only when both bindings agree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixMap {
    bindings: BTreeMap<String, String>,
}

impl PrefixMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `prefix` to `namespace`, failing with [`Error::PrefixConflict`]
    /// if the prefix already names a different namespace.
    pub fn bind(&mut self, prefix: &str, namespace: &str) -> Result<()> {
        match self.bindings.get(prefix) {
            Some(existing) if existing != namespace => {
                // Sorted so the message does not depend on which side came first.
                let (first, second) = if existing.as_str() <= namespace {
                    (existing.clone(), namespace.to_string())
                } else {
                    (namespace.to_string(), existing.clone())
                };
                Err(Error::PrefixConflict {
                    prefix: prefix.to_string(),
                    first,
                    second,
                })
            }
            Some(_) => Ok(()),
            None => {
                self.bindings
                    .insert(prefix.to_string(), namespace.to_string());
                Ok(())
            }
        }
    }

    pub fn resolve(&self, prefix: &str) -> Option<&str> {
        self.bindings.get(prefix).map(String::as_str)
    }

    /// Expand `prefix:local` into a full IRI.
    pub fn expand(&self, prefix: &str, local: &str) -> Option<String> {
        self.resolve(prefix).map(|ns| format!("{ns}{local}"))
    }

    /// Iterate bindings in prefix order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings
            .iter()
            .map(|(prefix, ns)| (prefix.as_str(), ns.as_str()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Union of two binding sets.
    pub fn merge(mut self, other: &PrefixMap) -> Result<Self> {
        for (prefix, ns) in other.iter() {
            self.bind(prefix, ns)?;
        }
        Ok(self)
    }
}

/// Triples and prefix bindings read from one or more documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OntologyFragment {
    pub triples: BTreeSet<Triple>,
    pub prefixes: PrefixMap,
}

impl OntologyFragment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union of two fragments. Commutative and associative; the only failure
    /// is a prefix bound to two different namespaces.
    pub fn merge(mut self, other: OntologyFragment) -> Result<Self> {
        self.prefixes = self.prefixes.merge(&other.prefixes)?;
        self.triples.extend(other.triples);
        Ok(self)
    }
}

/// The frozen, merged input of a conversion run.
#[derive(Debug, Clone, Default)]
pub struct OntologyGraph {
    triples: BTreeSet<Triple>,
    prefixes: PrefixMap,
}

impl From<OntologyFragment> for OntologyGraph {
    fn from(fragment: OntologyFragment) -> Self {
        Self {
            triples: fragment.triples,
            prefixes: fragment.prefixes,
        }
    }
}

impl OntologyGraph {
    pub fn prefixes(&self) -> &PrefixMap {
        &self.prefixes
    }

    pub fn triples(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// IRIs of every subject typed as `class`, sorted.
    pub fn instances_of(&self, class: &str) -> BTreeSet<&str> {
        self.triples
            .iter()
            .filter(|t| t.predicate == standard::RDF_TYPE && t.object.as_iri() == Some(class))
            .filter_map(|t| t.subject.as_iri())
            .collect()
    }

    /// Literal values of `subject predicate ?o`, sorted by text.
    pub fn literal_values(&self, subject: &str, predicate: &str) -> Vec<&str> {
        let mut values: Vec<&str> = self
            .triples
            .iter()
            .filter(|t| t.predicate == predicate && t.subject.as_iri() == Some(subject))
            .filter_map(|t| t.object.as_literal())
            .collect();
        values.sort_unstable();
        values.dedup();
        values
    }
}
