//! IRI minting for generated shapes.

use std::collections::HashMap;
use std::fmt;

use oxrdf::NamedNode;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::error::{Error, Result};

/// Characters that need percent-encoding in a shape IRI's local part.
/// We keep alphanumeric, -, _, ., ~ as unreserved per RFC 3987.
const IRI_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'!')
    .add(b'"')
    .add(b'#')
    .add(b'$')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'(')
    .add(b')')
    .add(b'*')
    .add(b'+')
    .add(b',')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// The local name of an IRI: whatever follows the last `#`, `/` or `:`.
///
/// Trailing separators are ignored, so `http://ex.org/Thing/` yields `Thing`.
pub fn local_name(iri: &str) -> &str {
    let trimmed = iri.trim_end_matches(['/', '#']);
    match trimmed.rfind(['#', '/', ':']) {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}

/// Escape a string for use in an IRI path segment.
fn escape(value: &str) -> String {
    utf8_percent_encode(value, IRI_ENCODE_SET).to_string()
}

/// What a shape IRI was allocated for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ShapeKey {
    Node { class: String },
    Property { class: String, property: String },
}

impl fmt::Display for ShapeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKey::Node { class } => write!(f, "node shape of <{class}>"),
            ShapeKey::Property { class, property } => {
                write!(f, "property shape of <{class}> <{property}>")
            }
        }
    }
}

/// Derives shape IRIs from a base and remembers every IRI handed out, so two
/// distinct shapes can never share one.
#[derive(Debug)]
pub struct ShapeIriAllocator {
    base: String,
    claimed: HashMap<String, ShapeKey>,
}

impl ShapeIriAllocator {
    /// Create an allocator for `base`, which must be an absolute IRI.
    pub fn new(base: &str) -> Result<Self> {
        NamedNode::new(base).map_err(|e| Error::InvalidShapesBase {
            base: base.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            base: base.to_string(),
            claimed: HashMap::new(),
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// IRI of the node shape targeting `class`: `base ++ local(class)`.
    pub fn node_shape_iri(&self, class: &str) -> String {
        format!("{}{}", self.base, escape(local_name(class)))
    }

    /// IRI of a property shape: `base ++ local(class) ++ "-" ++ local(property)`.
    pub fn property_shape_iri(&self, class: &str, property: &str) -> String {
        format!(
            "{}{}-{}",
            self.base,
            escape(local_name(class)),
            escape(local_name(property))
        )
    }

    /// Compute and claim the IRI for `key`.
    ///
    /// Claiming the same key twice returns the same IRI. A different key that
    /// computes an already claimed IRI fails with [`Error::ShapeIriCollision`].
    pub fn allocate(&mut self, key: ShapeKey) -> Result<String> {
        let iri = match &key {
            ShapeKey::Node { class } => self.node_shape_iri(class),
            ShapeKey::Property { class, property } => self.property_shape_iri(class, property),
        };
        match self.claimed.get(&iri) {
            Some(owner) if *owner != key => Err(Error::ShapeIriCollision {
                iri,
                first: owner.to_string(),
                second: key.to_string(),
            }),
            Some(_) => Ok(iri),
            None => {
                self.claimed.insert(iri.clone(), key);
                Ok(iri)
            }
        }
    }
}
