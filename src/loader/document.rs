//! Parse one ontology document into an [`OntologyFragment`].

use std::path::Path;

use oxttl::{NTriplesParser, TurtleParser};
use tracing::info;

use crate::error::{Error, Result};
use crate::model::graph::{OntologyFragment, Term, Triple};

/// Serialization of an input document, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Turtle,
    NTriples,
}

impl DocumentFormat {
    /// Format for a known extension (`ttl`, `turtle`, `nt`), if any.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "ttl" | "turtle" => Some(DocumentFormat::Turtle),
            "nt" => Some(DocumentFormat::NTriples),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

fn syntax_error(source_name: &str, e: impl std::fmt::Display) -> Error {
    Error::Syntax {
        source_name: source_name.to_string(),
        message: e.to_string(),
    }
}

fn convert_term(term: oxrdf::Term) -> Option<Term> {
    match term {
        oxrdf::Term::NamedNode(node) => Some(Term::Iri(node.into_string())),
        oxrdf::Term::BlankNode(node) => Some(Term::Blank(node.into_string())),
        oxrdf::Term::Literal(literal) => Some(Term::Literal {
            value: literal.value().to_string(),
            datatype: literal.datatype().as_str().to_string(),
            language: literal.language().map(str::to_string),
        }),
        // Quoted triples never carry class documentation.
        #[allow(unreachable_patterns)]
        _ => None,
    }
}

fn convert_triple(triple: oxrdf::Triple) -> Option<Triple> {
    let subject = convert_term(oxrdf::Term::from(triple.subject))?;
    let object = convert_term(triple.object)?;
    Some(Triple::new(subject, triple.predicate.into_string(), object))
}

/// Parse `bytes` as `format`. `source_name` labels errors; `base_iri`
/// resolves relative IRIs (remote documents pass their URL).
pub fn parse_document(
    bytes: &[u8],
    format: DocumentFormat,
    source_name: &str,
    base_iri: Option<&str>,
) -> Result<OntologyFragment> {
    let mut fragment = OntologyFragment::new();

    match format {
        DocumentFormat::Turtle => {
            let mut parser = TurtleParser::new();
            if let Some(base) = base_iri {
                parser = parser
                    .with_base_iri(base)
                    .map_err(|e| syntax_error(source_name, e))?;
            }
            let mut reader = parser.for_reader(bytes);
            for triple in reader.by_ref() {
                let triple = triple.map_err(|e| syntax_error(source_name, e))?;
                fragment.triples.extend(convert_triple(triple));
            }
            for (prefix, namespace) in reader.prefixes() {
                fragment.prefixes.bind(prefix, namespace)?;
            }
        }
        DocumentFormat::NTriples => {
            for triple in NTriplesParser::new().for_reader(bytes) {
                let triple = triple.map_err(|e| syntax_error(source_name, e))?;
                fragment.triples.extend(convert_triple(triple));
            }
        }
    }

    info!(
        source = source_name,
        triples = fragment.triples.len(),
        prefixes = fragment.prefixes.len(),
        "parsed ontology document"
    );
    Ok(fragment)
}

/// Read and parse a local document. Unknown extensions are read as Turtle.
pub fn load_file(path: &Path) -> Result<OntologyFragment> {
    let bytes = std::fs::read(path).map_err(|e| Error::SourceUnavailable {
        locator: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let format = DocumentFormat::from_path(path).unwrap_or(DocumentFormat::Turtle);
    parse_document(&bytes, format, &path.display().to_string(), None)
}
