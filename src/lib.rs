//! Generate SHACL shapes from the property documentation of OWL classes.
//!
//! Ontology authors document a class's expected properties as annotation
//! lines such as
//!
//! ```text
//! * dcterms:title -[1]-> rdfs:Literal
//! * frapo:hasFundingAgency -[0..N]-> frapo:FundingAgency
//! ```
//!
//! This crate recognizes those lines, resolves their prefixes against the
//! ontology's own bindings and emits one `sh:NodeShape` per documented class
//! with one `sh:PropertyShape` per line.

pub mod config;
pub mod emitter;
pub mod error;
pub mod extraction;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod shapes;

pub use error::{Error, LineError, Result};
