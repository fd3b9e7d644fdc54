//! Error taxonomy for the conversion pipeline.
//!
//! [`Error`] aborts the whole run before any output is written. [`LineError`]
//! only drops the annotation line that produced it; the extractor records it
//! as a [`Diagnostic`](crate::extraction::extractor::Diagnostic) and moves on.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Fatal, whole-run errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("source unavailable: {locator}: {reason}")]
    SourceUnavailable { locator: String, reason: String },

    #[error("Ontology version {version} not found at {location}")]
    VersionNotFound { version: String, location: String },

    #[error("prefix '{prefix}:' is bound to both <{first}> and <{second}>")]
    PrefixConflict {
        prefix: String,
        first: String,
        second: String,
    },

    #[error("invalid module layout at {}: {reason}", path.display())]
    InvalidLayout { path: PathBuf, reason: String },

    #[error("syntax error in {source_name}: {message}")]
    Syntax {
        source_name: String,
        message: String,
    },

    #[error("conflicting descriptors for <{owner}> <{property}>: `{first}` vs `{second}`")]
    ConflictingDescriptor {
        owner: String,
        property: String,
        first: String,
        second: String,
    },

    #[error("shape IRI <{iri}> is claimed by both {first} and {second}")]
    ShapeIriCollision {
        iri: String,
        first: String,
        second: String,
    },

    #[error("invalid shapes base '{base}': {reason}")]
    InvalidShapesBase { base: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Recoverable errors scoped to a single annotation line.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineError {
    #[error("unresolved prefix '{prefix}:'")]
    UnresolvedPrefix { prefix: String },

    #[error("invalid cardinality [{token}] on {property}: {reason}")]
    InvalidCardinality {
        token: String,
        property: String,
        reason: String,
    },
}
