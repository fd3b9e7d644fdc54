//! Conversion options.

use std::time::Duration;

use crate::model::vocab::dc;

pub const DEFAULT_SHAPES_BASE: &str = "https://w3id.org/skg-if/shapes/";
pub const DEFAULT_SHAPES_PREFIX: &str = "skgsh";
pub const DEFAULT_ONTOLOGY_ROOT: &str = "data-model/ontology";
pub const DEFAULT_VERSION: &str = "current";
pub const ONTOLOGY_FILE_NAME: &str = "skg-o.ttl";

/// How a class-typed target is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassTargetMode {
    /// `sh:class C`: values must be typed instances of `C`.
    #[default]
    Strict,
    /// `sh:or ( [ sh:class C ] [ sh:nodeKind sh:BlankNodeOrIRI ] )`: untyped
    /// references are accepted too.
    Lenient,
}

/// Options controlling a conversion run.
#[derive(Debug, Clone)]
pub struct ConversionOptions {
    pub shapes_base: String,
    pub shapes_prefix: String,
    pub annotation_predicates: Vec<String>,
    pub class_targets: ClassTargetMode,
    pub fetch_timeout: Duration,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            shapes_base: DEFAULT_SHAPES_BASE.to_string(),
            shapes_prefix: DEFAULT_SHAPES_PREFIX.to_string(),
            annotation_predicates: vec![
                dc::DESCRIPTION.to_string(),
                dc::TERMS_DESCRIPTION.to_string(),
            ],
            class_targets: ClassTargetMode::Strict,
            fetch_timeout: Duration::from_secs(30),
        }
    }
}

/// Serialization of the shapes graph. Both are Turtle-compatible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    #[value(alias = "ttl")]
    Turtle,
    #[value(alias = "nt")]
    Ntriples,
}
