//! The conversion pipeline: load → extract → build → serialize.
//!
//! Every fatal error surfaces before any byte is written; [`write_all_atomic`]
//! then replaces the destinations once every one of them is staged.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use tempfile::{Builder, NamedTempFile};
use tracing::info;

use crate::config::{ConversionOptions, OutputFormat};
use crate::emitter::ntriples::NTriplesEmitter;
use crate::emitter::shapes::ShapeGraphWriter;
use crate::emitter::turtle::TurtleEmitter;
use crate::emitter::TriplesEmitter;
use crate::error::Result;
use crate::extraction::extractor::{AnnotationExtractor, Diagnostic};
use crate::loader::{self, InputLocator};
use crate::model::graph::OntologyGraph;
use crate::model::iri::ShapeIriAllocator;
use crate::model::shapes::ShapeGraph;
use crate::shapes::builder::ShapeBuilder;

/// Result of a successful run, possibly with dropped lines.
#[derive(Debug)]
pub struct Conversion {
    pub graph: OntologyGraph,
    pub shapes: ShapeGraph,
    pub diagnostics: Vec<Diagnostic>,
}

/// Serialized shapes and how many triples they hold.
#[derive(Debug)]
pub struct Rendered {
    pub bytes: Vec<u8>,
    pub triples: u64,
}

/// JSON summary written by `--report`.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub source: String,
    pub node_shapes: usize,
    pub property_shapes: usize,
    pub triples: u64,
    pub diagnostics: &'a [Diagnostic],
}

/// Load `locator` and convert it.
pub fn convert(locator: &InputLocator, options: &ConversionOptions) -> Result<Conversion> {
    info!(source = %locator, "loading ontology");
    let graph = loader::load(locator, options.fetch_timeout)?;
    convert_graph(graph, options)
}

/// Convert an already loaded graph.
pub fn convert_graph(graph: OntologyGraph, options: &ConversionOptions) -> Result<Conversion> {
    let allocator = ShapeIriAllocator::new(&options.shapes_base)?;
    let extraction = AnnotationExtractor::new(&graph, &options.annotation_predicates).extract();
    let shapes = ShapeBuilder::build(allocator, &extraction.descriptors)?;

    info!(
        triples = graph.len(),
        descriptors = extraction.descriptors.len(),
        node_shapes = shapes.len(),
        property_shapes = shapes.property_shape_count(),
        diagnostics = extraction.diagnostics.len(),
        "built shapes graph"
    );

    Ok(Conversion {
        graph,
        shapes,
        diagnostics: extraction.diagnostics,
    })
}

fn emit<E: TriplesEmitter>(
    emitter: &mut E,
    conversion: &Conversion,
    options: &ConversionOptions,
) -> io::Result<u64> {
    ShapeGraphWriter::new(emitter, conversion.graph.prefixes(), options)
        .write(&conversion.shapes)?;
    emitter.flush()?;
    Ok(emitter.triple_count())
}

impl Conversion {
    /// Serialize the shapes graph in `format`.
    pub fn render(&self, format: OutputFormat, options: &ConversionOptions) -> Result<Rendered> {
        let mut bytes = Vec::new();
        let triples = match format {
            OutputFormat::Turtle => emit(&mut TurtleEmitter::new(&mut bytes), self, options)?,
            OutputFormat::Ntriples => emit(&mut NTriplesEmitter::new(&mut bytes), self, options)?,
        };
        Ok(Rendered { bytes, triples })
    }

    pub fn report(&self, source: &InputLocator, triples: u64) -> Report<'_> {
        Report {
            source: source.to_string(),
            node_shapes: self.shapes.len(),
            property_shapes: self.shapes.property_shape_count(),
            triples,
            diagnostics: &self.diagnostics,
        }
    }
}

/// Write `bytes` to `path` all-or-nothing: a temporary file in the same
/// directory is renamed over `path` only once it is complete.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    write_all_atomic(&[(path, bytes)])
}

/// Write several files together. Every temporary file is written before any
/// destination is replaced, so a failed write leaves all of them untouched.
pub fn write_all_atomic(files: &[(&Path, &[u8])]) -> Result<()> {
    let staged = files
        .iter()
        .map(|(path, bytes)| stage(path, bytes).map(|file| (file, *path)))
        .collect::<Result<Vec<_>>>()?;
    for (file, path) in staged {
        file.persist(path).map_err(|e| e.error)?;
    }
    Ok(())
}

/// Temporary file next to `path`, holding `bytes`, with the permissions a
/// plain create would give: those of an existing destination, otherwise
/// 0o666 less the umask.
fn stage(path: &Path, bytes: &[u8]) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut builder = Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut file = builder.tempfile_in(dir)?;
    file.write_all(bytes)?;
    file.flush()?;
    if let Ok(existing) = fs::metadata(path) {
        file.as_file().set_permissions(existing.permissions())?;
    }
    Ok(file)
}
