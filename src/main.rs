use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use owl2shacl::config::{
    ClassTargetMode, ConversionOptions, OutputFormat, DEFAULT_ONTOLOGY_ROOT, DEFAULT_SHAPES_BASE,
    DEFAULT_SHAPES_PREFIX, DEFAULT_VERSION, ONTOLOGY_FILE_NAME,
};
use owl2shacl::loader::InputLocator;
use owl2shacl::pipeline::{self, Conversion};

/// Convert the property documentation of an OWL ontology into SHACL shapes.
#[derive(Parser)]
#[command(name = "owl2shacl", about, disable_version_flag = true)]
struct Cli {
    /// Output file path [default: stdout].
    output: Option<PathBuf>,

    /// Ontology document, directory of modules, or http(s) URL.
    #[arg(short, long, value_name = "LOCATOR")]
    input: Option<String>,

    /// Tagged release to convert, e.g. "1.0.0" [default: current].
    #[arg(long = "version", value_name = "TAG")]
    release: Option<String>,

    /// Root holding one directory per release (local path or URL).
    #[arg(long, value_name = "PATH|URL", default_value = DEFAULT_ONTOLOGY_ROOT)]
    ontology_root: String,

    /// Base IRI for generated shapes.
    #[arg(
        long,
        value_name = "IRI",
        env = "OWL2SHACL_SHAPES_BASE",
        default_value = DEFAULT_SHAPES_BASE
    )]
    shapes_base: String,

    /// Prefix declared for the shapes base.
    #[arg(long, value_name = "PREFIX", default_value = DEFAULT_SHAPES_PREFIX)]
    shapes_prefix: String,

    /// Annotation predicate holding property documentation (repeatable)
    /// [default: dc:description, dcterms:description].
    #[arg(long = "annotation-predicate", value_name = "IRI")]
    annotation_predicates: Vec<String>,

    /// Also accept untyped IRIs and blank nodes for class-typed properties.
    #[arg(long)]
    allow_untyped_references: bool,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Turtle)]
    format: OutputFormat,

    /// Write a JSON report of counts and dropped lines to this file.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Exit with status 2 if any annotation line was dropped.
    #[arg(long)]
    strict: bool,

    /// Timeout for remote fetches, in seconds.
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    timeout: u64,

    /// Verbose output.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Quiet output.
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn locator(&self) -> owl2shacl::Result<InputLocator> {
        match (&self.input, &self.release) {
            (Some(root), Some(release)) => {
                InputLocator::versioned(root, release, ONTOLOGY_FILE_NAME)
            }
            (Some(raw), None) => Ok(InputLocator::parse(raw)),
            (None, release) => InputLocator::versioned(
                &self.ontology_root,
                release.as_deref().unwrap_or(DEFAULT_VERSION),
                ONTOLOGY_FILE_NAME,
            ),
        }
    }

    fn options(&self) -> ConversionOptions {
        let defaults = ConversionOptions::default();
        ConversionOptions {
            shapes_base: self.shapes_base.clone(),
            shapes_prefix: self.shapes_prefix.clone(),
            annotation_predicates: if self.annotation_predicates.is_empty() {
                defaults.annotation_predicates
            } else {
                self.annotation_predicates.clone()
            },
            class_targets: if self.allow_untyped_references {
                ClassTargetMode::Lenient
            } else {
                ClassTargetMode::Strict
            },
            fetch_timeout: Duration::from_secs(self.timeout),
        }
    }
}

fn init_tracing(cli: &Cli) {
    let level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn report_diagnostics(conversion: &Conversion) {
    if conversion.diagnostics.is_empty() {
        return;
    }
    for diagnostic in &conversion.diagnostics {
        warn!(
            class = %diagnostic.owner_class,
            line = %diagnostic.line,
            "{}",
            diagnostic.error
        );
    }
    warn!(
        dropped = conversion.diagnostics.len(),
        "some annotation lines were dropped"
    );
}

/// Run the conversion; returns whether any line was dropped.
fn run(cli: &Cli) -> anyhow::Result<bool> {
    let locator = cli.locator()?;
    let options = cli.options();

    let conversion = pipeline::convert(&locator, &options)
        .with_context(|| format!("converting {locator}"))?;
    let rendered = conversion.render(cli.format, &options)?;

    let report = match &cli.report {
        Some(path) => Some((
            path.as_path(),
            serde_json::to_vec_pretty(&conversion.report(&locator, rendered.triples))?,
        )),
        None => None,
    };

    // Files are replaced together, and stdout is only written once the
    // report is on disk.
    let mut files: Vec<(&Path, &[u8])> = Vec::new();
    if let Some(path) = &cli.output {
        files.push((path.as_path(), rendered.bytes.as_slice()));
    }
    if let Some((path, bytes)) = &report {
        files.push((*path, bytes.as_slice()));
    }
    let destinations = files
        .iter()
        .map(|(path, _)| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");
    pipeline::write_all_atomic(&files).with_context(|| format!("writing {destinations}"))?;

    if cli.output.is_none() {
        let mut stdout = io::stdout().lock();
        stdout.write_all(&rendered.bytes)?;
        stdout.flush()?;
    }

    report_diagnostics(&conversion);
    info!(
        node_shapes = conversion.shapes.len(),
        property_shapes = conversion.shapes.property_shape_count(),
        triples = rendered.triples,
        "Generated shapes from {locator}"
    );

    Ok(!conversion.diagnostics.is_empty())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);
    match run(&cli) {
        Ok(dropped_lines) if dropped_lines && cli.strict => process::exit(2),
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}
