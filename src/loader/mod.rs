//! Ontology graph loading.
//!
//! An [`InputLocator`] names a single document, a directory of modules, or a
//! remote document. [`load`] turns any of them into one immutable
//! [`OntologyGraph`].

pub mod directory;
pub mod document;
pub mod remote;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::model::graph::OntologyGraph;

/// Where the ontology comes from. Chosen by the shape of the locator, never
/// by sniffing content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLocator {
    File(PathBuf),
    Directory(PathBuf),
    /// `version` is set when the URL was derived from a tagged release.
    Remote { url: String, version: Option<String> },
}

fn is_url(raw: &str) -> bool {
    raw.starts_with("http://") || raw.starts_with("https://")
}

impl InputLocator {
    /// Classify a raw locator: `http(s)://` is remote, an existing directory
    /// is a module directory, anything else is a single document.
    pub fn parse(raw: &str) -> Self {
        if is_url(raw) {
            return InputLocator::Remote {
                url: raw.to_string(),
                version: None,
            };
        }
        let path = PathBuf::from(raw);
        if path.is_dir() {
            InputLocator::Directory(path)
        } else {
            InputLocator::File(path)
        }
    }

    /// Locator of a tagged release: `<root>/<version>/<file_name>`.
    ///
    /// A local root must contain the versioned file, otherwise this fails
    /// with [`Error::VersionNotFound`]. A remote root is checked when the
    /// document is fetched.
    pub fn versioned(root: &str, version: &str, file_name: &str) -> Result<Self> {
        if is_url(root) {
            let url = format!("{}/{version}/{file_name}", root.trim_end_matches('/'));
            return Ok(InputLocator::Remote {
                url,
                version: Some(version.to_string()),
            });
        }
        let path = Path::new(root).join(version).join(file_name);
        if !path.is_file() {
            return Err(Error::VersionNotFound {
                version: version.to_string(),
                location: path.display().to_string(),
            });
        }
        Ok(InputLocator::File(path))
    }
}

impl fmt::Display for InputLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputLocator::File(path) | InputLocator::Directory(path) => {
                write!(f, "{}", path.display())
            }
            InputLocator::Remote { url, .. } => f.write_str(url),
        }
    }
}

/// Load and merge everything `locator` names.
pub fn load(locator: &InputLocator, fetch_timeout: Duration) -> Result<OntologyGraph> {
    let fragment = match locator {
        InputLocator::File(path) => document::load_file(path)?,
        InputLocator::Directory(path) => directory::load_modules(path)?,
        InputLocator::Remote { url, version } => {
            remote::load_remote(url, version.as_deref(), fetch_timeout)?
        }
    };
    Ok(OntologyGraph::from(fragment))
}
