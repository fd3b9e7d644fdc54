//! Remote ontology documents.
//!
//! Bytes are fetched once with a blocking client; failures are reported and
//! never retried here.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::info;

use crate::error::{Error, Result};
use crate::loader::document::{parse_document, DocumentFormat};
use crate::model::graph::OntologyFragment;

fn unavailable(url: &str, reason: impl std::fmt::Display) -> Error {
    Error::SourceUnavailable {
        locator: url.to_string(),
        reason: reason.to_string(),
    }
}

/// Fetch `url`. When `version` is set, a 404 means the version does not exist.
pub fn fetch(url: &str, version: Option<&str>, timeout: Duration) -> Result<Vec<u8>> {
    let client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| unavailable(url, e))?;
    let response = client.get(url).send().map_err(|e| unavailable(url, e))?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        if let Some(version) = version {
            return Err(Error::VersionNotFound {
                version: version.to_string(),
                location: url.to_string(),
            });
        }
    }
    if !status.is_success() {
        return Err(unavailable(url, format!("HTTP {status}")));
    }

    let bytes = response.bytes().map_err(|e| unavailable(url, e))?;
    info!(url, bytes = bytes.len(), "fetched remote ontology");
    Ok(bytes.to_vec())
}

/// Format of a remote document from the extension of its URL path;
/// anything unrecognized is Turtle.
pub fn format_of(url: &str) -> DocumentFormat {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit_once('/')
        .map_or(path, |(_, last)| last)
        .rsplit_once('.')
        .and_then(|(_, ext)| DocumentFormat::from_extension(ext))
        .unwrap_or(DocumentFormat::Turtle)
}

/// Fetch and parse a remote document, using its URL as base IRI.
pub fn load_remote(
    url: &str,
    version: Option<&str>,
    timeout: Duration,
) -> Result<OntologyFragment> {
    let bytes = fetch(url, version, timeout)?;
    parse_document(&bytes, format_of(url), url, Some(url))
}
