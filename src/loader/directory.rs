//! Modular ontologies: a directory whose entries are module subdirectories.
//!
//! ```text
//! ontology/
//!   core/        core.ttl, datatypes.ttl
//!   funding/     funding.ttl
//! ```
//!
//! Any regular file directly under the root is a layout error. Inside a
//! module, every `.ttl`/`.turtle`/`.nt` file (recursively) is a document;
//! other files are ignored. Hidden entries are skipped everywhere.

use std::path::{Path, PathBuf};
use std::thread;

use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::error::{Error, Result};
use crate::loader::document::{load_file, DocumentFormat};
use crate::model::graph::OntologyFragment;

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

/// Module subdirectories of `root`, sorted by name.
pub fn module_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let mut modules = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
    {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_dir() {
            return Err(Error::InvalidLayout {
                path: entry.path().to_path_buf(),
                reason: "expected only module subdirectories".to_string(),
            });
        }
        modules.push(entry.into_path());
    }
    if modules.is_empty() {
        return Err(Error::InvalidLayout {
            path: root.to_path_buf(),
            reason: "directory contains no module subdirectories".to_string(),
        });
    }
    Ok(modules)
}

/// Ontology documents inside one module, sorted by path.
pub fn module_documents(module: &Path) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();
    for entry in WalkDir::new(module)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
    {
        let entry = entry.map_err(std::io::Error::from)?;
        if entry.file_type().is_file() && DocumentFormat::from_path(entry.path()).is_some() {
            documents.push(entry.into_path());
        }
    }
    if documents.is_empty() {
        return Err(Error::InvalidLayout {
            path: module.to_path_buf(),
            reason: "module contains no ontology documents".to_string(),
        });
    }
    Ok(documents)
}

fn load_module(module: &Path) -> Result<OntologyFragment> {
    let mut fragment = OntologyFragment::new();
    for document in module_documents(module)? {
        debug!(path = %document.display(), "loading module document");
        fragment = fragment.merge(load_file(&document)?)?;
    }
    Ok(fragment)
}

/// Load every module under `root` and merge them into one fragment.
///
/// Modules are parsed on one worker thread each; the merge runs afterwards
/// on the calling thread.
pub fn load_modules(root: &Path) -> Result<OntologyFragment> {
    let modules = module_dirs(root)?;
    info!(root = %root.display(), modules = modules.len(), "loading ontology modules");

    let results: Vec<Result<OntologyFragment>> = thread::scope(|scope| {
        let workers: Vec<_> = modules
            .iter()
            .map(|module| scope.spawn(move || load_module(module)))
            .collect();
        workers
            .into_iter()
            .map(|worker| match worker.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    results
        .into_iter()
        .try_fold(OntologyFragment::new(), |merged, fragment| {
            merged.merge(fragment?)
        })
}
