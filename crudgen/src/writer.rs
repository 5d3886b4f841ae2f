//! Filesystem writer for generated files

use crate::error::{Error, Result};
use crate::field::ResourceSpec;
use crate::layout::Layout;
use crate::render::RenderedArtifacts;
use crate::templates::GENERIC_REPOSITORY;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Write the generic repository unless it already exists
///
/// Returns `true` when the file was created. An existing repository is never
/// touched, whatever its content.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be created.
pub fn ensure_shared_repository(layout: &Layout) -> Result<bool> {
    let path = layout.repository_path();
    if path.exists() {
        tracing::debug!(path = %path.display(), "generic repository already present");
        return Ok(false);
    }

    write_file(&path, GENERIC_REPOSITORY)?;
    tracing::info!(path = %path.display(), "created generic repository");
    Ok(true)
}

/// Write the model, controller and route module for a resource
///
/// Existing files are overwritten. Returns the written paths in generation
/// order.
///
/// # Errors
///
/// Returns an error on the first file that cannot be written.
pub fn write_artifacts(
    layout: &Layout,
    spec: &ResourceSpec,
    artifacts: &RenderedArtifacts,
) -> Result<Vec<PathBuf>> {
    let [model, controller, routes] = layout.artifact_paths(&spec.resource_name);
    let files = [
        (model, &artifacts.model),
        (controller, &artifacts.controller),
        (routes, &artifacts.routes),
    ];

    let mut written = Vec::with_capacity(files.len());
    for (path, content) in files {
        write_file(&path, content)?;
        tracing::info!(path = %path.display(), "wrote artifact");
        written.push(path);
    }

    Ok(written)
}

/// Delete the three generated files for a resource
///
/// Missing files are skipped. Returns the paths actually removed.
///
/// # Errors
///
/// Returns an error if an existing file cannot be deleted.
pub fn remove_artifacts(layout: &Layout, resource: &str) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();

    for path in layout.artifact_paths(resource) {
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "removed artifact");
                removed.push(path);
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "artifact already absent");
            }
            Err(err) => return Err(Error::io(path, err)),
        }
    }

    Ok(removed)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| Error::io(parent, err))?;
    }
    fs::write(path, content).map_err(|err| Error::io(path, err))
}
