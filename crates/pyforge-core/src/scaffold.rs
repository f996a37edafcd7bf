//! Project tree creation: directory skeleton and template file writes

use crate::report::Reporter;
use crate::templates::{RenderedFile, DOCUMENTATION_FILE};
use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Subdirectories created under the project root
pub const SKELETON_DIRS: [&str; 4] = ["src", "config", "tests", "docs"];

/// Result of a best-effort write pass
#[derive(Debug, Default)]
pub struct ScaffoldOutcome {
    pub written: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

impl ScaffoldOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Create the project root and its skeleton directories.
///
/// Pre-existing directories are tolerated; any other filesystem error is
/// propagated since nothing later can succeed without the skeleton.
pub async fn create_skeleton(project_path: &Path, reporter: &dyn Reporter) -> Result<()> {
    fs::create_dir_all(project_path).await.with_context(|| {
        format!(
            "Failed to create project directory: {}",
            project_path.display()
        )
    })?;
    reporter.info(&format!("Created directory: {}", project_path.display()));

    for dir in SKELETON_DIRS {
        let path = project_path.join(dir);
        fs::create_dir_all(&path)
            .await
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        reporter.info(&format!("Created directory: {}", path.display()));
    }
    Ok(())
}

/// Whether `path` exists and contains at least one entry
pub async fn dir_has_entries(path: &Path) -> Result<bool> {
    let mut entries = match fs::read_dir(path).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to inspect: {}", path.display()))
        }
    };
    let first = entries
        .next_entry()
        .await
        .with_context(|| format!("Failed to inspect: {}", path.display()))?;
    Ok(first.is_some())
}

/// Remove every child of `path`: files individually, subdirectories
/// recursively. A missing directory is fine.
pub async fn clear_directory(path: &Path) -> Result<()> {
    let mut entries = match fs::read_dir(path).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e).with_context(|| format!("Failed to read: {}", path.display())),
    };

    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("Failed to read: {}", path.display()))?
    {
        let target = entry.path();
        let file_type = entry
            .file_type()
            .await
            .with_context(|| format!("Failed to inspect: {}", target.display()))?;
        if file_type.is_dir() {
            fs::remove_dir_all(&target)
                .await
                .with_context(|| format!("Failed to remove directory: {}", target.display()))?;
        } else {
            fs::remove_file(&target)
                .await
                .with_context(|| format!("Failed to remove file: {}", target.display()))?;
        }
    }
    Ok(())
}

/// Write rendered files under the project root, best-effort.
///
/// A failed write is reported and recorded but never halts the remaining
/// writes; the caller decides what an incomplete outcome means.
pub async fn write_files(
    project_path: &Path,
    files: &[RenderedFile],
    reporter: &dyn Reporter,
) -> ScaffoldOutcome {
    let mut outcome = ScaffoldOutcome::default();
    for file in files {
        let target = project_path.join(file.relative_path());
        match write_one(&target, file.content()).await {
            Ok(()) => {
                reporter.info(&format!("Created file: {}", target.display()));
                outcome.written.push(target);
            }
            Err(e) => {
                reporter.error(&format!(
                    "Failed to create file {}: {e:#}",
                    target.display()
                ));
                outcome.failed.push(target);
            }
        }
    }
    outcome
}

async fn write_one(target: &Path, content: &str) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(target, content)
        .await
        .with_context(|| format!("Failed to write file: {}", target.display()))?;
    Ok(())
}

/// Write the documentation summary to its fixed filename in the project root
pub async fn write_documentation(project_path: &Path, content: &str) -> Result<PathBuf> {
    let target = project_path.join(DOCUMENTATION_FILE);
    fs::write(&target, content)
        .await
        .with_context(|| format!("Failed to write file: {}", target.display()))?;
    Ok(target)
}

/// Delete the whole project directory. Used by rollback only.
pub async fn remove_project(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => {
            Err(e).with_context(|| format!("Failed to remove project directory: {}", path.display()))
        }
    }
}
