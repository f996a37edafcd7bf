//! Environment bootstrap: Conda environment creation and package installation

use crate::report::Reporter;
use crate::runtime::{check, stream};
use crate::vcs;
use std::path::Path;
use thiserror::Error;

/// Why the environment bootstrap failed.
///
/// The distinction matters to the caller: a missing tool means nothing was
/// attempted, while a failed command may have left a half-built environment
/// behind.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Conda is not available. Make sure it is installed and on the PATH")]
    CondaMissing,
    #[error(transparent)]
    CommandFailed(#[from] anyhow::Error),
}

/// Create the Conda environment and install the pinned packages, streaming
/// subprocess output to the console.
///
/// A missing Conda reports as [`BootstrapError::CondaMissing`] before any
/// command runs; a subprocess that starts and then fails reports as
/// [`BootstrapError::CommandFailed`]. Hook installation at the end is
/// non-fatal; the returned flag says whether it happened.
pub async fn install_environment(
    project_path: &Path,
    reporter: &dyn Reporter,
) -> Result<bool, BootstrapError> {
    let conda = check::check_conda();
    if !conda.available {
        return Err(BootstrapError::CondaMissing);
    }
    if let Some(version) = &conda.version {
        reporter.info(&format!("Conda detected: {version}"));
    }

    reporter.info("Creating the Conda environment");
    stream::run_streaming(
        "conda",
        &["env", "create", "-f", "environment.yml"],
        project_path,
        reporter,
    )
    .await?;

    reporter.info("Installing dependencies with pip");
    stream::run_streaming(
        "pip",
        &["install", "-r", "requirements.txt"],
        project_path,
        reporter,
    )
    .await?;

    let hooks_installed = vcs::install_hooks(project_path, reporter);

    Ok(hooks_installed)
}
