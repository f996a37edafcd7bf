//! The generation pipeline
//!
//! Every interactive decision is resolved into a [`RunPlan`] before this
//! module runs; [`execute`] then performs the filesystem and subprocess work
//! without ever prompting. Rollback is the caller's call, driven by the
//! returned [`RunOutcome`].

use crate::bootstrap::{self, BootstrapError};
use crate::editor;
use crate::project::ProjectSpec;
use crate::report::Reporter;
use crate::scaffold;
use crate::templates;
use crate::vcs;
use anyhow::Result;

/// Fully-resolved decisions for one generator run
#[derive(Debug, Clone)]
pub struct RunPlan {
    /// What to create and where
    pub spec: ProjectSpec,
    /// Consent to clear a non-empty project directory
    pub overwrite: bool,
    /// Run the Conda/pip environment bootstrap afterwards
    pub install_env: bool,
    /// Launch VS Code on the finished project
    pub open_editor: bool,
    /// Editor executable to fall back to when `code` is not on the PATH
    pub editor_override: Option<String>,
}

/// What a run actually did
#[derive(Debug, Default)]
pub struct RunOutcome {
    pub files_written: usize,
    pub docs_generated: bool,
    pub hooks_installed: bool,
    /// Environment bootstrap failure, if any
    pub env_error: Option<BootstrapError>,
    /// Editor launch failure, if any
    pub editor_error: Option<String>,
}

impl RunOutcome {
    /// Whether post-processing failed in a way worth offering rollback for.
    ///
    /// Only a failed bootstrap command qualifies: it may have left a
    /// half-built environment behind. A missing Conda means nothing was
    /// attempted, and a failed editor launch leaves a perfectly usable
    /// project behind.
    pub fn needs_rollback_offer(&self) -> bool {
        matches!(self.env_error, Some(BootstrapError::CommandFailed(_)))
    }
}

/// Execute the plan end-to-end.
///
/// Mandatory steps (clearing, skeleton, file writes, Git init) propagate
/// errors and abort the run. Documentation, hook installation, environment
/// bootstrap, and editor launch degrade to warnings recorded on the outcome.
pub async fn execute(plan: &RunPlan, reporter: &dyn Reporter) -> Result<RunOutcome> {
    let spec = &plan.spec;
    let project_path = spec.project_path();
    let mut outcome = RunOutcome::default();

    // Never clear a populated directory without recorded consent, even if
    // the caller skipped its own confirmation.
    if scaffold::dir_has_entries(project_path).await? {
        if !plan.overwrite {
            anyhow::bail!(
                "Directory {} already exists and is not empty",
                project_path.display()
            );
        }
        reporter.info("Clearing the existing directory");
        scaffold::clear_directory(project_path).await?;
    }

    scaffold::create_skeleton(project_path, reporter).await?;

    // The tooling set comes second so its .gitignore and .env.example
    // replace the plainer base versions.
    let mut files = templates::render_project_files(spec);
    files.extend(templates::render_tooling_files(spec));
    let written = scaffold::write_files(project_path, &files, reporter).await;
    outcome.files_written = written.written.len();
    if !written.is_complete() {
        anyhow::bail!(
            "Project setup could not complete: {} file(s) failed to write",
            written.failed.len()
        );
    }

    vcs::init_repository(project_path, reporter)?;
    outcome.hooks_installed = vcs::install_hooks(project_path, reporter);

    match scaffold::write_documentation(project_path, &templates::render_documentation(spec)).await
    {
        Ok(path) => {
            outcome.docs_generated = true;
            reporter.info(&format!("Documentation generated: {}", path.display()));
        }
        Err(e) => reporter.warn(&format!("Could not generate the documentation: {e:#}")),
    }

    if plan.install_env {
        match bootstrap::install_environment(project_path, reporter).await {
            Ok(hooks) => outcome.hooks_installed = outcome.hooks_installed || hooks,
            Err(e) => {
                reporter.error(&format!("Environment setup failed: {e:#}"));
                outcome.env_error = Some(e);
            }
        }
    }

    // A failed bootstrap may be rolled back by the caller; launching the
    // editor on a project that might disappear makes no sense.
    if plan.open_editor && outcome.env_error.is_none() {
        if let Err(e) = editor::open_project(spec, plan.editor_override.as_deref(), reporter).await
        {
            reporter.error(&format!("Error opening VS Code: {e:#}"));
            outcome.editor_error = Some(format!("{e:#}"));
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{ProjectName, PythonVersion};
    use crate::report::MemoryReporter;
    use crate::runtime::check;
    use crate::scaffold::SKELETON_DIRS;
    use chrono::{Local, TimeZone};
    use std::path::Path;
    use tempfile::TempDir;

    fn plan_for(dir: &Path, overwrite: bool) -> RunPlan {
        let name: ProjectName = "demo".parse().unwrap();
        let python: PythonVersion = "3.10".parse().unwrap();
        let created = Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        RunPlan {
            spec: ProjectSpec::with_created_at(name, python, dir.to_path_buf(), created),
            overwrite,
            install_env: false,
            open_editor: false,
            editor_override: None,
        }
    }

    #[tokio::test]
    async fn test_execute_creates_the_full_documented_tree() {
        let temp = TempDir::new().unwrap();
        let plan = plan_for(temp.path(), false);
        let reporter = MemoryReporter::new();

        let outcome = execute(&plan, &reporter).await.unwrap();

        let root = plan.spec.project_path();
        for dir in SKELETON_DIRS {
            assert!(root.join(dir).is_dir(), "missing skeleton dir: {dir}");
        }
        assert!(root.join(".git").is_dir());
        assert!(root.join("documentation.txt").is_file());

        let readme = std::fs::read_to_string(root.join("README.md")).unwrap();
        assert!(readme.starts_with("# demo"));
        let pyproject = std::fs::read_to_string(root.join("pyproject.toml")).unwrap();
        assert!(pyproject.contains("py310"));

        // 11 base files plus 5 tooling files
        assert_eq!(outcome.files_written, 16);
        assert!(outcome.docs_generated);
        assert!(outcome.env_error.is_none());
        assert!(outcome.editor_error.is_none());
        assert!(!outcome.needs_rollback_offer());
    }

    #[tokio::test]
    async fn test_execute_refuses_a_populated_directory_without_consent() {
        let temp = TempDir::new().unwrap();
        let plan = plan_for(temp.path(), false);
        let root = plan.spec.project_path().to_path_buf();
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("precious.txt"), "keep me").unwrap();

        let err = execute(&plan, &MemoryReporter::new()).await.unwrap_err();
        assert!(err.to_string().contains("already exists"));

        // Nothing may have been touched
        assert_eq!(
            std::fs::read_to_string(root.join("precious.txt")).unwrap(),
            "keep me"
        );
        assert!(!root.join("README.md").exists());
    }

    #[tokio::test]
    async fn test_execute_with_consent_clears_prior_contents_first() {
        let temp = TempDir::new().unwrap();
        let plan = plan_for(temp.path(), true);
        let root = plan.spec.project_path().to_path_buf();
        std::fs::create_dir_all(root.join("stale_dir")).unwrap();
        std::fs::write(root.join("stale.txt"), "old").unwrap();
        std::fs::write(root.join("stale_dir/nested.txt"), "old").unwrap();

        execute(&plan, &MemoryReporter::new()).await.unwrap();

        assert!(!root.join("stale.txt").exists());
        assert!(!root.join("stale_dir").exists());
        assert!(root.join("README.md").is_file());
    }

    #[tokio::test]
    async fn test_repeated_runs_produce_byte_identical_files() {
        let temp = TempDir::new().unwrap();
        let reporter = MemoryReporter::new();

        let first = plan_for(temp.path(), false);
        execute(&first, &reporter).await.unwrap();
        let root = first.spec.project_path().to_path_buf();

        let snapshot: Vec<(String, String)> = [
            "README.md",
            "environment.yml",
            "pyproject.toml",
            "src/main.py",
            "documentation.txt",
        ]
        .iter()
        .map(|rel| {
            (
                rel.to_string(),
                std::fs::read_to_string(root.join(rel)).unwrap(),
            )
        })
        .collect();

        let second = plan_for(temp.path(), true);
        execute(&second, &reporter).await.unwrap();

        for (rel, before) in snapshot {
            let after = std::fs::read_to_string(root.join(&rel)).unwrap();
            assert_eq!(before, after, "{rel} changed between runs");
        }
    }

    #[tokio::test]
    async fn test_missing_conda_is_recorded_without_a_rollback_offer() {
        if check::check_conda().available {
            // A real Conda would try to build the environment for minutes
            return;
        }

        let temp = TempDir::new().unwrap();
        let mut plan = plan_for(temp.path(), false);
        plan.install_env = true;
        let reporter = MemoryReporter::new();

        let outcome = execute(&plan, &reporter).await.unwrap();

        assert!(outcome.env_error.is_some());
        assert!(!outcome.needs_rollback_offer());
        // The project itself is intact
        assert!(plan.spec.project_path().join("README.md").is_file());
    }

    #[test]
    fn test_rollback_offer_requires_a_failed_command() {
        let missing_tool = RunOutcome {
            env_error: Some(BootstrapError::CondaMissing),
            ..Default::default()
        };
        assert!(!missing_tool.needs_rollback_offer());

        let failed_command = RunOutcome {
            env_error: Some(BootstrapError::CommandFailed(anyhow::anyhow!(
                "conda exited with code 1"
            ))),
            ..Default::default()
        };
        assert!(failed_command.needs_rollback_offer());
    }
}
