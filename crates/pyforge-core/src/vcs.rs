//! Version control initialization and hook installation

use crate::report::Reporter;
use crate::runtime::check;
use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

/// Run a git subcommand in `cwd`, returning trimmed stdout
fn git_command(args: &[&str], cwd: &Path) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .context("Failed to execute git")?;

    if !output.status.success() {
        anyhow::bail!(
            "Git command failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Initialize a Git repository in the project directory.
///
/// The repository is mandatory; failure here aborts project creation.
pub fn init_repository(project_path: &Path, reporter: &dyn Reporter) -> Result<()> {
    git_command(&["init"], project_path).with_context(|| {
        format!(
            "Failed to initialize Git repository in {}",
            project_path.display()
        )
    })?;
    reporter.info("Git repository initialized");
    Ok(())
}

/// Install pre-commit hooks when the tool is available.
///
/// A missing tool or a failed install is reported as a warning and never
/// blocks project creation. Returns whether the hooks were installed.
pub fn install_hooks(project_path: &Path, reporter: &dyn Reporter) -> bool {
    let tool = check::check_pre_commit();
    if !tool.available {
        reporter.warn("pre-commit is not installed, skipping hook setup");
        return false;
    }

    let output = Command::new("pre-commit")
        .arg("install")
        .current_dir(project_path)
        .output();

    match output {
        Ok(out) if out.status.success() => {
            let stdout = String::from_utf8_lossy(&out.stdout);
            let stdout = stdout.trim();
            if !stdout.is_empty() {
                println!("{stdout}");
            }
            reporter.info("pre-commit hooks installed");
            true
        }
        Ok(out) => {
            reporter.warn(&format!(
                "pre-commit install failed: {}",
                String::from_utf8_lossy(&out.stderr).trim()
            ));
            false
        }
        Err(e) => {
            reporter.warn(&format!("pre-commit install failed: {e}"));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Level, MemoryReporter};
    use tempfile::TempDir;

    #[test]
    fn test_init_repository_creates_a_git_dir() {
        let temp = TempDir::new().unwrap();
        let reporter = MemoryReporter::new();

        init_repository(temp.path(), &reporter).unwrap();

        assert!(temp.path().join(".git").is_dir());
        assert!(reporter.contains(Level::Info, "Git repository initialized"));
    }

    #[test]
    fn test_init_repository_fails_for_missing_directory() {
        let temp = TempDir::new().unwrap();
        let reporter = MemoryReporter::new();

        let missing = temp.path().join("missing");
        assert!(init_repository(&missing, &reporter).is_err());
    }

    #[test]
    fn test_git_command_surfaces_git_errors() {
        let temp = TempDir::new().unwrap();
        let err = git_command(&["definitely-not-a-subcommand"], temp.path()).unwrap_err();
        assert!(err.to_string().contains("Git command failed"));
    }

    #[test]
    fn test_install_hooks_without_tool_warns_and_continues() {
        if check::check_pre_commit().available {
            // Cannot exercise the missing-tool branch on this machine
            return;
        }

        let temp = TempDir::new().unwrap();
        let reporter = MemoryReporter::new();

        assert!(!install_hooks(temp.path(), &reporter));
        assert!(reporter.contains(Level::Warn, "pre-commit is not installed"));
    }
}
