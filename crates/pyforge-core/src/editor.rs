//! VS Code integration: workspace settings and editor launch

use crate::project::ProjectSpec;
use crate::report::Reporter;
use crate::runtime::check;
use crate::templates::DOCUMENTATION_FILE;
use anyhow::{Context, Result};
use serde_json::json;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command as TokioCommand;

/// Editor command searched on the PATH
pub const EDITOR_COMMAND: &str = "code";

/// Environment variable overriding the editor executable
pub const EDITOR_ENV: &str = "PYFORGE_EDITOR";

/// Workspace settings giving the integrated terminal a profile that
/// activates the project's Conda environment on the given platform.
pub fn workspace_settings(spec: &ProjectSpec, os: &str) -> serde_json::Value {
    let activate = format!("conda activate {}", spec.name().as_str());
    match os {
        "windows" => json!({
            "terminal.integrated.defaultProfile.windows": "PowerShell",
            "terminal.integrated.profiles.windows": {
                "PowerShell": {
                    "source": "PowerShell",
                    "args": ["-NoExit", "-Command", activate]
                }
            }
        }),
        "macos" => json!({
            "terminal.integrated.defaultProfile.osx": "conda",
            "terminal.integrated.profiles.osx": {
                "conda": {
                    "path": "zsh",
                    "args": ["-l", "-c", format!("{activate}; exec zsh")]
                }
            }
        }),
        _ => json!({
            "terminal.integrated.defaultProfile.linux": "conda",
            "terminal.integrated.profiles.linux": {
                "conda": {
                    "path": "bash",
                    "args": ["-l", "-c", format!("{activate}; exec bash")]
                }
            }
        }),
    }
}

/// Write `.vscode/settings.json` for the current platform
pub async fn write_workspace_settings(spec: &ProjectSpec) -> Result<PathBuf> {
    let settings_dir = spec.project_path().join(".vscode");
    tokio::fs::create_dir_all(&settings_dir)
        .await
        .with_context(|| format!("Failed to create directory: {}", settings_dir.display()))?;

    let settings = workspace_settings(spec, std::env::consts::OS);
    let rendered = serde_json::to_string_pretty(&settings)
        .context("Failed to serialize VS Code settings")?;

    let target = settings_dir.join("settings.json");
    tokio::fs::write(&target, rendered)
        .await
        .with_context(|| format!("Failed to write file: {}", target.display()))?;
    Ok(target)
}

/// Resolve the editor executable: the PATH-resolved command wins, then an
/// explicit override, then the `PYFORGE_EDITOR` environment variable.
pub fn resolve_editor(override_cmd: Option<&str>) -> Result<String> {
    resolve_editor_with(
        EDITOR_COMMAND,
        override_cmd,
        std::env::var(EDITOR_ENV).ok(),
    )
}

fn resolve_editor_with(
    command: &str,
    override_cmd: Option<&str>,
    env_override: Option<String>,
) -> Result<String> {
    if check::command_on_path(command) {
        return Ok(command.to_string());
    }
    override_cmd
        .map(str::to_string)
        .or(env_override)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "VS Code was not found on the PATH and no editor override is configured \
                 (set {EDITOR_ENV})"
            )
        })
}

/// Write the workspace settings, open the project in a new editor window,
/// then after a short delay open the documentation file in the same window.
///
/// The settings land before editor resolution, so a machine without VS Code
/// still ends up with a configured workspace.
pub async fn open_project(
    spec: &ProjectSpec,
    override_cmd: Option<&str>,
    reporter: &dyn Reporter,
) -> Result<()> {
    write_workspace_settings(spec).await?;
    reporter.info("VS Code workspace settings written");

    let editor = resolve_editor(override_cmd)?;

    let project_arg = spec.project_path().display().to_string();
    run_editor(&editor, &["--new-window", &project_arg]).await?;

    // Give the window time to come up before targeting it again
    tokio::time::sleep(Duration::from_secs(2)).await;

    let doc_arg = spec
        .project_path()
        .join(DOCUMENTATION_FILE)
        .display()
        .to_string();
    run_editor(&editor, &["--reuse-window", &doc_arg]).await?;

    reporter.info(&format!("Project opened in VS Code via '{editor}'"));
    Ok(())
}

async fn run_editor(editor: &str, args: &[&str]) -> Result<()> {
    let status = TokioCommand::new(editor)
        .args(args)
        .status()
        .await
        .with_context(|| format!("Failed to run {editor}"))?;
    if !status.success() {
        anyhow::bail!("{editor} exited with code {}", status.code().unwrap_or(-1));
    }
    Ok(())
}
