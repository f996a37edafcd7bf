//! Detection of the external tools the generator shells out to

use std::process::Command;

/// Tool detection result
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

/// Probe a tool by running `<binary> --version`
fn probe(binary: &'static str, name: &'static str) -> ToolInfo {
    let output = Command::new(binary).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            ToolInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => ToolInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Git is available
pub fn check_git() -> ToolInfo {
    probe("git", "Git")
}

/// Check if Conda is available
pub fn check_conda() -> ToolInfo {
    probe("conda", "Conda")
}

/// Check if pre-commit is available
pub fn check_pre_commit() -> ToolInfo {
    probe("pre-commit", "pre-commit")
}

/// Check if a command resolves on the search path
pub fn command_on_path(command: &str) -> bool {
    which::which(command).is_ok()
}
