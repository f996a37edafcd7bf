//! Streamed execution of long-running external processes
//!
//! Output is forwarded to the console line-by-line as it arrives, so the
//! user sees progress during environment creation and package installation.
//! No timeout is enforced: a hung subprocess hangs the run, and killing a
//! half-finished installer would leave a worse mess than waiting.

use crate::report::Reporter;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

/// Spawn `program` with `args` in `cwd`, stream both output pipes to the
/// console until they close, then wait for exit.
///
/// A spawn failure or a non-zero exit is an error; everything the process
/// printed has already reached the console by then.
pub async fn run_streaming(
    program: &str,
    args: &[&str],
    cwd: &Path,
    reporter: &dyn Reporter,
) -> Result<()> {
    let rendered = render_command(program, args);
    reporter.info(&format!("Running: {rendered}"));
    println!();
    println!("{} {}", "Running:".dimmed(), rendered.yellow());
    println!();

    let mut child = TokioCommand::new(program)
        .args(args)
        .current_dir(cwd)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to run {program}"))?;

    let stdout = child.stdout.take().expect("Failed to capture stdout");
    let stderr = child.stderr.take().expect("Failed to capture stderr");

    let mut stdout_reader = BufReader::new(stdout).lines();
    let mut stderr_reader = BufReader::new(stderr).lines();

    let mut stdout_done = false;
    let mut stderr_done = false;

    // Drain both pipes until end-of-stream on each
    while !(stdout_done && stderr_done) {
        tokio::select! {
            line = stdout_reader.next_line(), if !stdout_done => {
                match line {
                    Ok(Some(line)) => println!("  {line}"),
                    Ok(None) => stdout_done = true,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stdout:".red(), e);
                        stdout_done = true;
                    }
                }
            }
            line = stderr_reader.next_line(), if !stderr_done => {
                match line {
                    Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                    Ok(None) => stderr_done = true,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stderr:".red(), e);
                        stderr_done = true;
                    }
                }
            }
        }
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("Failed to wait for {program}"))?;

    if status.success() {
        reporter.info(&format!("Completed: {rendered}"));
        Ok(())
    } else {
        anyhow::bail!(
            "{program} exited with code {}",
            status.code().unwrap_or(-1)
        );
    }
}

fn render_command(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{program} {}", args.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Level, MemoryReporter};
    use tempfile::TempDir;

    #[tokio::test]
    #[cfg(unix)]
    async fn test_run_streaming_succeeds_and_reports_the_command() {
        let temp = TempDir::new().unwrap();
        let reporter = MemoryReporter::new();

        run_streaming("sh", &["-c", "echo one; echo two"], temp.path(), &reporter)
            .await
            .unwrap();

        assert!(reporter.contains(Level::Info, "Running: sh -c"));
        assert!(reporter.contains(Level::Info, "Completed: sh -c"));
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn test_run_streaming_surfaces_nonzero_exit() {
        let temp = TempDir::new().unwrap();
        let reporter = MemoryReporter::new();

        let err = run_streaming("sh", &["-c", "exit 3"], temp.path(), &reporter)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("exited with code 3"));
    }

    #[tokio::test]
    async fn test_run_streaming_fails_on_missing_program() {
        let temp = TempDir::new().unwrap();
        let reporter = MemoryReporter::new();

        let err = run_streaming("pyforge-no-such-tool", &[], temp.path(), &reporter)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to run"));
    }

    #[test]
    fn test_render_command_joins_arguments() {
        assert_eq!(render_command("conda", &[]), "conda");
        assert_eq!(
            render_command("conda", &["env", "create", "-f", "environment.yml"]),
            "conda env create -f environment.yml"
        );
    }
}
