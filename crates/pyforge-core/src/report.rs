//! Run reporting
//!
//! Every component takes an explicit [`Reporter`] instead of configuring a
//! process-wide logger. The production sink appends to a per-run log file and
//! mirrors each message to the console; tests use the capturing sink.

use chrono::Local;
use colored::Colorize;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Severity of a reported event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    /// Label written to the log file
    pub fn label(&self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARNING",
            Level::Error => "ERROR",
        }
    }
}

/// Sink for everything the generator reports while it runs.
///
/// The sink is an observability channel, not a control interface: reporting
/// must never fail the caller, so the methods return nothing.
pub trait Reporter: Send + Sync {
    fn report(&self, level: Level, message: &str);

    fn info(&self, message: &str) {
        self.report(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.report(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.report(Level::Error, message);
    }
}

/// Default directory for run logs: the platform-local data dir, or the system
/// temp dir when no data dir is available.
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("pyforge").join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("pyforge-logs"))
}

/// File-backed reporter mirroring every message to the console.
///
/// Log lines use the `timestamp - pyforge - LEVEL - message` shape so a run
/// can be reconstructed from the file alone.
pub struct RunLogger {
    file: Mutex<File>,
    path: PathBuf,
}

impl RunLogger {
    /// Open (appending) `<log_dir>/<project_name>_generation.log`, creating
    /// the directory when needed.
    pub fn create(log_dir: &Path, project_name: &str) -> anyhow::Result<Self> {
        use anyhow::Context;

        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
        let path = log_dir.join(format!("{project_name}_generation.log"));
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open run log: {}", path.display()))?;

        Ok(Self {
            file: Mutex::new(file),
            path,
        })
    }

    /// Where this run is being logged
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Reporter for RunLogger {
    fn report(&self, level: Level, message: &str) {
        if let Ok(mut file) = self.file.lock() {
            let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
            let _ = writeln!(file, "{stamp} - pyforge - {} - {message}", level.label());
        }

        match level {
            Level::Info => eprintln!("  {}", message.dimmed()),
            Level::Warn => eprintln!("{} {}", "Warning:".yellow(), message),
            Level::Error => eprintln!("{} {}", "Error:".red(), message),
        }
    }
}

/// Capturing sink for tests
#[derive(Debug, Default)]
pub struct MemoryReporter {
    events: Mutex<Vec<(Level, String)>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events reported so far, in order
    pub fn events(&self) -> Vec<(Level, String)> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Whether any event of `level` contains `needle`
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.events()
            .iter()
            .any(|(l, m)| *l == level && m.contains(needle))
    }
}

impl Reporter for MemoryReporter {
    fn report(&self, level: Level, message: &str) {
        if let Ok(mut events) = self.events.lock() {
            events.push((level, message.to_string()));
        }
    }
}
