//! Pyforge Core - Shared library for the Python project generator
//!
//! This library creates ready-to-work-on Python projects: a source skeleton,
//! rendered starter and tooling files, a Git repository, and optionally a
//! Conda environment and an editor session. It is designed so the interactive
//! CLI is only a thin layer over an embeddable core.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Path resolution, template rendering, filesystem
//!   scaffolding, tool detection, Git and Conda plumbing
//! - **Layer 2: Workflow Orchestration** - [`RunPlan`] describes one fully-decided
//!   run; [`execute`] carries it out and reports through a [`Reporter`]
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use pyforge_core::{execute, MemoryReporter, ProjectSpec, RunPlan};
//!
//! let spec = ProjectSpec::new(
//!     "demo".parse()?,
//!     "3.10".parse()?,
//!     "/tmp/projects".into(),
//! );
//! let plan = RunPlan {
//!     spec,
//!     overwrite: false,
//!     install_env: false,
//!     open_editor: false,
//!     editor_override: None,
//! };
//! let reporter = MemoryReporter::new();
//! let outcome = execute(&plan, &reporter).await?;
//! ```

pub mod bootstrap;
pub mod editor;
pub mod generator;
pub mod paths;
pub mod project;
pub mod report;
pub mod runtime;
pub mod scaffold;
pub mod templates;
pub mod vcs;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use bootstrap::BootstrapError;
pub use generator::{execute, RunOutcome, RunPlan};
pub use paths::{DestinationError, DestinationResolver};
pub use project::{ProjectName, ProjectSpec, PythonVersion};
pub use report::{MemoryReporter, Reporter, RunLogger};

#[cfg(feature = "tui")]
pub use tui::{run, CreateArgs};
