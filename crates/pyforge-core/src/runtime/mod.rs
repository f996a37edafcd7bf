//! External tool detection and subprocess plumbing
//!
//! This module provides:
//! - Probes for the tools the generator shells out to (git, conda, pre-commit)
//! - Line-streamed execution for the long-running bootstrap commands

pub mod check;
pub mod stream;

pub use check::{check_conda, check_git, check_pre_commit, command_on_path, ToolInfo};
pub use stream::run_streaming;
