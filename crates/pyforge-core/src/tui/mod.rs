//! Interactive prompt flow built on cliclack
//!
//! Only compiled with the `tui` feature; without it the crate stays fully
//! console-free and embeddable.

#[cfg(feature = "tui")]
mod prompts;

#[cfg(feature = "tui")]
pub use prompts::{run, CreateArgs};
