//! Validated project parameters and the immutable project spec

use chrono::{DateTime, Local};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Why a project name was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("project name cannot be empty")]
    Empty,

    #[error("project name cannot start with a digit")]
    LeadingDigit,

    #[error("project name may only contain letters, digits and underscores (found {0:?})")]
    InvalidCharacter(char),
}

/// Project name, guaranteed to be a valid Python identifier
/// (ASCII letters, digits and underscores, not starting with a digit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ProjectName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let first = chars.next().ok_or(NameError::Empty)?;
        if first.is_ascii_digit() {
            return Err(NameError::LeadingDigit);
        }
        if !(first.is_ascii_alphabetic() || first == '_') {
            return Err(NameError::InvalidCharacter(first));
        }
        for c in chars {
            if !(c.is_ascii_alphanumeric() || c == '_') {
                return Err(NameError::InvalidCharacter(c));
            }
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a Python version string was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("invalid format, use MAJOR.MINOR (for example 3.9)")]
    Malformed,

    #[error(
        "Python {major}.{minor} is not supported (supported: {SUPPORTED_MAJOR}.{MIN_MINOR} to {SUPPORTED_MAJOR}.{MAX_MINOR})"
    )]
    Unsupported { major: u8, minor: u8 },
}

/// The only major release the generated tooling targets
pub const SUPPORTED_MAJOR: u8 = 3;
/// Lowest supported minor release
pub const MIN_MINOR: u8 = 6;
/// Highest supported minor release
pub const MAX_MINOR: u8 = 12;

/// Target Python version, restricted to `3.6`..=`3.12`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PythonVersion {
    major: u8,
    minor: u8,
}

impl PythonVersion {
    pub fn major(&self) -> u8 {
        self.major
    }

    pub fn minor(&self) -> u8 {
        self.minor
    }

    /// Version without the dot, as black's `target-version` wants it
    /// (`3.9` -> `py39`, `3.10` -> `py310`).
    pub fn black_target(&self) -> String {
        format!("py{}{}", self.major, self.minor)
    }
}

impl Default for PythonVersion {
    /// The version offered when the prompt is left blank.
    fn default() -> Self {
        Self { major: 3, minor: 9 }
    }
}

impl FromStr for PythonVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (major, minor) = s.split_once('.').ok_or(VersionError::Malformed)?;
        let major: u8 = major.parse().map_err(|_| VersionError::Malformed)?;
        let minor: u8 = minor.parse().map_err(|_| VersionError::Malformed)?;

        if major != SUPPORTED_MAJOR || !(MIN_MINOR..=MAX_MINOR).contains(&minor) {
            return Err(VersionError::Unsupported { major, minor });
        }

        Ok(Self { major, minor })
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Everything the generator needs to know about the project being created.
///
/// Constructed only after every input has been validated; immutable from then
/// on. `project_path` is always `destination/name` and `created_at` is
/// captured once so the rendered templates are a pure function of the spec.
#[derive(Debug, Clone)]
pub struct ProjectSpec {
    name: ProjectName,
    python: PythonVersion,
    destination: PathBuf,
    project_path: PathBuf,
    created_at: DateTime<Local>,
}

impl ProjectSpec {
    pub fn new(name: ProjectName, python: PythonVersion, destination: PathBuf) -> Self {
        Self::with_created_at(name, python, destination, Local::now())
    }

    /// Like [`ProjectSpec::new`] but with an explicit timestamp, so tests can
    /// assert byte-identical output across runs.
    pub fn with_created_at(
        name: ProjectName,
        python: PythonVersion,
        destination: PathBuf,
        created_at: DateTime<Local>,
    ) -> Self {
        let project_path = destination.join(name.as_str());
        Self {
            name,
            python,
            destination,
            project_path,
            created_at,
        }
    }

    pub fn name(&self) -> &ProjectName {
        &self.name
    }

    pub fn python(&self) -> PythonVersion {
        self.python
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }
}
