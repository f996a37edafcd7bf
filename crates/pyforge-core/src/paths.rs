//! Destination path resolution and validation

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Why a destination string was rejected
#[derive(Debug, Error)]
pub enum DestinationError {
    #[error("The path cannot be empty")]
    Empty,
    #[error("Failed to expand '{raw}': {reason}")]
    Expansion { raw: String, reason: String },
    #[error("Cannot create the project inside the generator's own directory: {0}")]
    InsideInstallDir(PathBuf),
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Directory does not exist: {0}")]
    DoesNotExist(PathBuf),
    #[error("No write permission for: {0}")]
    NotWritable(PathBuf),
    #[error("Failed to inspect {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Directory the running executable lives in, canonicalized when possible
pub fn install_dir() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    exe_dir.canonicalize().unwrap_or(exe_dir)
}

/// Turns raw destination input into an absolute, validated directory path.
///
/// The roots are injected so the install-dir guard and tilde expansion can be
/// pointed at arbitrary directories.
pub struct DestinationResolver {
    install_dir: PathBuf,
    home_dir: Option<PathBuf>,
}

impl DestinationResolver {
    pub fn new() -> Self {
        Self {
            install_dir: install_dir(),
            home_dir: dirs::home_dir(),
        }
    }

    /// Resolver rooted at explicit directories
    pub fn with_roots(install_dir: PathBuf, home_dir: Option<PathBuf>) -> Self {
        Self {
            install_dir,
            home_dir,
        }
    }

    /// Expand and absolutize a raw destination string.
    ///
    /// A leading `~` or `~/` resolves against the home directory, `$VAR` and
    /// `${VAR}` against the environment, and relative paths against the
    /// current working directory. `~name` forms referring to another user's
    /// home are rejected rather than misread as paths under our own.
    pub fn resolve(&self, raw: &str) -> Result<PathBuf, DestinationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DestinationError::Empty);
        }

        // Tilde is handled against the injected home dir, before shellexpand
        let without_tilde = if let Some(rest) = trimmed.strip_prefix('~') {
            if !rest.is_empty() && !rest.starts_with('/') {
                return Err(DestinationError::Expansion {
                    raw: trimmed.to_string(),
                    reason: "only the current user's home can be referenced".to_string(),
                });
            }
            let home = self
                .home_dir
                .as_ref()
                .ok_or_else(|| DestinationError::Expansion {
                    raw: trimmed.to_string(),
                    reason: "home directory is unknown".to_string(),
                })?;
            let rest = rest.strip_prefix('/').unwrap_or(rest);
            if rest.is_empty() {
                home.display().to_string()
            } else {
                format!("{}/{}", home.display(), rest)
            }
        } else {
            trimmed.to_string()
        };

        let expanded = if without_tilde.contains('$') {
            shellexpand::env(&without_tilde)
                .map_err(|e| DestinationError::Expansion {
                    raw: trimmed.to_string(),
                    reason: e.to_string(),
                })?
                .to_string()
        } else {
            without_tilde
        };

        let path = PathBuf::from(expanded);
        if path.is_absolute() {
            Ok(path)
        } else {
            let cwd = std::env::current_dir().map_err(|source| DestinationError::Io {
                path: path.clone(),
                source,
            })?;
            Ok(cwd.join(path))
        }
    }

    /// Validate a resolved destination: outside the install dir, an existing
    /// directory, and writable.
    ///
    /// [`DestinationError::DoesNotExist`] is the one recoverable outcome; the
    /// caller may create the directory and validate again.
    pub fn validate(&self, path: &Path) -> Result<(), DestinationError> {
        self.guard_install_dir(path)?;

        match std::fs::metadata(path) {
            Ok(meta) if meta.is_dir() => probe_writable(path),
            Ok(_) => Err(DestinationError::NotADirectory(path.to_path_buf())),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(DestinationError::DoesNotExist(path.to_path_buf()))
            }
            Err(source) => Err(DestinationError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Create a missing destination directory, then validate it
    pub fn create(&self, path: &Path) -> Result<(), DestinationError> {
        std::fs::create_dir_all(path).map_err(|source| DestinationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.validate(path)
    }

    /// Reject destinations equal to or nested under the install directory,
    /// comparing canonicalized forms so trailing separators and symlinked
    /// aliases cannot slip through.
    fn guard_install_dir(&self, path: &Path) -> Result<(), DestinationError> {
        let install = canonical_base(&self.install_dir);
        let candidate = canonical_base(path);
        if candidate.starts_with(&install) {
            return Err(DestinationError::InsideInstallDir(path.to_path_buf()));
        }
        Ok(())
    }
}

impl Default for DestinationResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Canonicalize the deepest existing ancestor of `path` and re-append the
/// missing tail, so paths that do not exist yet still compare canonically.
fn canonical_base(path: &Path) -> PathBuf {
    let mut current = path.to_path_buf();
    let mut tail: Vec<std::ffi::OsString> = Vec::new();
    loop {
        match current.canonicalize() {
            Ok(canon) => {
                let mut result = canon;
                for part in tail.iter().rev() {
                    result.push(part);
                }
                return result;
            }
            Err(_) => match (current.parent(), current.file_name()) {
                (Some(parent), Some(name)) => {
                    tail.push(name.to_os_string());
                    current = parent.to_path_buf();
                }
                _ => return path.to_path_buf(),
            },
        }
    }
}

/// Permission probe: create and remove a throwaway file in `path`
fn probe_writable(path: &Path) -> Result<(), DestinationError> {
    let probe = path.join(format!(".pyforge-probe-{}", std::process::id()));
    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&probe)
    {
        Ok(_) => {
            let _ = std::fs::remove_file(&probe);
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            Err(DestinationError::NotWritable(path.to_path_buf()))
        }
        Err(source) => Err(DestinationError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
