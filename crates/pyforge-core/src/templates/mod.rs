//! Template rendering
//!
//! Every file the generator writes is rendered here as a pure function of a
//! [`ProjectSpec`](crate::project::ProjectSpec). Two fixed sets exist: the
//! project files (sources, manifests, docs) and the quality-tooling
//! configuration written on top of them. Rendering never touches the
//! filesystem.

mod docs;
mod project;
mod tooling;

pub use docs::{render_documentation, DOCUMENTATION_FILE};
pub use project::render_project_files;
pub use tooling::render_tooling_files;

/// A rendered file, addressed relative to the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    path: &'static str,
    content: String,
}

impl RenderedFile {
    fn new(path: &'static str, content: impl Into<String>) -> Self {
        Self {
            path,
            content: content.into(),
        }
    }

    /// Path relative to the project root, forward-slash separated
    pub fn relative_path(&self) -> &'static str {
        self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{ProjectName, ProjectSpec, PythonVersion};
    use chrono::{Local, TimeZone};
    use std::path::PathBuf;

    fn sample_spec() -> ProjectSpec {
        let name: ProjectName = "demo".parse().unwrap();
        let python: PythonVersion = "3.10".parse().unwrap();
        let created = Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        ProjectSpec::with_created_at(name, python, PathBuf::from("/tmp/out"), created)
    }

    #[test]
    fn test_both_sets_render_deterministically() {
        let spec = sample_spec();

        let first: Vec<_> = render_project_files(&spec);
        let second: Vec<_> = render_project_files(&spec);
        assert_eq!(first, second);

        let first_tooling: Vec<_> = render_tooling_files(&spec);
        let second_tooling: Vec<_> = render_tooling_files(&spec);
        assert_eq!(first_tooling, second_tooling);
    }

    #[test]
    fn test_tooling_set_overrides_shared_paths_with_richer_content() {
        let spec = sample_spec();
        let project = render_project_files(&spec);
        let tooling = render_tooling_files(&spec);

        let find = |set: &[RenderedFile], path: &str| {
            set.iter()
                .find(|f| f.relative_path() == path)
                .map(|f| f.content().to_string())
        };

        // Both sets carry these two paths; the tooling render wins at write
        // time and must actually differ.
        for shared in [".gitignore", ".env.example"] {
            let plain = find(&project, shared).unwrap();
            let rich = find(&tooling, shared).unwrap();
            assert_ne!(plain, rich, "{shared} should be extended by the tooling set");
        }
    }

    #[test]
    fn test_relative_paths_never_escape_the_project_root() {
        let spec = sample_spec();
        for file in render_project_files(&spec)
            .iter()
            .chain(render_tooling_files(&spec).iter())
        {
            let path = file.relative_path();
            assert!(!path.starts_with('/'), "{path} must be relative");
            assert!(!path.contains(".."), "{path} must not traverse upward");
        }
    }
}
