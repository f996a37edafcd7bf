//! The base project file set: manifests, sources, package markers, docs

use super::RenderedFile;
use crate::project::ProjectSpec;

/// Render the base project files.
///
/// Contents depend only on the spec (name, version, creation date), so the
/// same spec always renders byte-identical files.
pub fn render_project_files(spec: &ProjectSpec) -> Vec<RenderedFile> {
    let name = spec.name().as_str();
    let python = spec.python();
    let date = spec.created_at().format("%Y-%m-%d");

    vec![
        RenderedFile::new(
            "README.md",
            format!(
                r#"# {name}

## Description
Detailed project description goes here.

## Installation
1. Clone the repository
2. Create the environment:
   ```bash
   conda env create -f environment.yml
   conda activate {name}
   ```
3. Install the dependencies:
   ```bash
   pip install -r requirements.txt
   ```

## Usage
Usage instructions go here.
"#
            ),
        ),
        RenderedFile::new(
            "requirements.txt",
            r#"black==22.3.0
flake8==4.0.1
pytest==7.1.1
pre-commit==2.19.0
python-dotenv==0.20.0
"#,
        ),
        RenderedFile::new(
            "environment.yml",
            format!(
                r#"name: {name}
channels:
  - defaults
  - conda-forge
dependencies:
  - python={python}
  - pip
  - black
  - flake8
  - pytest
  - pre-commit
"#
            ),
        ),
        RenderedFile::new(
            ".gitignore",
            r#"# Python
__pycache__/
*.py[cod]
*$py.class
*.so
.Python
build/
develop-eggs/
dist/
downloads/
eggs/
.eggs/
lib/
lib64/
parts/
sdist/
var/
wheels/
*.egg-info/
.installed.cfg
*.egg

# Environments
.env
.venv
env/
venv/
ENV/

# IDE
.idea/
.vscode/
*.swp
*.swo

# Logs
*.log
"#,
        ),
        RenderedFile::new(
            ".env.example",
            r#"# Project environment variables
DEBUG=True
API_KEY=your-api-key-here
"#,
        ),
        RenderedFile::new("src/__init__.py", ""),
        RenderedFile::new(
            "src/main.py",
            format!(
                r#"#!/usr/bin/env python3
"""
{name} - Short description goes here

Author: Your Name
Date: {date}
"""

def main():
    """Main entry point of the application."""
    print("Welcome to {name}!")

if __name__ == '__main__':
    main()
"#
            ),
        ),
        RenderedFile::new(
            "config/settings.py",
            r#"# Global project settings
DEBUG = True
VERSION = '0.1.0'
"#,
        ),
        RenderedFile::new("tests/__init__.py", ""),
        RenderedFile::new(
            "tests/test_main.py",
            r#"import pytest

def test_example():
    """Example test."""
    assert True
"#,
        ),
        RenderedFile::new(
            "docs/README.md",
            format!(
                r#"# {name} Documentation

## Project Structure
- `src/`: Source code
- `config/`: Configuration files
- `tests/`: Unit and integration tests
- `docs/`: Detailed documentation

## Environment Setup
1. Create the virtual environment
2. Install the dependencies
3. Configure pre-commit

## Development Guides
[Add project-specific guides here]
"#
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{ProjectName, PythonVersion};
    use chrono::{Local, TimeZone};
    use std::path::PathBuf;

    fn spec_named(name: &str, version: &str) -> ProjectSpec {
        let name: ProjectName = name.parse().unwrap();
        let python: PythonVersion = version.parse().unwrap();
        let created = Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        ProjectSpec::with_created_at(name, python, PathBuf::from("/tmp/out"), created)
    }

    fn content_of<'a>(files: &'a [RenderedFile], path: &str) -> &'a str {
        files
            .iter()
            .find(|f| f.relative_path() == path)
            .unwrap_or_else(|| panic!("missing template: {path}"))
            .content()
    }

    #[test]
    fn test_renders_the_full_documented_file_set() {
        let files = render_project_files(&spec_named("demo", "3.10"));
        let paths: Vec<_> = files.iter().map(|f| f.relative_path()).collect();
        assert_eq!(
            paths,
            vec![
                "README.md",
                "requirements.txt",
                "environment.yml",
                ".gitignore",
                ".env.example",
                "src/__init__.py",
                "src/main.py",
                "config/settings.py",
                "tests/__init__.py",
                "tests/test_main.py",
                "docs/README.md",
            ]
        );
    }

    #[test]
    fn test_readme_and_entry_point_interpolate_the_name() {
        let files = render_project_files(&spec_named("analytics", "3.9"));

        let readme = content_of(&files, "README.md");
        assert!(readme.starts_with("# analytics\n"));
        assert!(readme.contains("conda activate analytics"));

        let main_py = content_of(&files, "src/main.py");
        assert!(main_py.starts_with("#!/usr/bin/env python3\n"));
        assert!(main_py.contains(r#"print("Welcome to analytics!")"#));
        assert!(main_py.contains("Date: 2024-05-01"));
    }

    #[test]
    fn test_environment_descriptor_is_valid_yaml_with_pinned_python() {
        let files = render_project_files(&spec_named("demo", "3.10"));
        let yaml = content_of(&files, "environment.yml");

        let parsed: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed["name"], serde_yaml::Value::from("demo"));

        let deps: Vec<String> = parsed["dependencies"]
            .as_sequence()
            .unwrap()
            .iter()
            .map(|d| d.as_str().unwrap().to_string())
            .collect();
        assert!(deps.contains(&"python=3.10".to_string()));
        assert!(deps.contains(&"pre-commit".to_string()));
    }

    #[test]
    fn test_package_markers_are_empty() {
        let files = render_project_files(&spec_named("demo", "3.10"));
        assert_eq!(content_of(&files, "src/__init__.py"), "");
        assert_eq!(content_of(&files, "tests/__init__.py"), "");
    }

    #[test]
    fn test_requirements_pin_the_quality_toolchain() {
        let files = render_project_files(&spec_named("demo", "3.10"));
        let requirements = content_of(&files, "requirements.txt");
        for pin in [
            "black==22.3.0",
            "flake8==4.0.1",
            "pytest==7.1.1",
            "pre-commit==2.19.0",
            "python-dotenv==0.20.0",
        ] {
            assert!(requirements.contains(pin), "missing pin: {pin}");
        }
    }
}
