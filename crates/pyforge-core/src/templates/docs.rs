//! The human-readable documentation summary written to the project root

use crate::project::ProjectSpec;

/// Filename of the documentation summary, relative to the project root
pub const DOCUMENTATION_FILE: &str = "documentation.txt";

/// Render the multi-section documentation summary.
///
/// The `Generated:` header carries the spec's creation timestamp; everything
/// else is static apart from name, version, and location.
pub fn render_documentation(spec: &ProjectSpec) -> String {
    let name = spec.name().as_str();
    let python = spec.python();
    let location = spec.project_path().display();
    let stamp = spec.created_at().format("%Y-%m-%d %H:%M:%S");

    format!(
        r#"PROJECT DOCUMENTATION
Generated: {stamp}

1. GENERAL INFORMATION
----------------------
Project name: {name}
Location: {location}
Python version: {python}

2. PROJECT STRUCTURE
--------------------
{name}/
├── src/         - Main source code
├── config/      - Global configuration
├── tests/       - Unit and integration tests
└── docs/        - Project documentation

3. ENVIRONMENT SETUP
--------------------
1. Create and activate the Conda environment:
   conda env create -f environment.yml
   conda activate {name}

2. Install additional dependencies:
   pip install -r requirements.txt

3. Set up the development tooling:
   pre-commit install

4. VERSION CONTROL
------------------
- Git repository initialized
- .gitignore in place
- pre-commit hooks installed for:
  * Black (code formatting)
  * Flake8 (static analysis)
  * isort (import sorting)

5. QUALITY TOOLING
------------------
- Black: automatic code formatting
  * Configured in pyproject.toml
  * Maximum line length: 88 characters

- Flake8: static code analysis
  * Configured in .flake8
  * Docstring checks enabled

- pytest: test framework
  * Test directory: ./tests
  * Configured in pyproject.toml

6. NEXT STEPS
-------------
1. Review the documentation in docs/
2. Configure your editor (VSCode/PyCharm)
3. Activate the virtual environment
4. Install the dependencies
5. Run the initial tests
"#
    )
}
