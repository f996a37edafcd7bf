//! Charm-style CLI prompts using cliclack
//!
//! This is the interactive adapter: it gathers and retries input until a
//! complete [`RunPlan`] exists, hands it to [`generator::execute`], and
//! afterwards deals with the rollback offer and the closing summary.

use crate::generator::{self, RunOutcome, RunPlan};
use crate::paths::{DestinationError, DestinationResolver};
use crate::project::{ProjectName, ProjectSpec, PythonVersion};
use crate::report::{default_log_dir, Reporter, RunLogger};
use crate::runtime::check;
use crate::scaffold;
use anyhow::Result;
use std::path::PathBuf;

/// CLI arguments for the create command
#[derive(Debug, Clone)]
pub struct CreateArgs {
    /// Project name (prompted for when omitted)
    pub name: Option<String>,

    /// Python version as `major.minor` (prompted for when omitted)
    pub python: Option<String>,

    /// Destination directory to create the project under
    pub directory: Option<PathBuf>,

    /// Clear an existing non-empty project directory without asking
    pub force: bool,

    /// Run the environment bootstrap without asking
    pub install_deps: bool,

    /// Open VS Code on the finished project without asking
    pub open_editor: bool,

    /// Editor executable used when `code` is not on the PATH
    pub editor_cmd: Option<String>,

    /// Directory for the per-run log file
    pub log_dir: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    pub yes: bool,
}

impl Default for CreateArgs {
    fn default() -> Self {
        Self {
            name: None,
            python: None,
            directory: None,
            force: false,
            install_deps: false,
            open_editor: false,
            editor_cmd: None,
            log_dir: None,
            yes: false,
        }
    }
}

/// Run the generator with interactive prompts
pub async fn run(args: CreateArgs) -> Result<()> {
    cliclack::intro("Python Project Generator")?;

    // Step 1: project name and Python version
    let name = resolve_name(&args)?;
    let python = resolve_python(&args)?;

    // Step 2: per-run logging sink
    let log_dir = args.log_dir.clone().unwrap_or_else(default_log_dir);
    let logger = RunLogger::create(&log_dir, name.as_str())?;
    cliclack::log::info(format!("Run log: {}", logger.path().display()))?;

    // Step 3: destination directory (interactive retry loop)
    let resolver = DestinationResolver::new();
    let destination = resolve_destination(&resolver, &args, &logger)?;
    let spec = ProjectSpec::new(name, python, destination);

    // Step 4: overwrite consent for a populated project directory
    let overwrite = confirm_overwrite(&spec, &args, &logger).await?;

    // Step 5: tool availability and final summary
    show_tool_status();
    confirm_summary(&spec, &args)?;

    // Step 6: post-process decisions
    let (install_env, open_editor) = resolve_post_process(&args)?;

    let plan = RunPlan {
        spec,
        overwrite,
        install_env,
        open_editor,
        editor_override: args.editor_cmd.clone(),
    };

    // Step 7: generate
    let outcome = generator::execute(&plan, &logger).await?;

    // Step 8: offer rollback when the bootstrap failed
    if outcome.needs_rollback_offer() && offer_rollback(&plan, &args, &logger).await? {
        cliclack::outro("Nothing was left behind.")?;
        anyhow::bail!("Environment setup failed and the project was rolled back");
    }

    // Step 9: closing summary
    let env_ready = plan.install_env && outcome.env_error.is_none();
    print_next_steps(&plan.spec, &outcome, env_ready)?;

    Ok(())
}

fn resolve_name(args: &CreateArgs) -> Result<ProjectName> {
    if let Some(raw) = &args.name {
        let name: ProjectName = raw.parse()?;
        cliclack::log::info(format!("Project name: {}", name.as_str()))?;
        return Ok(name);
    }

    let input: String = cliclack::input("Project name")
        .placeholder("my_project")
        .validate(|value: &String| match value.parse::<ProjectName>() {
            Ok(_) => Ok(()),
            Err(e) => Err(e.to_string()),
        })
        .interact()?;

    Ok(input.parse()?)
}

fn resolve_python(args: &CreateArgs) -> Result<PythonVersion> {
    if let Some(raw) = &args.python {
        let python: PythonVersion = raw.parse()?;
        cliclack::log::info(format!("Python version: {python}"))?;
        return Ok(python);
    }

    let default = PythonVersion::default().to_string();
    let input: String = cliclack::input("Python version")
        .placeholder(default.as_str())
        .default_input(default.as_str())
        .validate(|value: &String| {
            if value.is_empty() {
                return Ok(());
            }
            match value.parse::<PythonVersion>() {
                Ok(_) => Ok(()),
                Err(e) => Err(e.to_string()),
            }
        })
        .interact()?;

    if input.is_empty() {
        Ok(PythonVersion::default())
    } else {
        Ok(input.parse()?)
    }
}

fn resolve_destination(
    resolver: &DestinationResolver,
    args: &CreateArgs,
    reporter: &dyn Reporter,
) -> Result<PathBuf> {
    // A --directory flag is validated once; only the missing-directory case
    // asks a question, and --yes answers it.
    if let Some(dir) = &args.directory {
        let raw = dir.to_string_lossy();
        let path = resolver.resolve(&raw)?;
        match resolver.validate(&path) {
            Ok(()) => {}
            Err(DestinationError::DoesNotExist(_)) => {
                let create = args.yes
                    || cliclack::confirm(format!(
                        "The folder {} does not exist. Create it?",
                        path.display()
                    ))
                    .initial_value(true)
                    .interact()?;
                if !create {
                    anyhow::bail!("Setup cancelled.");
                }
                resolver.create(&path)?;
                reporter.info(&format!("Directory created: {}", path.display()));
            }
            Err(e) => return Err(e.into()),
        }
        cliclack::log::info(format!("Using directory: {}", path.display()))?;
        reporter.info(&format!("Destination validated: {}", path.display()));
        return Ok(path);
    }

    loop {
        reporter.info("Prompting for the project destination");
        let input: String = cliclack::input("Where should the new project be created?")
            .placeholder("~/projects")
            .interact()?;

        let path = match resolver.resolve(&input) {
            Ok(path) => path,
            Err(e) => {
                reporter.warn(&format!("Rejected destination '{input}': {e}"));
                cliclack::log::warning(format!("{e}"))?;
                continue;
            }
        };

        match resolver.validate(&path) {
            Ok(()) => {
                reporter.info(&format!("Destination validated: {}", path.display()));
                return Ok(path);
            }
            Err(DestinationError::DoesNotExist(_)) => {
                let create = cliclack::confirm(format!(
                    "The folder {} does not exist. Create it?",
                    path.display()
                ))
                .initial_value(true)
                .interact()?;
                if !create {
                    reporter.info("Declined to create the missing directory");
                    continue;
                }
                match resolver.create(&path) {
                    Ok(()) => {
                        reporter.info(&format!("Directory created: {}", path.display()));
                        return Ok(path);
                    }
                    Err(e) => {
                        reporter.error(&format!("Could not create the directory: {e}"));
                        cliclack::log::error(format!("Could not create the directory: {e}"))?;
                        continue;
                    }
                }
            }
            Err(e) => {
                reporter.warn(&format!("Rejected destination '{}': {e}", path.display()));
                cliclack::log::warning(format!("{e}"))?;
                continue;
            }
        }
    }
}

async fn confirm_overwrite(
    spec: &ProjectSpec,
    args: &CreateArgs,
    reporter: &dyn Reporter,
) -> Result<bool> {
    if !scaffold::dir_has_entries(spec.project_path()).await? {
        return Ok(false);
    }

    reporter.warn(&format!(
        "Existing non-empty directory: {}",
        spec.project_path().display()
    ));

    if args.force {
        cliclack::log::warning("Overwriting the existing directory (--force)")?;
        return Ok(true);
    }
    if args.yes {
        // --yes alone never destroys existing work
        anyhow::bail!(
            "Directory {} already exists and is not empty (pass --force to overwrite)",
            spec.project_path().display()
        );
    }

    let overwrite = cliclack::confirm(format!(
        "The directory {} already exists and is not empty. Overwrite it?",
        spec.project_path().display()
    ))
    .initial_value(false)
    .interact()?;

    if !overwrite {
        reporter.info("Overwrite declined, aborting");
        anyhow::bail!("Setup cancelled.");
    }
    reporter.info("Overwrite confirmed");
    Ok(true)
}

fn show_tool_status() {
    let spinner = cliclack::spinner();
    spinner.start("Checking tools...");

    let tools = [
        check::check_git(),
        check::check_conda(),
        check::check_pre_commit(),
    ];
    let rendered: Vec<String> = tools
        .iter()
        .map(|t| {
            if t.available {
                format!("{} ({})", t.name, t.version.as_deref().unwrap_or("unknown"))
            } else {
                format!("{} (not installed)", t.name)
            }
        })
        .collect();

    spinner.stop(format!("Detected tools: {}", rendered.join(", ")));
}

fn confirm_summary(spec: &ProjectSpec, args: &CreateArgs) -> Result<()> {
    cliclack::log::info(format!(
        "The project will be created with:\n  Name: {}\n  Location: {}\n  Python: {}",
        spec.name().as_str(),
        spec.project_path().display(),
        spec.python()
    ))?;

    if args.yes {
        return Ok(());
    }

    let proceed = cliclack::confirm("Continue?")
        .initial_value(true)
        .interact()?;
    if !proceed {
        anyhow::bail!("Setup cancelled.");
    }
    Ok(())
}

fn resolve_post_process(args: &CreateArgs) -> Result<(bool, bool)> {
    let install_env = if args.install_deps {
        true
    } else if args.yes {
        false
    } else {
        cliclack::confirm("Install the environment dependencies automatically?")
            .initial_value(false)
            .interact()?
    };

    let open_editor = if args.open_editor {
        true
    } else if args.yes {
        false
    } else {
        cliclack::confirm("Open the project in VS Code?")
            .initial_value(false)
            .interact()?
    };

    Ok((install_env, open_editor))
}

async fn offer_rollback(
    plan: &RunPlan,
    args: &CreateArgs,
    reporter: &dyn Reporter,
) -> Result<bool> {
    if args.yes {
        reporter.warn("Environment setup failed; keeping the project (--yes mode)");
        return Ok(false);
    }

    let rollback =
        cliclack::confirm("Environment setup failed. Revert everything that was created?")
            .initial_value(false)
            .interact()?;

    if !rollback {
        reporter.info("Rollback declined, keeping the project");
        cliclack::log::warning("The project was kept; set up the environment manually later")?;
        return Ok(false);
    }

    reporter.info("Starting rollback");
    let spinner = cliclack::spinner();
    spinner.start("Reverting changes...");
    scaffold::remove_project(plan.spec.project_path()).await?;
    spinner.stop("Changes reverted");
    reporter.info(&format!(
        "Project directory removed: {}",
        plan.spec.project_path().display()
    ));
    Ok(true)
}

fn print_next_steps(spec: &ProjectSpec, outcome: &RunOutcome, env_ready: bool) -> Result<()> {
    let name = spec.name().as_str();
    let location = spec.project_path().display();

    println!();
    println!("  Project {name} created successfully!");
    println!();
    println!("  Location: {location}");
    println!();
    println!("  Next steps");
    println!();

    let mut steps: Vec<String> = vec![format!("cd {location}")];
    if !env_ready {
        steps.push("conda env create -f environment.yml".to_string());
    }
    steps.push(format!("conda activate {name}"));
    if !env_ready {
        steps.push("pip install -r requirements.txt".to_string());
    }
    if !outcome.hooks_installed {
        steps.push("pre-commit install".to_string());
    }
    steps.push("pytest".to_string());
    steps.push("Review documentation.txt and start coding in src/main.py".to_string());

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
