//! pyforge CLI - Interactive generator for Python project skeletons

use anyhow::Result;
use clap::{Parser, Subcommand};
use pyforge_core::CreateArgs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pyforge")]
#[command(about = "Interactive generator for Python project skeletons")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new Python project
    Create(CliCreateArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Project name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Python version as major.minor (e.g. 3.10)
    #[arg(short, long)]
    pub python: Option<String>,

    /// Directory to create the project under
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Clear an existing non-empty project directory without asking
    #[arg(long)]
    pub force: bool,

    /// Create the Conda environment and install dependencies without asking
    #[arg(long = "install-deps")]
    pub install_deps: bool,

    /// Open the finished project in VS Code without asking
    #[arg(long = "open-editor")]
    pub open_editor: bool,

    /// Editor executable to launch when `code` is not on the PATH
    #[arg(long = "editor-cmd")]
    pub editor_cmd: Option<String>,

    /// Directory for the per-run log file
    #[arg(long = "log-dir")]
    pub log_dir: Option<PathBuf>,

    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            name: args.name,
            python: args.python,
            directory: args.directory,
            force: args.force,
            install_deps: args.install_deps,
            open_editor: args.open_editor,
            editor_cmd: args.editor_cmd,
            log_dir: args.log_dir,
            yes: args.yes,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    match args.command {
        Some(Command::Create(create_args)) => {
            let result = pyforge_core::run(create_args.into()).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
        None => {
            // No subcommand provided, default to create behavior (interactive mode)
            let result = pyforge_core::run(CreateArgs::default()).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
    }
}
