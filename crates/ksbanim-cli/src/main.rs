//! ksbanim - workspace setup for ksbanim animations
//!
//! Usage:
//!   ksbanim list                  # Show available setup commands
//!   ksbanim run <COMMAND_ID>      # Run a command by identifier
//!   ksbanim pick                  # Choose a command interactively
//!   ksbanim fetch-file            # Download ksbanim.py into the workspace

mod host;
mod interactive;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ksbanim_core::action::ActionOutcome;
use ksbanim_core::commands::{CommandRegistry, ListEntry};
use ksbanim_core::context::AppContext;

use crate::host::TerminalHost;
use crate::interactive::Picker;

#[derive(Parser)]
#[command(name = "ksbanim")]
#[command(about = "Set up a workspace for ksbanim", long_about = None)]
struct Cli {
    /// Workspace folder (defaults to the current directory)
    #[arg(long, short, global = true)]
    workspace: Option<PathBuf>,

    /// Path to a ksbanim.toml configuration file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available setup commands
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Run a setup command by identifier
    Run {
        /// Command identifier (e.g. ksbanim.downloadFile)
        command_id: String,
    },

    /// Choose a setup command interactively
    Pick,

    /// Download ksbanim.py into the workspace
    FetchFile,

    /// Install the Python GUI toolkit
    InstallDependency,

    /// Install the Python editor extension
    InstallExtension,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ksbanim=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run_cli(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run_cli(cli: Cli) -> Result<ExitCode> {
    let ctx = AppContext::load(cli.config.as_deref())?;
    let registry = ctx.command_registry();

    let command_id = match cli.command {
        Commands::List { format } => {
            print_entries(&registry.entries(), format)?;
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Run { command_id } => command_id,
        Commands::Pick => match Picker::new(registry.entries()).pick()? {
            Some(id) => id,
            None => return Ok(ExitCode::SUCCESS),
        },
        Commands::FetchFile => ksbanim_core::action::DOWNLOAD_FILE_COMMAND.to_string(),
        Commands::InstallDependency => ksbanim_core::action::INSTALL_DEPENDENCY_COMMAND.to_string(),
        Commands::InstallExtension => ksbanim_core::action::INSTALL_EXTENSION_COMMAND.to_string(),
    };

    let roots = workspace_roots(cli.workspace)?;
    let runner = ctx.runner(Arc::new(TerminalHost::new(roots)))?;
    run_command(&registry, &runner, &command_id).await
}

async fn run_command(
    registry: &CommandRegistry,
    runner: &ksbanim_core::runner::ActionRunner,
    command_id: &str,
) -> Result<ExitCode> {
    let outcome = registry.dispatch(runner, command_id).await?;
    match outcome.reason() {
        None => tracing::debug!(command = command_id, "command succeeded"),
        Some(reason) => tracing::debug!(command = command_id, %reason, "command failed"),
    }

    match outcome {
        ActionOutcome::Success => Ok(ExitCode::SUCCESS),
        ActionOutcome::Failure(_) => Ok(ExitCode::FAILURE),
    }
}

fn workspace_roots(workspace: Option<PathBuf>) -> Result<Vec<PathBuf>> {
    let root = match workspace {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    Ok(vec![root])
}

fn print_entries(entries: &[ListEntry], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => print_entries_table(entries),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(entries)?);
        }
    }
    Ok(())
}

fn print_entries_table(entries: &[ListEntry]) {
    if entries.is_empty() {
        println!("No commands available.");
        return;
    }

    println!("  {:<20} {:<34} Icon", "Label", "Command");
    println!("  {}", "-".repeat(70));
    for entry in entries {
        println!(
            "  {:<20} {:<34} {}",
            entry.label, entry.action_id, entry.icon
        );
    }
}
