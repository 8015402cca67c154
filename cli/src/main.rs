//! # HexMaker Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the HexMaker CLI, a scaffolding
//! tool for PHP projects following a hexagonal architecture. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Resolving the project (configuration, root directory, template overrides)
//! - Routing execution to the appropriate command handler
//!
//! ## Examples
//!
//! ```bash
//! # Generate a command use case in the User module
//! hexmaker command user CreateUser -p email -p name
//!
//! # Generate a query returning a list of entities
//! hexmaker query catalog ListProducts --entity Product --collection
//!
//! # See what the analyzer infers from a name
//! hexmaker -v analyze AttribuerCadeauxCommand
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Route to the command handler
//! 4. Display any error and exit with status 1
//!
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Subcommand arguments and handlers
mod common; // Shared utilities (fs, naming, namespaces)
mod core; // Core infrastructure (errors, config, templating)
mod maker; // Command analysis and use case generation

use commands::utils::MakerContext;

#[derive(Parser, Debug)]
#[command(
    name = "hexmaker",
    about = "Scaffolds CQRS commands and queries for hexagonal PHP projects",
    long_about = "Generates command/query DTOs, handlers, factories and responses.\n\
                  Command handlers are pre-filled from the intent read in the command name.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Project directory (defaults to the current directory).
    #[arg(short = 'C', long, global = true, default_value = ".")]
    project_dir: PathBuf,

    /// Directory with template overrides, e.g. `command/CommandHandler.php.tera`.
    #[arg(long, global = true, env = "HEXMAKER_TEMPLATES_DIR")]
    templates_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Generate a command, its handler and optionally a factory and a test.
    #[command(alias = "c")]
    Command(commands::command::CommandArgs),
    /// Generate a query, its handler and its response.
    #[command(alias = "q")]
    Query(commands::query::QueryArgs),
    /// Show the pattern, entities and handler code inferred from a command name.
    #[command(alias = "a")]
    Analyze(commands::analyze::AnalyzeArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Command(args) => {
            MakerContext::load(&cli.project_dir, cli.templates_dir.as_deref())
                .and_then(|context| commands::command::handle_command(args, &context))
        }
        Commands::Query(args) => {
            MakerContext::load(&cli.project_dir, cli.templates_dir.as_deref())
                .and_then(|context| commands::query::handle_query(args, &context))
        }
        Commands::Analyze(args) => commands::analyze::handle_analyze(args),
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
