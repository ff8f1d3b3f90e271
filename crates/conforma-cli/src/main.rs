//! # conforma CLI entry point
//!
//! Parses command-line arguments, connects to the backend and dispatches to
//! subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use conforma_cli::catalog::{run_catalog, CatalogArgs};
use conforma_cli::evidence::{run_evidence, EvidenceArgs};
use conforma_cli::export::{run_export, ExportArgs};
use conforma_cli::project::{run_project, ProjectArgs};
use conforma_cli::stats::{run_stats, StatsArgs};

/// Conforma: environmental compliance tracking.
///
/// Tracks projects as themes of legal requirements, records evidence that
/// concludes them, reports completion and writes PDF summaries.
#[derive(Parser, Debug)]
#[command(name = "conforma", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Backend base URL. Overrides CONFORMA_API_BASE_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Request timeout in seconds. Overrides CONFORMA_TIMEOUT_SECS.
    #[arg(long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Project management (list, show, create, rename, edit, delete, link-theme).
    Project(ProjectArgs),

    /// Per-theme and overall completion of a project.
    Stats(StatsArgs),

    /// Record evidence for a requirement and conclude it.
    Evidence(EvidenceArgs),

    /// Write the PDF summary of a project.
    Export(ExportArgs),

    /// Laws, themes and requirement definitions.
    Catalog(CatalogArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    tracing::debug!("conforma CLI v{} starting", env!("CARGO_PKG_VERSION"));

    let client = match conforma_cli::connect(cli.api_url.as_deref(), cli.timeout) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(1);
        }
    };

    let result = match &cli.command {
        Commands::Project(args) => run_project(args, &client).await,
        Commands::Stats(args) => run_stats(args, &client).await,
        Commands::Evidence(args) => run_evidence(args, &client).await,
        Commands::Export(args) => run_export(args, &client).await,
        Commands::Catalog(args) => run_catalog(args, &client).await,
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
