//! # Export Subcommand
//!
//! Writes the PDF summary of a project to a local directory.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use conforma_client::ConformaClient;
use conforma_core::ProjectId;
use conforma_export::{export_project_summary, ExportOptions};

/// Arguments for the `conforma export` subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Project identifier.
    pub project: ProjectId,

    /// Output directory.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Leave evidence text out of the summary.
    #[arg(long)]
    pub no_evidence: bool,

    /// Leave the overall statistics block out of the summary.
    #[arg(long)]
    pub no_stats: bool,
}

impl ExportArgs {
    pub fn options(&self) -> ExportOptions {
        ExportOptions {
            include_evidence: !self.no_evidence,
            include_stats: !self.no_stats,
        }
    }
}

/// Execute the export subcommand.
pub async fn run_export(args: &ExportArgs, client: &ConformaClient) -> Result<u8> {
    let project = crate::fetch_project(client, &args.project).await?;
    let report = export_project_summary(&project, &args.options(), &args.out)?;
    println!("{} ({} páginas)", report.path.display(), report.pages);
    Ok(0)
}
