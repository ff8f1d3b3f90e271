//! # Evidence Subcommand
//!
//! Records evidence for one requirement, which concludes it, then prints
//! the refreshed completion of its theme.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;

use conforma_client::{ConformaClient, FileUpload};
use conforma_core::{ProjectId, RequirementId, ThemeId};
use conforma_score::compute_theme_stats;
use conforma_workflow::{submit_evidence, EvidenceSubmission, EvidenceTarget, TracingNotifier};

/// Arguments for the `conforma evidence` subcommand.
#[derive(Args, Debug)]
pub struct EvidenceArgs {
    /// Project identifier.
    pub project: ProjectId,
    /// Theme identifier within the project.
    pub theme: ThemeId,
    /// Requirement identifier within the theme.
    pub requirement: RequirementId,

    /// Evidence text.
    #[arg(long)]
    pub text: String,

    /// Validity date of the evidence (YYYY-MM-DD).
    #[arg(long)]
    pub validity: Option<NaiveDate>,

    /// File to attach. At most one per submission.
    #[arg(long = "attach")]
    pub attach: Vec<PathBuf>,
}

/// Execute the evidence subcommand.
pub async fn run_evidence(args: &EvidenceArgs, client: &ConformaClient) -> Result<u8> {
    let mut attachments = Vec::with_capacity(args.attach.len());
    for path in &args.attach {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("reading {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "anexo".to_string());
        attachments.push(FileUpload { file_name, bytes });
    }

    let target = EvidenceTarget {
        project: args.project.clone(),
        theme: args.theme.clone(),
        requirement: args.requirement.clone(),
    };
    let submission = EvidenceSubmission {
        text: args.text.clone(),
        validity: args.validity,
        attachments,
    };

    let project = submit_evidence(client, &TracingNotifier, &target, submission).await?;

    if let Some(theme) = project.theme(&args.theme) {
        let stats = compute_theme_stats(theme);
        println!(
            "Requisito {} concluído. {}: {}% ({})",
            args.requirement, stats.nome, stats.porcentagem, stats.cor
        );
    }
    Ok(0)
}
