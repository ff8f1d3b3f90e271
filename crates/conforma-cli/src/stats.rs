//! # Stats Subcommand
//!
//! Prints the completion of each theme and of the whole project.

use anyhow::Result;
use clap::Args;

use conforma_client::ConformaClient;
use conforma_core::{Project, ProjectId};
use conforma_score::{compute_overall_stats, compute_project_stats};

/// Arguments for the `conforma stats` subcommand.
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Project identifier.
    pub project: ProjectId,

    /// Print JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Execute the stats subcommand.
pub async fn run_stats(args: &StatsArgs, client: &ConformaClient) -> Result<u8> {
    let project = crate::fetch_project(client, &args.project).await?;
    if args.json {
        println!("{}", stats_json(&project)?);
    } else {
        print!("{}", stats_table(&project));
    }
    Ok(0)
}

/// Per-theme rows followed by the overall line.
pub fn stats_table(project: &Project) -> String {
    let themes = compute_project_stats(project);
    let width = themes
        .iter()
        .map(|t| t.nome.chars().count())
        .max()
        .unwrap_or(0)
        .max("Geral".len());

    let mut out = format!("{}\n", project.nome);
    for theme in &themes {
        out.push_str(&format!(
            "  {:<width$}  {:>3}%  {}\n",
            theme.nome, theme.porcentagem, theme.cor
        ));
    }
    let overall = compute_overall_stats(project);
    out.push_str(&format!(
        "  {:<width$}  {:>3}%  {}  ({}/{} concluídos)\n",
        "Geral", overall.porcentagem, overall.cor, overall.concluded, overall.total
    ));
    out
}

fn stats_json(project: &Project) -> Result<String> {
    let value = serde_json::json!({
        "projeto": project.nome,
        "temas": compute_project_stats(project),
        "geral": compute_overall_stats(project),
    });
    Ok(serde_json::to_string_pretty(&value)?)
}
