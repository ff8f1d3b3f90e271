//! # Project Subcommand
//!
//! ## Subcommands
//!
//! - `list` -- All projects with their overall completion.
//! - `show` -- One project as a tree of themes and requirements.
//! - `create` -- New project from the catalog and `--select THEME:REQ` picks.
//! - `rename` -- Change a project's name.
//! - `edit` -- Bulk edit: rename and reopen requirements in one checked call.
//! - `delete` -- Remove a project.
//! - `link-theme` -- Add a catalog theme to a project.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};

use conforma_client::projects::UpdateProjectRequest;
use conforma_client::ConformaClient;
use conforma_core::{Project, ProjectId, RequirementId, ThemeDefinition, ThemeId};
use conforma_score::compute_overall_stats;
use conforma_workflow::{
    build_create_request, edit_request_from, reopen_requirement, submit_edit, CreationPolicy,
    Selection,
};

/// Arguments for the `conforma project` subcommand.
#[derive(Args, Debug)]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub command: ProjectCommand,
}

/// Project subcommands.
#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// List all projects.
    List,

    /// Show a project's themes and requirements.
    Show {
        /// Project identifier.
        id: ProjectId,
    },

    /// Create a project from the catalog.
    Create {
        /// Project name (at least 3 characters).
        #[arg(long)]
        name: String,
        /// Requirement to include, as THEME_ID:REQUIREMENT_ID. Repeatable.
        #[arg(long = "select", value_parser = parse_selection)]
        select: Vec<(ThemeId, RequirementId)>,
        /// Refuse to create a project with no requirement selected.
        #[arg(long)]
        strict: bool,
    },

    /// Rename a project.
    Rename {
        /// Project identifier.
        id: ProjectId,
        /// New name.
        name: String,
    },

    /// Rewrite a project in one bulk edit.
    Edit {
        /// Project identifier.
        id: ProjectId,
        /// New name.
        #[arg(long)]
        name: Option<String>,
        /// Requirement to mark pending and clear of evidence. Repeatable.
        #[arg(long = "reopen")]
        reopen: Vec<RequirementId>,
    },

    /// Delete a project.
    Delete {
        /// Project identifier.
        id: ProjectId,
    },

    /// Link a catalog theme to a project.
    LinkTheme {
        /// Project identifier.
        id: ProjectId,
        /// Catalog theme identifier.
        theme: ThemeId,
    },
}

/// Parse `THEME_ID:REQUIREMENT_ID`.
pub fn parse_selection(raw: &str) -> Result<(ThemeId, RequirementId), String> {
    let (theme, requirement) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected THEME_ID:REQUIREMENT_ID, got \"{raw}\""))?;
    let theme = ThemeId::new(theme.trim()).map_err(|e| e.to_string())?;
    let requirement = RequirementId::new(requirement.trim()).map_err(|e| e.to_string())?;
    Ok((theme, requirement))
}

/// Execute the project subcommand.
pub async fn run_project(args: &ProjectArgs, client: &ConformaClient) -> Result<u8> {
    match &args.command {
        ProjectCommand::List => cmd_list(client).await,
        ProjectCommand::Show { id } => {
            let project = crate::fetch_project(client, id).await?;
            print!("{}", project_tree(&project));
            Ok(0)
        }
        ProjectCommand::Create {
            name,
            select,
            strict,
        } => cmd_create(client, name, select, *strict).await,
        ProjectCommand::Rename { id, name } => {
            let req = UpdateProjectRequest {
                nome: Some(name.trim().to_string()),
            };
            let project = client.projects().update(id, &req).await?;
            println!("Projeto {} renomeado para \"{}\"", project.id, project.nome);
            Ok(0)
        }
        ProjectCommand::Edit { id, name, reopen } => {
            cmd_edit(client, id, name.as_deref(), reopen).await
        }
        ProjectCommand::Delete { id } => {
            client.projects().delete(id).await?;
            println!("Projeto {id} excluído");
            Ok(0)
        }
        ProjectCommand::LinkTheme { id, theme } => {
            let project = client.projects().link_theme(id, theme).await?;
            println!("Tema {theme} vinculado ao projeto {}", project.id);
            Ok(0)
        }
    }
}

async fn cmd_list(client: &ConformaClient) -> Result<u8> {
    let projects = client.projects().list().await?;
    if projects.is_empty() {
        println!("Nenhum projeto cadastrado");
        return Ok(0);
    }
    for project in &projects {
        let overall = compute_overall_stats(project);
        println!(
            "{:>6}  {:>3}%  {}",
            project.id.as_str(),
            overall.porcentagem,
            project.nome
        );
    }
    Ok(0)
}

async fn cmd_create(
    client: &ConformaClient,
    name: &str,
    select: &[(ThemeId, RequirementId)],
    strict: bool,
) -> Result<u8> {
    let catalog = load_catalog(client).await?;

    let mut selection = Selection::new();
    for (theme, requirement) in select {
        let known = catalog
            .iter()
            .find(|t| &t.id == theme)
            .is_some_and(|t| t.requisitos.iter().any(|r| &r.id == requirement));
        if !known && catalog.iter().any(|t| &t.id == theme) {
            bail!("requirement {requirement} does not belong to theme {theme}");
        }
        selection.include(theme.clone(), requirement.clone());
    }

    let policy = if strict {
        CreationPolicy::RequireSelection
    } else {
        CreationPolicy::Standard
    };
    let request = build_create_request(name, &catalog, &selection, policy)?;
    let project = client.projects().create(&request).await?;
    println!(
        "Projeto {} criado: {} temas, {} requisitos",
        project.id,
        project.temas.len(),
        project.requirement_count()
    );
    Ok(0)
}

/// Fetch the project, apply the changes to a bulk edit of it and send it.
pub async fn cmd_edit(
    client: &ConformaClient,
    id: &ProjectId,
    name: Option<&str>,
    reopen: &[RequirementId],
) -> Result<u8> {
    let project = crate::fetch_project(client, id).await?;
    let mut req = edit_request_from(&project);
    if let Some(name) = name {
        req.nome = name.trim().to_string();
    }
    for requirement in reopen {
        if !reopen_requirement(&mut req, &project, requirement) {
            bail!("project {id} has no requirement {requirement}");
        }
    }
    let updated = submit_edit(client, id, &req).await?;
    println!(
        "Projeto {} atualizado: {} ({}/{} concluídos)",
        updated.id,
        updated.nome,
        updated.concluded_count(),
        updated.requirement_count()
    );
    Ok(0)
}

/// Catalog themes with their requirement definitions filled in.
async fn load_catalog(client: &ConformaClient) -> Result<Vec<ThemeDefinition>> {
    let mut themes = client.themes().list().await?;
    for theme in themes.iter_mut().filter(|t| t.requisitos.is_empty()) {
        theme.requisitos = client.requirements().by_theme(&theme.id).await?;
    }
    Ok(themes)
}

/// Themes and requirements with a status marker per requirement.
pub fn project_tree(project: &Project) -> String {
    let mut out = format!("{} ({})\n", project.nome, project.id);
    for (i, theme) in project.temas.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} [{}] ({}/{})\n",
            i + 1,
            theme.nome,
            theme.id,
            theme.concluded_count(),
            theme.requirement_count()
        ));
        for req in &theme.requisitos {
            let mark = if req.is_concluded() { "[x]" } else { "[ ]" };
            out.push_str(&format!("   {mark} {} [{}]\n", req.nome, req.id));
            if req.has_evidence() {
                out.push_str(&format!("       Evidência: {}\n", req.evidencia.trim()));
            }
            if let Some(date) = req.data_validade {
                out.push_str(&format!("       Validade: {}\n", date.format("%d/%m/%Y")));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_parses_pairs() {
        let (t, r) = parse_selection("1:11").unwrap();
        assert_eq!(t.as_str(), "1");
        assert_eq!(r.as_str(), "11");
        assert!(parse_selection("1-11").is_err());
        assert!(parse_selection(":11").is_err());
    }

    #[test]
    fn tree_marks_status_and_evidence() {
        let project: Project = serde_json::from_value(serde_json::json!({
            "id": "7",
            "nome": "Fazenda Boa Vista",
            "temas": [{
                "id": "1",
                "nome": "Recursos Hídricos",
                "requisitos": [
                    {
                        "id": "11",
                        "nome": "Outorga de uso da água",
                        "status": "concluido",
                        "evidencia": "Portaria 123/2025",
                        "dataValidade": "2026-12-31"
                    },
                    { "id": "12", "nome": "Monitoramento de efluentes", "status": "pendente" }
                ]
            }]
        }))
        .unwrap();

        let tree = project_tree(&project);
        assert!(tree.contains("1. Recursos Hídricos [1] (1/2)"));
        assert!(tree.contains("[x] Outorga de uso da água [11]"));
        assert!(tree.contains("Evidência: Portaria 123/2025"));
        assert!(tree.contains("Validade: 31/12/2026"));
        assert!(tree.contains("[ ] Monitoramento de efluentes [12]"));
    }
}
