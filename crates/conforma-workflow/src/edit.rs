//! Bulk project edits.
//!
//! The bulk edit endpoint replaces a project's name and every requirement
//! row in one call, identifying themes and requirements by name. Rows are
//! checked locally: a concluded row needs evidence and a pending row must
//! not carry any. [`submit_edit`] refuses to send a request that fails
//! those checks.

use conforma_client::projects::{EditProjectRequest, EditRequirementRow, EditThemeRow};
use conforma_core::{
    Project, ProjectId, Requirement, RequirementId, RequirementStatus, ValidationError,
};

use crate::backend::ProjectBackend;
use crate::builder::MIN_PROJECT_NAME_LEN;
use crate::error::WorkflowError;

/// Build a bulk edit that reproduces `project` as it is.
pub fn edit_request_from(project: &Project) -> EditProjectRequest {
    EditProjectRequest {
        nome: project.nome.clone(),
        temas: project
            .temas
            .iter()
            .map(|theme| EditThemeRow {
                tema: theme.nome.clone(),
                requisitos: theme.requisitos.iter().map(row_from).collect(),
            })
            .collect(),
    }
}

fn row_from(req: &Requirement) -> EditRequirementRow {
    let evidencia = req.has_evidence().then(|| req.evidencia.clone());
    let anexos = (!req.anexo.is_empty())
        .then(|| req.anexo.iter().map(|a| a.caminho.clone()).collect());
    EditRequirementRow {
        requisito: req.nome.clone(),
        status: req.status,
        leis: req.leis_ids.clone(),
        evidencia,
        data_evidencia: req.data_validade,
        anexos,
    }
}

/// Check a bulk edit before sending it.
///
/// # Errors
///
/// - [`ValidationError::ProjectNameTooShort`] for a short project name.
/// - [`ValidationError::InconsistentStatus`] for the first row whose status
///   disagrees with its evidence.
pub fn validate_edit(req: &EditProjectRequest) -> Result<(), ValidationError> {
    let len = req.nome.trim().chars().count();
    if len < MIN_PROJECT_NAME_LEN {
        return Err(ValidationError::ProjectNameTooShort {
            len,
            min: MIN_PROJECT_NAME_LEN,
        });
    }
    for row in req.temas.iter().flat_map(|t| t.requisitos.iter()) {
        let evidence = row.evidencia.as_deref().unwrap_or_default();
        if row.status != RequirementStatus::from_evidence(evidence) {
            return Err(ValidationError::InconsistentStatus {
                requirement: row.requisito.clone(),
                status: row.status.to_string(),
                evidence: if evidence.trim().is_empty() { "empty" } else { "present" },
            });
        }
    }
    Ok(())
}

/// Clear the evidence of one requirement and mark it pending.
///
/// `req` must have been built from `project` with [`edit_request_from`], so
/// rows line up with the project's themes and requirements. Returns `false`
/// when the project has no requirement with that id.
pub fn reopen_requirement(
    req: &mut EditProjectRequest,
    project: &Project,
    requirement: &RequirementId,
) -> bool {
    let position = project.temas.iter().enumerate().find_map(|(t, theme)| {
        theme
            .requisitos
            .iter()
            .position(|r| &r.id == requirement)
            .map(|r| (t, r))
    });
    let Some(row) = position
        .and_then(|(t, r)| req.temas.get_mut(t).and_then(|theme| theme.requisitos.get_mut(r)))
    else {
        return false;
    };
    row.status = RequirementStatus::Pendente;
    row.evidencia = None;
    row.data_evidencia = None;
    row.anexos = None;
    true
}

/// Validate a bulk edit and send it.
///
/// Nothing reaches the backend when [`validate_edit`] rejects the request.
pub async fn submit_edit<B: ProjectBackend>(
    backend: &B,
    project: &ProjectId,
    req: &EditProjectRequest,
) -> Result<Project, WorkflowError> {
    validate_edit(req)?;
    let updated = backend.apply_edit(project, req).await?;
    tracing::info!(
        project_id = %project,
        requirements = updated.requirement_count(),
        "project edited"
    );
    Ok(updated)
}
