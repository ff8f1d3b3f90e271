//! The backend operations the evidence workflow depends on.
//!
//! [`ConformaClient`] is the live implementation. Tests substitute an
//! in-memory backend that counts calls.

use std::future::Future;

use conforma_client::projects::EditProjectRequest;
use conforma_client::{ApiError, ConformaClient, EvidenceUpload};
use conforma_core::{Project, ProjectId, RequirementId, RequirementStatus, ThemeId};

/// Backend calls made by the evidence and bulk edit workflows.
pub trait ProjectBackend: Send + Sync {
    /// Persist evidence text, validity date and attachments for a requirement.
    fn record_evidence(
        &self,
        project: &ProjectId,
        theme: &ThemeId,
        requirement: &RequirementId,
        upload: EvidenceUpload,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Set the status of a requirement.
    fn set_status(
        &self,
        project: &ProjectId,
        theme: &ThemeId,
        requirement: &RequirementId,
        status: RequirementStatus,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Fetch the full project, or `None` if it no longer exists.
    fn fetch_project(
        &self,
        project: &ProjectId,
    ) -> impl Future<Output = Result<Option<Project>, ApiError>> + Send;

    /// Replace the project's name and every requirement row.
    fn apply_edit(
        &self,
        project: &ProjectId,
        req: &EditProjectRequest,
    ) -> impl Future<Output = Result<Project, ApiError>> + Send;
}

impl ProjectBackend for ConformaClient {
    async fn record_evidence(
        &self,
        project: &ProjectId,
        theme: &ThemeId,
        requirement: &RequirementId,
        upload: EvidenceUpload,
    ) -> Result<(), ApiError> {
        self.projects()
            .record_evidence(project, theme, requirement, upload)
            .await
            .map(drop)
    }

    async fn set_status(
        &self,
        project: &ProjectId,
        theme: &ThemeId,
        requirement: &RequirementId,
        status: RequirementStatus,
    ) -> Result<(), ApiError> {
        self.projects()
            .set_requirement_status(project, theme, requirement, status)
            .await
            .map(drop)
    }

    async fn fetch_project(&self, project: &ProjectId) -> Result<Option<Project>, ApiError> {
        self.projects().get(project).await
    }

    async fn apply_edit(
        &self,
        project: &ProjectId,
        req: &EditProjectRequest,
    ) -> Result<Project, ApiError> {
        self.projects().edit_complete(project, req).await
    }
}
