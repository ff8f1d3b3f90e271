//! Typed client for the project endpoints.
//!
//! ## Paths (relative to the base URL)
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `projetos` | List projects |
//! | GET    | `projetos/{id}` | Get by ID |
//! | POST   | `projetos` | Create project |
//! | PUT    | `projetos/{id}` | Rename project |
//! | DELETE | `projetos/{id}` | Delete project |
//! | POST   | `projetos/{id}/temas` | Link a catalog theme |
//! | POST   | `projetos/{id}/temas/{temaId}/requisitos` | Add requirement |
//! | PUT    | `projetos/{id}/temas/{temaId}/requisitos/{requisitoId}` | Update requirement |
//! | DELETE | `projetos/{id}/temas/{temaId}/requisitos/{requisitoId}` | Remove requirement |
//! | POST   | `projetos/{id}/temas/{temaId}/requisitos/{requisitoId}/evidencias` | Record evidence (multipart) |
//! | PUT    | `projetos/{id}/editar-completo` | Replace the whole project |
//!
//! Every mutating endpoint answers with the full updated project.

use chrono::NaiveDate;
use reqwest::multipart::{Form, Part};
use serde::Serialize;

use conforma_core::{
    Attachment, LawId, Project, ProjectId, RequirementId, RequirementStatus, ThemeId,
};

use crate::error::ApiError;
use crate::http;

// -- Request types ------------------------------------------------------------

/// Request to create a project with its selected requirements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateProjectRequest {
    pub nome: String,
    pub temas: Vec<ThemeDraft>,
}

/// A catalog theme copied into a new project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeDraft {
    pub id: ThemeId,
    pub nome: String,
    pub requisitos: Vec<RequirementDraft>,
}

/// A catalog requirement copied into a new project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementDraft {
    pub id: RequirementId,
    pub nome: String,
    pub status: RequirementStatus,
    pub evidencia: String,
    pub anexo: Vec<Attachment>,
    pub leis_ids: Vec<LawId>,
}

/// Request to rename a project.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateProjectRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
}

/// Request to add a requirement directly to a project theme.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRequirementRequest {
    pub nome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RequirementStatus>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub leis_ids: Vec<LawId>,
}

/// Partial update of a project requirement.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RequirementStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leis_ids: Option<Vec<LawId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_validade: Option<NaiveDate>,
}

/// A file to upload alongside evidence or a law.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Guess a MIME type from the file extension.
    pub fn mime_type(&self) -> &'static str {
        let ext = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => "application/pdf",
            "doc" => "application/msword",
            "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            _ => "application/octet-stream",
        }
    }

    pub(crate) fn into_part(self, endpoint: &str) -> Result<Part, ApiError> {
        let mime = self.mime_type();
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(mime)
            .map_err(|e| ApiError::Http {
                endpoint: endpoint.to_string(),
                source: e,
            })
    }
}

/// Evidence submitted for one requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceUpload {
    /// Evidence text (`evidencia` form field).
    pub evidencia: String,
    /// Validity date (`data` form field).
    pub data: Option<NaiveDate>,
    /// Files (`anexo` form fields).
    pub anexos: Vec<FileUpload>,
}

/// Bulk replacement of a project's name, themes and requirement rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditProjectRequest {
    pub nome: String,
    pub temas: Vec<EditThemeRow>,
}

/// One theme in a bulk edit, identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditThemeRow {
    pub tema: String,
    pub requisitos: Vec<EditRequirementRow>,
}

/// One requirement in a bulk edit, identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequirementRow {
    pub requisito: String,
    pub status: RequirementStatus,
    pub leis: Vec<LawId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidencia: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_evidencia: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anexos: Option<Vec<String>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LinkThemeBody<'a> {
    tema_id: &'a ThemeId,
}

// -- Client -------------------------------------------------------------------

/// Client for the project endpoints.
#[derive(Debug, Clone)]
pub struct ProjectClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl ProjectClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    fn requirement_url(&self, project: &ProjectId, theme: &ThemeId, requirement: &RequirementId) -> String {
        format!(
            "{}projetos/{project}/temas/{theme}/requisitos/{requirement}",
            self.base_url
        )
    }

    /// List all projects.
    ///
    /// Calls `GET {base_url}projetos`.
    pub async fn list(&self) -> Result<Vec<Project>, ApiError> {
        let url = format!("{}projetos", self.base_url);
        http::send_json("GET /projetos", self.http.get(&url)).await
    }

    /// Get a project by ID, or `None` if it does not exist.
    ///
    /// Calls `GET {base_url}projetos/{id}`.
    pub async fn get(&self, id: &ProjectId) -> Result<Option<Project>, ApiError> {
        let endpoint = format!("GET /projetos/{id}");
        let url = format!("{}projetos/{id}", self.base_url);
        http::send_json_optional(&endpoint, self.http.get(&url)).await
    }

    /// Create a project.
    ///
    /// Calls `POST {base_url}projetos`.
    pub async fn create(&self, req: &CreateProjectRequest) -> Result<Project, ApiError> {
        let url = format!("{}projetos", self.base_url);
        let project: Project = http::send_json("POST /projetos", self.http.post(&url).json(req)).await?;
        tracing::info!(project_id = %project.id, themes = project.temas.len(), "project created");
        Ok(project)
    }

    /// Rename a project.
    ///
    /// Calls `PUT {base_url}projetos/{id}`.
    pub async fn update(&self, id: &ProjectId, req: &UpdateProjectRequest) -> Result<Project, ApiError> {
        let endpoint = format!("PUT /projetos/{id}");
        let url = format!("{}projetos/{id}", self.base_url);
        http::send_json(&endpoint, self.http.put(&url).json(req)).await
    }

    /// Delete a project.
    ///
    /// Calls `DELETE {base_url}projetos/{id}`.
    pub async fn delete(&self, id: &ProjectId) -> Result<(), ApiError> {
        let endpoint = format!("DELETE /projetos/{id}");
        let url = format!("{}projetos/{id}", self.base_url);
        http::send(&endpoint, self.http.delete(&url)).await?;
        tracing::info!(project_id = %id, "project deleted");
        Ok(())
    }

    /// Link a catalog theme to a project.
    ///
    /// Calls `POST {base_url}projetos/{id}/temas`.
    pub async fn link_theme(&self, id: &ProjectId, theme: &ThemeId) -> Result<Project, ApiError> {
        let endpoint = format!("POST /projetos/{id}/temas");
        let url = format!("{}projetos/{id}/temas", self.base_url);
        let body = LinkThemeBody { tema_id: theme };
        http::send_json(&endpoint, self.http.post(&url).json(&body)).await
    }

    /// Add a requirement to a project theme.
    ///
    /// Calls `POST {base_url}projetos/{id}/temas/{temaId}/requisitos`.
    pub async fn add_requirement(
        &self,
        id: &ProjectId,
        theme: &ThemeId,
        req: &NewRequirementRequest,
    ) -> Result<Project, ApiError> {
        let endpoint = format!("POST /projetos/{id}/temas/{theme}/requisitos");
        let url = format!("{}projetos/{id}/temas/{theme}/requisitos", self.base_url);
        http::send_json(&endpoint, self.http.post(&url).json(req)).await
    }

    /// Update status, law links or validity date of a project requirement.
    ///
    /// Calls `PUT {base_url}projetos/{id}/temas/{temaId}/requisitos/{requisitoId}`.
    pub async fn update_requirement(
        &self,
        id: &ProjectId,
        theme: &ThemeId,
        requirement: &RequirementId,
        update: &RequirementUpdate,
    ) -> Result<Project, ApiError> {
        let endpoint = format!("PUT /projetos/{id}/temas/{theme}/requisitos/{requirement}");
        let url = self.requirement_url(id, theme, requirement);
        http::send_json(&endpoint, self.http.put(&url).json(update)).await
    }

    /// Set the status of a project requirement.
    ///
    /// Same endpoint as [`update_requirement`](Self::update_requirement) with
    /// only the `status` field.
    pub async fn set_requirement_status(
        &self,
        id: &ProjectId,
        theme: &ThemeId,
        requirement: &RequirementId,
        status: RequirementStatus,
    ) -> Result<Project, ApiError> {
        let update = RequirementUpdate {
            status: Some(status),
            ..RequirementUpdate::default()
        };
        self.update_requirement(id, theme, requirement, &update).await
    }

    /// Remove a requirement from a project theme.
    ///
    /// Calls `DELETE {base_url}projetos/{id}/temas/{temaId}/requisitos/{requisitoId}`.
    pub async fn remove_requirement(
        &self,
        id: &ProjectId,
        theme: &ThemeId,
        requirement: &RequirementId,
    ) -> Result<Project, ApiError> {
        let endpoint = format!("DELETE /projetos/{id}/temas/{theme}/requisitos/{requirement}");
        let url = self.requirement_url(id, theme, requirement);
        http::send_json(&endpoint, self.http.delete(&url)).await
    }

    /// Record evidence for a project requirement.
    ///
    /// Calls `POST {base_url}projetos/{id}/temas/{temaId}/requisitos/{requisitoId}/evidencias`
    /// with a multipart body: `evidencia`, optional `data` (`YYYY-MM-DD`)
    /// and one `anexo` part per file.
    pub async fn record_evidence(
        &self,
        id: &ProjectId,
        theme: &ThemeId,
        requirement: &RequirementId,
        upload: EvidenceUpload,
    ) -> Result<Project, ApiError> {
        let endpoint =
            format!("POST /projetos/{id}/temas/{theme}/requisitos/{requirement}/evidencias");
        let url = format!("{}/evidencias", self.requirement_url(id, theme, requirement));

        let mut form = Form::new().text("evidencia", upload.evidencia);
        if let Some(date) = upload.data {
            form = form.text("data", date.format("%Y-%m-%d").to_string());
        }
        for file in upload.anexos {
            form = form.part("anexo", file.into_part(&endpoint)?);
        }

        http::send_json(&endpoint, self.http.post(&url).multipart(form)).await
    }

    /// Replace a project's name, themes and requirement rows in one call.
    ///
    /// Calls `PUT {base_url}projetos/{id}/editar-completo`.
    pub async fn edit_complete(&self, id: &ProjectId, req: &EditProjectRequest) -> Result<Project, ApiError> {
        let endpoint = format!("PUT /projetos/{id}/editar-completo");
        let url = format!("{}projetos/{id}/editar-completo", self.base_url);
        http::send_json(&endpoint, self.http.put(&url).json(req)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_type_from_extension() {
        let file = |name: &str| FileUpload {
            file_name: name.to_string(),
            bytes: vec![],
        };
        assert_eq!(file("laudo.PDF").mime_type(), "application/pdf");
        assert_eq!(file("foto.jpeg").mime_type(), "image/jpeg");
        assert_eq!(file("planilha.xlsx").mime_type(), "application/octet-stream");
        assert_eq!(file("sem-extensao").mime_type(), "application/octet-stream");
    }

    #[test]
    fn requirement_update_omits_absent_fields() {
        let update = RequirementUpdate {
            status: Some(RequirementStatus::Concluido),
            ..RequirementUpdate::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({ "status": "concluido" })
        );
    }

    #[test]
    fn requirement_draft_uses_camel_case() {
        let draft = RequirementDraft {
            id: RequirementId::new("11").unwrap(),
            nome: "Plano de gerenciamento de resíduos".into(),
            status: RequirementStatus::Pendente,
            evidencia: String::new(),
            anexo: vec![],
            leis_ids: vec![LawId::new("3").unwrap()],
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["leisIds"], serde_json::json!(["3"]));
        assert_eq!(json["status"], "pendente");
        assert_eq!(json["anexo"], serde_json::json!([]));
    }
}
