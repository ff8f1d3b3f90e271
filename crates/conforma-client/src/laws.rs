//! Typed client for the law endpoints.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `leis` | List laws |
//! | GET    | `leis/{id}` | Get by ID |
//! | POST   | `leis` | Create law (multipart) |
//! | PUT    | `leis/{id}` | Update law (multipart) |
//! | DELETE | `leis/{id}` | Delete law |
//!
//! Create and update send a multipart form: `nome`, `link`, an optional
//! `documento` file part, and `temas` as a JSON array of theme ids.

use reqwest::multipart::Form;

use conforma_core::{Law, LawId, ThemeId, ValidationError};

use crate::error::ApiError;
use crate::http;
use crate::projects::FileUpload;

/// A law to create or the new state of an existing law.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LawForm {
    pub nome: String,
    pub link: Option<String>,
    pub documento: Option<FileUpload>,
    pub temas: Vec<ThemeId>,
}

impl LawForm {
    /// Check the form before it is sent.
    ///
    /// A name is always required. A new law also needs a document or a
    /// link; an update may keep the stored document.
    pub fn validate(&self, creating: bool) -> Result<(), ValidationError> {
        if self.nome.trim().is_empty() {
            return Err(ValidationError::MissingName { field: "law name" });
        }
        let has_link = self.link.as_deref().is_some_and(|l| !l.trim().is_empty());
        if creating && !has_link && self.documento.is_none() {
            return Err(ValidationError::MissingLawSource);
        }
        Ok(())
    }

    fn into_multipart(self, endpoint: &str) -> Result<Form, ApiError> {
        let temas: Vec<&str> = self.temas.iter().map(ThemeId::as_str).collect();
        let temas = serde_json::to_string(&temas).unwrap_or_else(|_| "[]".to_string());
        let mut form = Form::new()
            .text("nome", self.nome.trim().to_string())
            .text("link", self.link.unwrap_or_default())
            .text("temas", temas);
        if let Some(doc) = self.documento {
            form = form.part("documento", doc.into_part(endpoint)?);
        }
        Ok(form)
    }
}

/// Client for the law endpoints.
#[derive(Debug, Clone)]
pub struct LawClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl LawClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// List every law.
    pub async fn list(&self) -> Result<Vec<Law>, ApiError> {
        let url = format!("{}leis", self.base_url);
        http::send_json("GET /leis", self.http.get(&url)).await
    }

    /// Get a law by ID, or `None` if it does not exist.
    pub async fn get(&self, id: &LawId) -> Result<Option<Law>, ApiError> {
        let endpoint = format!("GET /leis/{id}");
        let url = format!("{}leis/{id}", self.base_url);
        http::send_json_optional(&endpoint, self.http.get(&url)).await
    }

    /// Create a law. Rejected locally without a name, or without both a
    /// document and a link.
    pub async fn create(&self, form: LawForm) -> Result<Law, ApiError> {
        form.validate(true)?;
        let endpoint = "POST /leis";
        let url = format!("{}leis", self.base_url);
        let body = form.into_multipart(endpoint)?;
        let law: Law = http::send_json(endpoint, self.http.post(&url).multipart(body)).await?;
        tracing::info!(law_id = %law.id, "law created");
        Ok(law)
    }

    /// Update a law.
    pub async fn update(&self, id: &LawId, form: LawForm) -> Result<Law, ApiError> {
        form.validate(false)?;
        let endpoint = format!("PUT /leis/{id}");
        let url = format!("{}leis/{id}", self.base_url);
        let body = form.into_multipart(&endpoint)?;
        http::send_json(&endpoint, self.http.put(&url).multipart(body)).await
    }

    /// Delete a law.
    pub async fn delete(&self, id: &LawId) -> Result<(), ApiError> {
        let endpoint = format!("DELETE /leis/{id}");
        let url = format!("{}leis/{id}", self.base_url);
        http::send(&endpoint, self.http.delete(&url)).await?;
        Ok(())
    }
}
