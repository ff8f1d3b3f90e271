//! Typed client for the catalog theme endpoints.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `temas` | List themes with their requirements |
//! | GET    | `temas/{id}` | Get by ID |
//! | GET    | `temas/lei/{leiId}` | Themes linked to a law |
//! | GET    | `temas/sem-lei` | Themes linked to no law |
//! | POST   | `temas` | Create theme |
//! | PUT    | `temas/{id}` | Update theme |
//! | DELETE | `temas/{id}` | Delete theme |

use serde::Serialize;

use conforma_core::{LawId, ThemeDefinition, ThemeId, ValidationError};

use crate::error::ApiError;
use crate::http;

/// Request to create or update a catalog theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeRequest {
    pub nome: String,
    pub leis_ids: Vec<LawId>,
}

impl ThemeRequest {
    /// Build a request, rejecting a blank name.
    pub fn new(nome: impl Into<String>, leis_ids: Vec<LawId>) -> Result<Self, ValidationError> {
        let nome = nome.into().trim().to_string();
        if nome.is_empty() {
            return Err(ValidationError::MissingName { field: "theme name" });
        }
        Ok(Self { nome, leis_ids })
    }
}

/// Client for the catalog theme endpoints.
#[derive(Debug, Clone)]
pub struct ThemeClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl ThemeClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// List every catalog theme.
    ///
    /// Calls `GET {base_url}temas`.
    pub async fn list(&self) -> Result<Vec<ThemeDefinition>, ApiError> {
        let url = format!("{}temas", self.base_url);
        http::send_json("GET /temas", self.http.get(&url)).await
    }

    /// Get a theme by ID, or `None` if it does not exist.
    pub async fn get(&self, id: &ThemeId) -> Result<Option<ThemeDefinition>, ApiError> {
        let endpoint = format!("GET /temas/{id}");
        let url = format!("{}temas/{id}", self.base_url);
        http::send_json_optional(&endpoint, self.http.get(&url)).await
    }

    /// Themes linked to the given law.
    pub async fn by_law(&self, law: &LawId) -> Result<Vec<ThemeDefinition>, ApiError> {
        let endpoint = format!("GET /temas/lei/{law}");
        let url = format!("{}temas/lei/{law}", self.base_url);
        http::send_json(&endpoint, self.http.get(&url)).await
    }

    /// Themes not linked to any law.
    pub async fn without_law(&self) -> Result<Vec<ThemeDefinition>, ApiError> {
        let url = format!("{}temas/sem-lei", self.base_url);
        http::send_json("GET /temas/sem-lei", self.http.get(&url)).await
    }

    /// Create a theme.
    pub async fn create(&self, req: &ThemeRequest) -> Result<ThemeDefinition, ApiError> {
        let url = format!("{}temas", self.base_url);
        let theme: ThemeDefinition =
            http::send_json("POST /temas", self.http.post(&url).json(req)).await?;
        tracing::info!(theme_id = %theme.id, "theme created");
        Ok(theme)
    }

    /// Update a theme's name and law links.
    pub async fn update(&self, id: &ThemeId, req: &ThemeRequest) -> Result<ThemeDefinition, ApiError> {
        let endpoint = format!("PUT /temas/{id}");
        let url = format!("{}temas/{id}", self.base_url);
        http::send_json(&endpoint, self.http.put(&url).json(req)).await
    }

    /// Delete a theme.
    pub async fn delete(&self, id: &ThemeId) -> Result<(), ApiError> {
        let endpoint = format!("DELETE /temas/{id}");
        let url = format!("{}temas/{id}", self.base_url);
        http::send(&endpoint, self.http.delete(&url)).await?;
        Ok(())
    }
}
