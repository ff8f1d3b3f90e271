//! Typed client for the catalog requirement endpoints.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `requisitos` | List requirements |
//! | GET    | `requisitos/{id}` | Get by ID |
//! | GET    | `requisitos/tema/{temaId}` | Requirements of a theme |
//! | POST   | `requisitos` | Create requirement |
//! | PUT    | `requisitos/{id}` | Update description |
//! | DELETE | `requisitos/{id}` | Delete requirement |

use serde::Serialize;

use conforma_core::{RequirementDefinition, RequirementId, ThemeId, ValidationError};

use crate::error::ApiError;
use crate::http;

/// Request to create a catalog requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRequirementDefinition {
    pub descricao: String,
    pub tema_id: ThemeId,
}

impl NewRequirementDefinition {
    /// Build a request, rejecting a blank description.
    pub fn new(descricao: impl Into<String>, tema_id: ThemeId) -> Result<Self, ValidationError> {
        let descricao = descricao.into().trim().to_string();
        if descricao.is_empty() {
            return Err(ValidationError::MissingName {
                field: "requirement description",
            });
        }
        Ok(Self { descricao, tema_id })
    }
}

#[derive(Serialize)]
struct DescriptionBody<'a> {
    descricao: &'a str,
}

/// Client for the catalog requirement endpoints.
#[derive(Debug, Clone)]
pub struct RequirementClient {
    http: reqwest::Client,
    base_url: url::Url,
}

impl RequirementClient {
    pub(crate) fn new(http: reqwest::Client, base_url: url::Url) -> Self {
        Self { http, base_url }
    }

    /// List every catalog requirement.
    pub async fn list(&self) -> Result<Vec<RequirementDefinition>, ApiError> {
        let url = format!("{}requisitos", self.base_url);
        http::send_json("GET /requisitos", self.http.get(&url)).await
    }

    /// Get a requirement by ID, or `None` if it does not exist.
    pub async fn get(&self, id: &RequirementId) -> Result<Option<RequirementDefinition>, ApiError> {
        let endpoint = format!("GET /requisitos/{id}");
        let url = format!("{}requisitos/{id}", self.base_url);
        http::send_json_optional(&endpoint, self.http.get(&url)).await
    }

    /// Requirements belonging to a theme.
    pub async fn by_theme(&self, theme: &ThemeId) -> Result<Vec<RequirementDefinition>, ApiError> {
        let endpoint = format!("GET /requisitos/tema/{theme}");
        let url = format!("{}requisitos/tema/{theme}", self.base_url);
        http::send_json(&endpoint, self.http.get(&url)).await
    }

    /// Create a requirement.
    pub async fn create(&self, req: &NewRequirementDefinition) -> Result<RequirementDefinition, ApiError> {
        let url = format!("{}requisitos", self.base_url);
        let created: RequirementDefinition =
            http::send_json("POST /requisitos", self.http.post(&url).json(req)).await?;
        tracing::info!(requirement_id = %created.id, theme_id = %created.tema_id, "requirement created");
        Ok(created)
    }

    /// Replace a requirement's description.
    pub async fn update(&self, id: &RequirementId, descricao: &str) -> Result<RequirementDefinition, ApiError> {
        let descricao = descricao.trim();
        if descricao.is_empty() {
            return Err(ValidationError::MissingName {
                field: "requirement description",
            }
            .into());
        }
        let endpoint = format!("PUT /requisitos/{id}");
        let url = format!("{}requisitos/{id}", self.base_url);
        http::send_json(&endpoint, self.http.put(&url).json(&DescriptionBody { descricao })).await
    }

    /// Delete a requirement.
    pub async fn delete(&self, id: &RequirementId) -> Result<(), ApiError> {
        let endpoint = format!("DELETE /requisitos/{id}");
        let url = format!("{}requisitos/{id}", self.base_url);
        http::send(&endpoint, self.http.delete(&url)).await?;
        Ok(())
    }
}
