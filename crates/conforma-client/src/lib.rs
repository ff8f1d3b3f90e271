//! # conforma-client -- Typed Rust client for the Conforma backend
//!
//! Provides typed async access to the backend REST service:
//! - **Projects** and their per-requirement evidence under `projetos`
//! - **Themes** of the catalog under `temas`
//! - **Requirements** of the catalog under `requisitos`
//! - **Laws** under `leis`, created and updated through multipart forms
//!
//! ## Architecture
//!
//! All backend traffic goes through this crate. Each resource has its own
//! sub-client sharing one `reqwest::Client`, so the configured timeout
//! applies to every call. Calls are sent once: a failure surfaces as an
//! [`ApiError`] and the caller decides what to do with it.
//!
//! ## Path convention
//!
//! Resource paths are appended to the configured base URL, which always
//! ends in `/`: `http://localhost:3000/api/` + `projetos/7`.

pub mod config;
pub mod error;
pub(crate) mod http;
pub mod laws;
pub mod projects;
pub mod requirements;
pub mod themes;

pub use config::ApiConfig;
pub use error::ApiError;
pub use projects::{EvidenceUpload, FileUpload};

use std::time::Duration;

/// Top-level backend client. Holds one sub-client per resource.
#[derive(Debug, Clone)]
pub struct ConformaClient {
    projects: projects::ProjectClient,
    themes: themes::ThemeClient,
    requirements: requirements::RequirementClient,
    laws: laws::LawClient,
}

impl ConformaClient {
    /// Create a new client from configuration.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        tracing::debug!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "backend client ready");

        Ok(Self {
            projects: projects::ProjectClient::new(http.clone(), config.base_url.clone()),
            themes: themes::ThemeClient::new(http.clone(), config.base_url.clone()),
            requirements: requirements::RequirementClient::new(http.clone(), config.base_url.clone()),
            laws: laws::LawClient::new(http, config.base_url),
        })
    }

    /// Access the projects client.
    pub fn projects(&self) -> &projects::ProjectClient {
        &self.projects
    }

    /// Access the catalog themes client.
    pub fn themes(&self) -> &themes::ThemeClient {
        &self.themes
    }

    /// Access the catalog requirements client.
    pub fn requirements(&self) -> &requirements::RequirementClient {
        &self.requirements
    }

    /// Access the laws client.
    pub fn laws(&self) -> &laws::LawClient {
        &self.laws
    }
}
