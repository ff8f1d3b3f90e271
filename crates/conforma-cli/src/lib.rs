//! # conforma-cli -- Command-line client for Conforma
//!
//! Provides the `conforma` command-line interface over the backend.
//!
//! ## Subcommands
//!
//! - `conforma project` -- List, show, create, rename and delete projects.
//! - `conforma stats` -- Per-theme and overall completion of a project.
//! - `conforma evidence` -- Record evidence and conclude a requirement.
//! - `conforma export` -- Write the PDF summary of a project.
//! - `conforma catalog` -- Laws, themes and requirements.
//!
//! ```bash
//! conforma project create --name "Fazenda Boa Vista" --select 1:11 --select 1:12
//! conforma evidence 7 1 11 --text "Portaria 123/2025" --validity 2026-12-31 --attach outorga.pdf
//! conforma stats 7
//! conforma export 7 --out ./relatorios
//! ```

pub mod catalog;
pub mod evidence;
pub mod export;
pub mod project;
pub mod stats;

use anyhow::{Context, Result};

use conforma_client::{ApiConfig, ConformaClient};
use conforma_core::{Project, ProjectId};

/// Build a client from the environment, with command-line overrides.
pub fn connect(api_url: Option<&str>, timeout_secs: Option<u64>) -> Result<ConformaClient> {
    let mut config = ApiConfig::from_env().context("reading backend configuration")?;
    if let Some(url) = api_url {
        config = ApiConfig::new(url, config.timeout_secs).context("parsing --api-url")?;
    }
    if let Some(secs) = timeout_secs {
        config.timeout_secs = secs;
    }
    tracing::debug!(base_url = %config.base_url, "connecting to backend");
    Ok(ConformaClient::new(config)?)
}

/// Fetch a project, failing when it does not exist.
pub async fn fetch_project(client: &ConformaClient, id: &ProjectId) -> Result<Project> {
    client
        .projects()
        .get(id)
        .await?
        .with_context(|| format!("project {id} not found"))
}
