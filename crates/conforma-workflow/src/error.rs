//! Workflow error types.

use conforma_client::ApiError;
use conforma_core::{ProjectId, ValidationError};

/// Errors from project workflows.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// Input rejected before any backend call.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A backend call failed; later steps were not attempted.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The project could not be found when re-fetched after an update.
    #[error("project {0} no longer exists")]
    ProjectVanished(ProjectId),
}

impl WorkflowError {
    /// Whether the failure happened before anything was sent.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Api(ApiError::Validation(_)))
    }
}
