//! # Evidence Submission
//!
//! Recording evidence concludes a requirement. The submission is checked
//! locally first; a rejected submission sends nothing. A valid one runs
//! three backend calls in order, stopping at the first failure:
//!
//! 1. persist the evidence text, validity date and attachments
//! 2. set the requirement status to `concluido`
//! 3. re-fetch the whole project
//!
//! The re-fetched project is returned. [`ProjectView`] swaps it in as the
//! new aggregate and keeps the previous one when any step fails.

use chrono::NaiveDate;

use conforma_client::{EvidenceUpload, FileUpload};
use conforma_core::{Project, ProjectId, RequirementId, RequirementStatus, ThemeId, ValidationError};
use conforma_score::{compute_overall_stats, compute_project_stats, OverallStats, ThemeStats};

use crate::backend::ProjectBackend;
use crate::error::WorkflowError;
use crate::notify::Notifier;

/// Maximum number of files accepted in one submission.
pub const MAX_ATTACHMENTS_PER_SUBMISSION: usize = 1;

/// The requirement evidence is recorded for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceTarget {
    pub project: ProjectId,
    pub theme: ThemeId,
    pub requirement: RequirementId,
}

/// Evidence entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EvidenceSubmission {
    pub text: String,
    pub validity: Option<NaiveDate>,
    pub attachments: Vec<FileUpload>,
}

impl EvidenceSubmission {
    /// Check the submission without sending it.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.text.trim().is_empty() {
            return Err(ValidationError::EmptyEvidence);
        }
        if self.attachments.len() > MAX_ATTACHMENTS_PER_SUBMISSION {
            return Err(ValidationError::TooManyAttachments {
                given: self.attachments.len(),
                max: MAX_ATTACHMENTS_PER_SUBMISSION,
            });
        }
        Ok(())
    }

    fn into_upload(self) -> EvidenceUpload {
        EvidenceUpload {
            evidencia: self.text.trim().to_string(),
            data: self.validity,
            anexos: self.attachments,
        }
    }
}

/// Record evidence for a requirement and return the re-fetched project.
///
/// The notifier receives exactly one message: a success message, or an
/// error message carrying the failure.
pub async fn submit_evidence<B, N>(
    backend: &B,
    notifier: &N,
    target: &EvidenceTarget,
    submission: EvidenceSubmission,
) -> Result<Project, WorkflowError>
where
    B: ProjectBackend,
    N: Notifier + ?Sized,
{
    match run_submission(backend, target, submission).await {
        Ok(project) => {
            notifier.success("Evidência registrada com sucesso");
            Ok(project)
        }
        Err(e) => {
            notifier.error(&format!("Erro ao registrar evidência: {e}"));
            Err(e)
        }
    }
}

async fn run_submission<B: ProjectBackend>(
    backend: &B,
    target: &EvidenceTarget,
    submission: EvidenceSubmission,
) -> Result<Project, WorkflowError> {
    submission.validate()?;
    let EvidenceTarget {
        project,
        theme,
        requirement,
    } = target;

    backend
        .record_evidence(project, theme, requirement, submission.into_upload())
        .await?;
    backend
        .set_status(project, theme, requirement, RequirementStatus::Concluido)
        .await?;
    let refreshed = backend
        .fetch_project(project)
        .await?
        .ok_or_else(|| WorkflowError::ProjectVanished(project.clone()))?;

    tracing::info!(
        project_id = %project,
        theme_id = %theme,
        requirement_id = %requirement,
        "evidence recorded"
    );
    Ok(refreshed)
}

/// The client-side copy of one project.
///
/// Stats are always computed from the current aggregate. The aggregate is
/// only ever replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectView {
    project: Project,
}

impl ProjectView {
    pub fn new(project: Project) -> Self {
        Self { project }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn into_project(self) -> Project {
        self.project
    }

    /// Per-theme completion of the current aggregate.
    pub fn theme_stats(&self) -> Vec<ThemeStats> {
        compute_project_stats(&self.project)
    }

    /// Overall completion of the current aggregate.
    pub fn overall_stats(&self) -> OverallStats {
        compute_overall_stats(&self.project)
    }

    /// Submit evidence for a requirement of this project.
    ///
    /// On success the re-fetched project replaces the current one. On
    /// failure the current one is kept unchanged.
    pub async fn submit_evidence<B, N>(
        &mut self,
        backend: &B,
        notifier: &N,
        theme: ThemeId,
        requirement: RequirementId,
        submission: EvidenceSubmission,
    ) -> Result<&Project, WorkflowError>
    where
        B: ProjectBackend,
        N: Notifier + ?Sized,
    {
        let target = EvidenceTarget {
            project: self.project.id.clone(),
            theme,
            requirement,
        };
        self.project = submit_evidence(backend, notifier, &target, submission).await?;
        Ok(&self.project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> FileUpload {
        FileUpload {
            file_name: name.to_string(),
            bytes: vec![1, 2, 3],
        }
    }

    #[test]
    fn blank_text_is_rejected() {
        let submission = EvidenceSubmission {
            text: " \t\n".into(),
            ..EvidenceSubmission::default()
        };
        assert_eq!(submission.validate(), Err(ValidationError::EmptyEvidence));
    }

    #[test]
    fn one_attachment_is_accepted() {
        let submission = EvidenceSubmission {
            text: "Licença LO 456/2025".into(),
            validity: NaiveDate::from_ymd_opt(2027, 1, 31),
            attachments: vec![file("lo.pdf")],
        };
        assert!(submission.validate().is_ok());
    }

    #[test]
    fn two_attachments_are_rejected() {
        let submission = EvidenceSubmission {
            text: "Licença LO 456/2025".into(),
            validity: None,
            attachments: vec![file("a.pdf"), file("b.pdf")],
        };
        assert_eq!(
            submission.validate(),
            Err(ValidationError::TooManyAttachments { given: 2, max: 1 })
        );
    }

    #[test]
    fn upload_carries_trimmed_text() {
        let submission = EvidenceSubmission {
            text: "  Protocolo 789  ".into(),
            validity: None,
            attachments: vec![],
        };
        assert_eq!(submission.into_upload().evidencia, "Protocolo 789");
    }
}
