//! # Validation Errors
//!
//! Blocking errors raised before any request reaches the backend: empty
//! required text, names that are too short, missing documents, status rows
//! that contradict their evidence. Each variant carries enough context for
//! the message shown to the user.

use thiserror::Error;

/// Validation failures for user-supplied input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A backend identifier was empty.
    #[error("invalid {kind} identifier: must be non-empty")]
    EmptyIdentifier {
        /// Which identifier kind was rejected (e.g. "project").
        kind: &'static str,
    },

    /// Evidence text was empty or whitespace only.
    #[error("evidence text is required")]
    EmptyEvidence,

    /// More attachments than a single submission accepts.
    #[error("too many attachments: {given} given, at most {max} allowed per submission")]
    TooManyAttachments {
        /// Number of attachments supplied.
        given: usize,
        /// Maximum accepted.
        max: usize,
    },

    /// Project name shorter than the minimum length.
    #[error("project name must have at least {min} characters (got {len})")]
    ProjectNameTooShort {
        /// Length of the trimmed name, in characters.
        len: usize,
        /// Minimum accepted length.
        min: usize,
    },

    /// The catalog has no themes to build a project from.
    #[error("no themes in the catalog; create themes before creating a project")]
    EmptyCatalog,

    /// The strict creation policy requires at least one selected requirement.
    #[error("select at least one requirement for the project")]
    NothingSelected,

    /// A requirement selection referenced a theme not in the catalog.
    #[error("unknown theme {0} in requirement selection")]
    UnknownTheme(String),

    /// A name field was empty.
    #[error("{field} is required")]
    MissingName {
        /// The form field that was empty.
        field: &'static str,
    },

    /// A law was submitted with neither a document nor a link.
    #[error("a law needs either a document or a link")]
    MissingLawSource,

    /// A bulk-edit row whose status contradicts its evidence.
    #[error("requirement \"{requirement}\" is {status} but its evidence is {evidence}")]
    InconsistentStatus {
        /// Requirement name.
        requirement: String,
        /// The status given.
        status: String,
        /// "empty" or "present".
        evidence: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_identifier_names_the_kind() {
        let err = ValidationError::EmptyIdentifier { kind: "project" };
        assert!(format!("{err}").contains("project"));
    }

    #[test]
    fn too_many_attachments_reports_counts() {
        let msg = format!("{}", ValidationError::TooManyAttachments { given: 3, max: 1 });
        assert!(msg.contains('3'));
        assert!(msg.contains("at most 1"));
    }

    #[test]
    fn project_name_too_short_reports_minimum() {
        let msg = format!(
            "{}",
            ValidationError::ProjectNameTooShort { len: 2, min: 3 }
        );
        assert!(msg.contains("at least 3"));
    }

    #[test]
    fn inconsistent_status_display() {
        let err = ValidationError::InconsistentStatus {
            requirement: "Outorga de uso da água".to_string(),
            status: "concluido".to_string(),
            evidence: "empty",
        };
        let msg = format!("{err}");
        assert!(msg.contains("Outorga"));
        assert!(msg.contains("concluido"));
        assert!(msg.contains("empty"));
    }
}
