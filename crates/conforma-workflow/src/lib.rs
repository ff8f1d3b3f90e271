//! # conforma-workflow -- Project Workflows
//!
//! Multi-step operations over a project that combine local validation with
//! backend calls:
//!
//! - [`builder`]: build a new project from the catalog and the user's
//!   requirement choices.
//! - [`evidence`]: record evidence, conclude the requirement and refresh
//!   the aggregate.
//! - [`edit`]: build, check and send a bulk edit of a whole project.
//!
//! Validation runs before anything is sent. Backend failures stop the
//! operation at the failing step and are reported through a [`Notifier`].

pub mod backend;
pub mod builder;
pub mod edit;
pub mod error;
pub mod evidence;
pub mod notify;

pub use backend::ProjectBackend;
pub use builder::{build_create_request, CreationPolicy, Selection};
pub use edit::{edit_request_from, reopen_requirement, submit_edit, validate_edit};
pub use error::WorkflowError;
pub use evidence::{
    submit_evidence, EvidenceSubmission, EvidenceTarget, ProjectView,
    MAX_ATTACHMENTS_PER_SUBMISSION,
};
pub use notify::{Notifier, TracingNotifier};
