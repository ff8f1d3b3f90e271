#![deny(missing_docs)]

//! # conforma-core -- Foundational Types for Conforma
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies, only `serde`, `thiserror`
//! and `chrono` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for backend identifiers.** [`ProjectId`],
//!    [`ThemeId`], [`RequirementId`] and [`LawId`] are distinct types. The
//!    backend emits some identifiers as JSON numbers and others as strings;
//!    all of them deserialize into the same opaque, non-empty string form.
//!
//! 2. **One status vocabulary.** [`RequirementStatus`] is binary
//!    (`pendente` / `concluido`). Legacy tri-state values are accepted on
//!    read and never written.
//!
//! 3. **Per-project copies are separate from the catalog.** [`Project`],
//!    [`Theme`] and [`Requirement`] are what a project tracks; [`Law`],
//!    [`ThemeDefinition`] and [`RequirementDefinition`] are the reusable
//!    catalog they are copied from.
//!
//! 4. **[`ValidationError`] hierarchy.** Structured errors with `thiserror`,
//!    raised before any network call is made.

pub mod catalog;
pub mod error;
pub mod identity;
pub mod project;

pub use catalog::{Law, LawSummary, RequirementDefinition, ThemeDefinition, ThemeSummary};
pub use error::ValidationError;
pub use identity::{LawId, ProjectId, RequirementId, ThemeId};
pub use project::{Attachment, Project, Requirement, RequirementStatus, Theme};
