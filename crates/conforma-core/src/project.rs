//! # Project Aggregate
//!
//! The nested `Project → Theme → Requirement` structure exchanged with the
//! backend. A project is created once from a snapshot of catalog themes;
//! afterwards only its requirements change (evidence, status, validity
//! date, attachments).
//!
//! ## Invariant
//!
//! A requirement is [`RequirementStatus::Concluido`] if and only if its
//! evidence text is non-empty. [`Requirement::is_consistent`] checks it;
//! [`RequirementStatus::from_evidence`] derives the status that satisfies it.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::identity::{LawId, ProjectId, RequirementId, ThemeId};

/// Compliance status of a requirement inside a project.
///
/// Serialized as `"pendente"` / `"concluido"`. The legacy tri-state
/// vocabulary is accepted on read: `"sim"` maps to `Concluido`, `"nao"` and
/// `"não"` map to `Pendente`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementStatus {
    /// No evidence recorded yet.
    #[default]
    #[serde(alias = "nao", alias = "não")]
    Pendente,
    /// Evidence recorded; the requirement is met.
    #[serde(alias = "sim", alias = "concluído")]
    Concluido,
}

impl RequirementStatus {
    /// The status implied by an evidence text.
    pub fn from_evidence(evidence: &str) -> Self {
        if evidence.trim().is_empty() {
            Self::Pendente
        } else {
            Self::Concluido
        }
    }

    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pendente => "pendente",
            Self::Concluido => "concluido",
        }
    }
}

impl fmt::Display for RequirementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a stored file attached as evidence. The file content lives
/// in the backend's storage; only its name, storage path and upload date
/// are carried here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Original file name.
    pub nome: String,
    /// Storage path or URL on the backend.
    pub caminho: String,
    /// Upload date as reported by the backend.
    #[serde(default)]
    pub data: String,
}

/// A requirement as tracked inside a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    /// Requirement identifier.
    pub id: RequirementId,
    /// Requirement text.
    pub nome: String,
    /// Compliance status.
    #[serde(default)]
    pub status: RequirementStatus,
    /// Free-text evidence; empty while pending.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub evidencia: String,
    /// Validity date of the recorded evidence.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_date"
    )]
    pub data_validade: Option<NaiveDate>,
    /// Stored attachments.
    #[serde(default)]
    pub anexo: Vec<Attachment>,
    /// Laws this requirement answers to, inherited from its theme.
    #[serde(default)]
    pub leis_ids: Vec<LawId>,
}

impl Requirement {
    /// Whether the requirement has been concluded.
    pub fn is_concluded(&self) -> bool {
        self.status == RequirementStatus::Concluido
    }

    /// Whether evidence text has been recorded.
    pub fn has_evidence(&self) -> bool {
        !self.evidencia.trim().is_empty()
    }

    /// Whether status and evidence agree.
    pub fn is_consistent(&self) -> bool {
        self.status == RequirementStatus::from_evidence(&self.evidencia)
    }
}

/// A theme as tracked inside a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Theme identifier.
    pub id: ThemeId,
    /// Theme name.
    pub nome: String,
    /// Requirements selected for this project, in display order.
    #[serde(default)]
    pub requisitos: Vec<Requirement>,
}

impl Theme {
    /// Number of requirements in the theme.
    pub fn requirement_count(&self) -> usize {
        self.requisitos.len()
    }

    /// Number of concluded requirements in the theme.
    pub fn concluded_count(&self) -> usize {
        self.requisitos.iter().filter(|r| r.is_concluded()).count()
    }

    /// Find a requirement by id.
    pub fn requirement(&self, id: &RequirementId) -> Option<&Requirement> {
        self.requisitos.iter().find(|r| &r.id == id)
    }
}

/// A compliance project: the aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project identifier.
    pub id: ProjectId,
    /// Project name.
    pub nome: String,
    /// Themes in display order.
    #[serde(default)]
    pub temas: Vec<Theme>,
}

impl Project {
    /// Find a theme by id.
    pub fn theme(&self, id: &ThemeId) -> Option<&Theme> {
        self.temas.iter().find(|t| &t.id == id)
    }

    /// Find a requirement by theme and requirement id.
    pub fn requirement(&self, theme: &ThemeId, requirement: &RequirementId) -> Option<&Requirement> {
        self.theme(theme)?.requirement(requirement)
    }

    /// All requirements across all themes, in theme order then requirement order.
    pub fn requirements(&self) -> impl Iterator<Item = &Requirement> {
        self.temas.iter().flat_map(|t| t.requisitos.iter())
    }

    /// Total number of requirements across all themes.
    pub fn requirement_count(&self) -> usize {
        self.temas.iter().map(Theme::requirement_count).sum()
    }

    /// Total number of concluded requirements across all themes.
    pub fn concluded_count(&self) -> usize {
        self.temas.iter().map(Theme::concluded_count).sum()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `YYYY-MM-DD`, a full ISO 8601 timestamp (date part kept), an
/// empty string or `null`. Any other text decodes as no date, so one bad
/// row cannot make the whole project unreadable.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let date_part = raw.get(..10).unwrap_or(raw);
    Ok(NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok())
}
