//! # New Project Builder
//!
//! Turns the catalog and the user's per-requirement choices into a
//! [`CreateProjectRequest`]. Every catalog theme is carried, in catalog
//! order, even when none of its requirements was chosen. Chosen
//! requirements start pending with no evidence and inherit the law links
//! of their theme.

use std::collections::{BTreeMap, BTreeSet};

use conforma_client::projects::{CreateProjectRequest, RequirementDraft, ThemeDraft};
use conforma_core::{RequirementId, RequirementStatus, ThemeDefinition, ThemeId, ValidationError};

/// Minimum length of a trimmed project name, in characters.
pub const MIN_PROJECT_NAME_LEN: usize = 3;

/// How strictly a new project is checked before creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreationPolicy {
    /// Name of at least three characters and a non-empty catalog.
    #[default]
    Standard,
    /// Additionally requires at least one chosen requirement.
    RequireSelection,
}

/// Requirements the user chose to include, grouped by theme.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    chosen: BTreeMap<ThemeId, BTreeSet<RequirementId>>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a requirement as included.
    pub fn include(&mut self, theme: ThemeId, requirement: RequirementId) -> &mut Self {
        self.chosen.entry(theme).or_default().insert(requirement);
        self
    }

    pub fn is_included(&self, theme: &ThemeId, requirement: &RequirementId) -> bool {
        self.chosen
            .get(theme)
            .is_some_and(|reqs| reqs.contains(requirement))
    }

    pub fn is_empty(&self) -> bool {
        self.chosen.values().all(BTreeSet::is_empty)
    }

    fn themes(&self) -> impl Iterator<Item = &ThemeId> {
        self.chosen.keys()
    }
}

/// Build the creation request for a new project.
///
/// # Errors
///
/// - [`ValidationError::ProjectNameTooShort`] when the trimmed name is
///   shorter than [`MIN_PROJECT_NAME_LEN`].
/// - [`ValidationError::EmptyCatalog`] when there are no themes.
/// - [`ValidationError::UnknownTheme`] when the selection names a theme
///   missing from the catalog.
/// - [`ValidationError::NothingSelected`] under
///   [`CreationPolicy::RequireSelection`] with an empty selection.
pub fn build_create_request(
    name: &str,
    catalog: &[ThemeDefinition],
    selection: &Selection,
    policy: CreationPolicy,
) -> Result<CreateProjectRequest, ValidationError> {
    let nome = name.trim();
    let len = nome.chars().count();
    if len < MIN_PROJECT_NAME_LEN {
        return Err(ValidationError::ProjectNameTooShort {
            len,
            min: MIN_PROJECT_NAME_LEN,
        });
    }
    if catalog.is_empty() {
        return Err(ValidationError::EmptyCatalog);
    }
    if let Some(unknown) = selection
        .themes()
        .find(|id| !catalog.iter().any(|t| &t.id == *id))
    {
        return Err(ValidationError::UnknownTheme(unknown.to_string()));
    }
    if policy == CreationPolicy::RequireSelection && selection.is_empty() {
        return Err(ValidationError::NothingSelected);
    }

    let temas = catalog
        .iter()
        .map(|theme| {
            let leis_ids = theme.law_ids();
            let requisitos = theme
                .requisitos
                .iter()
                .filter(|def| selection.is_included(&theme.id, &def.id))
                .map(|def| RequirementDraft {
                    id: def.id.clone(),
                    nome: def.descricao.clone(),
                    status: RequirementStatus::Pendente,
                    evidencia: String::new(),
                    anexo: Vec::new(),
                    leis_ids: leis_ids.clone(),
                })
                .collect();
            ThemeDraft {
                id: theme.id.clone(),
                nome: theme.nome.clone(),
                requisitos,
            }
        })
        .collect();

    Ok(CreateProjectRequest {
        nome: nome.to_string(),
        temas,
    })
}
