//! # Catalog Entities
//!
//! Reusable definitions managed through CRUD, independent of any project:
//! a [`Law`] groups themes, a [`ThemeDefinition`] groups
//! [`RequirementDefinition`]s. A new project copies the selected
//! definitions; catalog rows are only referenced by id afterwards.

use serde::{Deserialize, Serialize};

use crate::identity::{LawId, RequirementId, ThemeId};

/// Minimal law reference embedded in theme responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawSummary {
    /// Law identifier.
    pub id: LawId,
    /// Law name.
    pub nome: String,
}

/// Minimal theme reference embedded in law responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSummary {
    /// Theme identifier.
    pub id: ThemeId,
    /// Theme name.
    pub nome: String,
}

/// A legal or regulatory source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Law {
    /// Law identifier.
    pub id: LawId,
    /// Law name (e.g. "Lei 9.605/1998").
    pub nome: String,
    /// External link to the law text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Stored document path, when a PDF was uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documento: Option<String>,
    /// Themes linked to this law.
    #[serde(default)]
    pub temas: Vec<ThemeId>,
    /// Expanded theme references, when the backend includes them.
    #[serde(default)]
    pub temas_detalhes: Vec<ThemeSummary>,
    /// Creation timestamp as reported by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    /// Last update timestamp as reported by the backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// A reusable theme definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDefinition {
    /// Theme identifier.
    pub id: ThemeId,
    /// Theme name.
    pub nome: String,
    /// Ids of the laws linked to this theme.
    #[serde(default)]
    pub leis_ids: Vec<LawId>,
    /// Expanded law references, when the backend includes them.
    #[serde(default)]
    pub leis: Vec<LawSummary>,
    /// Requirement definitions, when the backend includes them.
    #[serde(default)]
    pub requisitos: Vec<RequirementDefinition>,
}

impl ThemeDefinition {
    /// The theme's law associations.
    ///
    /// Prefers the `leisIds` list and falls back to the ids of the expanded
    /// `leis` relation when only that one is present.
    pub fn law_ids(&self) -> Vec<LawId> {
        if !self.leis_ids.is_empty() {
            return self.leis_ids.clone();
        }
        self.leis.iter().map(|l| l.id.clone()).collect()
    }
}

/// A reusable requirement definition, owned by one theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementDefinition {
    /// Requirement identifier.
    pub id: RequirementId,
    /// Requirement text.
    #[serde(alias = "nome")]
    pub descricao: String,
    /// Owning theme.
    pub tema_id: ThemeId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn law_decodes_numeric_ids_and_details() {
        let law: Law = serde_json::from_value(serde_json::json!({
            "id": 3,
            "nome": "Lei 12.305/2010",
            "link": "https://www.planalto.gov.br/ccivil_03/_ato2007-2010/2010/lei/l12305.htm",
            "documento": null,
            "temas": [1, 2],
            "temasDetalhes": [{ "id": 1, "nome": "Resíduos Sólidos" }]
        }))
        .unwrap();
        assert_eq!(law.id.as_str(), "3");
        assert_eq!(law.temas.len(), 2);
        assert!(law.documento.is_none());
        assert_eq!(law.temas_detalhes[0].nome, "Resíduos Sólidos");
    }

    #[test]
    fn theme_law_ids_prefer_explicit_list() {
        let theme: ThemeDefinition = serde_json::from_value(serde_json::json!({
            "id": 1,
            "nome": "Fauna",
            "leisIds": [4],
            "leis": [{ "id": 5, "nome": "Lei 5.197/1967" }]
        }))
        .unwrap();
        assert_eq!(theme.law_ids(), vec![LawId::new("4").unwrap()]);
    }

    #[test]
    fn theme_law_ids_fall_back_to_expanded_relation() {
        let theme: ThemeDefinition = serde_json::from_value(serde_json::json!({
            "id": 1,
            "nome": "Fauna",
            "leis": [{ "id": 5, "nome": "Lei 5.197/1967", "link": "x" }]
        }))
        .unwrap();
        assert_eq!(theme.law_ids(), vec![LawId::new("5").unwrap()]);
    }

    #[test]
    fn requirement_definition_accepts_nome_alias() {
        let def: RequirementDefinition = serde_json::from_value(serde_json::json!({
            "id": 11,
            "nome": "Manter CTF/APP atualizado",
            "temaId": 1
        }))
        .unwrap();
        assert_eq!(def.descricao, "Manter CTF/APP atualizado");
        assert_eq!(def.tema_id.as_str(), "1");
    }
}
