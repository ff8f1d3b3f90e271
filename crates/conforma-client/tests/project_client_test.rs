//! Contract tests for ProjectClient against a wiremock backend.
//!
//! ## Endpoints Tested
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET    | `/api/projetos` | `list_projects_*` |
//! | GET    | `/api/projetos/{id}` | `get_project_*` |
//! | POST   | `/api/projetos` | `create_project_*` |
//! | PUT    | `/api/projetos/{id}` | `rename_project_*` |
//! | DELETE | `/api/projetos/{id}` | `delete_project_*` |
//! | POST   | `/api/projetos/{id}/temas` | `link_theme_*` |
//! | PUT    | `/api/projetos/{id}/temas/{t}/requisitos/{r}` | `set_status_*` |
//! | DELETE | `/api/projetos/{id}/temas/{t}/requisitos/{r}` | `remove_requirement_*` |
//! | POST   | `/api/projetos/{id}/temas/{t}/requisitos/{r}/evidencias` | `record_evidence_*` |
//! | PUT    | `/api/projetos/{id}/editar-completo` | `edit_complete_*` |

use chrono::NaiveDate;
use conforma_client::projects::{
    CreateProjectRequest, EditProjectRequest, EditRequirementRow, EditThemeRow,
    RequirementDraft, ThemeDraft, UpdateProjectRequest,
};
use conforma_client::{ApiConfig, ApiError, ConformaClient, EvidenceUpload, FileUpload};
use conforma_core::{LawId, ProjectId, RequirementId, RequirementStatus, ThemeId};
use wiremock::matchers::{body_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(mock_server: &MockServer) -> ConformaClient {
    let config = ApiConfig::new(&format!("{}/api", mock_server.uri()), 5).unwrap();
    ConformaClient::new(config).unwrap()
}

fn project_json(status: &str, evidencia: &str) -> serde_json::Value {
    serde_json::json!({
        "id": 7,
        "nome": "Fazenda Boa Vista",
        "temas": [{
            "id": 1,
            "nome": "Recursos Hídricos",
            "requisitos": [{
                "id": 11,
                "nome": "Outorga de uso da água",
                "status": status,
                "evidencia": evidencia,
                "anexo": [],
                "leisIds": [3]
            }]
        }]
    })
}

fn ids() -> (ProjectId, ThemeId, RequirementId) {
    (
        ProjectId::new("7").unwrap(),
        ThemeId::new("1").unwrap(),
        RequirementId::new("11").unwrap(),
    )
}

// ── GET /projetos ───────────────────────────────────────────────────

#[tokio::test]
async fn list_projects_decodes_numeric_ids() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projetos"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([project_json("pendente", "")])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let projects = test_client(&mock_server).projects().list().await.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].id.as_str(), "7");
    assert_eq!(projects[0].requirement_count(), 1);
}

#[tokio::test]
async fn list_projects_surfaces_server_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projetos"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Erro ao buscar projetos"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = test_client(&mock_server).projects().list().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(err.to_string().contains("Erro ao buscar projetos"));
}

// ── GET /projetos/{id} ──────────────────────────────────────────────

#[tokio::test]
async fn get_project_returns_aggregate() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projetos/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_json("concluido", "ok")))
        .mount(&mock_server)
        .await;

    let (id, _, _) = ids();
    let project = test_client(&mock_server).projects().get(&id).await.unwrap().unwrap();
    assert_eq!(project.nome, "Fazenda Boa Vista");
    assert_eq!(project.concluded_count(), 1);
}

#[tokio::test]
async fn get_project_returns_none_on_404() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projetos/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let id = ProjectId::new("99").unwrap();
    assert!(test_client(&mock_server).projects().get(&id).await.unwrap().is_none());
}

#[tokio::test]
async fn get_project_reports_malformed_body() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/projetos/7"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&mock_server)
        .await;

    let (id, _, _) = ids();
    let err = test_client(&mock_server).projects().get(&id).await.unwrap_err();
    assert!(matches!(err, ApiError::Deserialization { .. }));
}

// ── POST /projetos ──────────────────────────────────────────────────

#[tokio::test]
async fn create_project_posts_selected_requirements() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/projetos"))
        .and(body_json(serde_json::json!({
            "nome": "Fazenda Boa Vista",
            "temas": [{
                "id": "1",
                "nome": "Recursos Hídricos",
                "requisitos": [{
                    "id": "11",
                    "nome": "Outorga de uso da água",
                    "status": "pendente",
                    "evidencia": "",
                    "anexo": [],
                    "leisIds": ["3"]
                }]
            }]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(project_json("pendente", "")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let req = CreateProjectRequest {
        nome: "Fazenda Boa Vista".into(),
        temas: vec![ThemeDraft {
            id: ThemeId::new("1").unwrap(),
            nome: "Recursos Hídricos".into(),
            requisitos: vec![RequirementDraft {
                id: RequirementId::new("11").unwrap(),
                nome: "Outorga de uso da água".into(),
                status: RequirementStatus::Pendente,
                evidencia: String::new(),
                anexo: vec![],
                leis_ids: vec![LawId::new("3").unwrap()],
            }],
        }],
    };
    let project = test_client(&mock_server).projects().create(&req).await.unwrap();
    assert_eq!(project.id.as_str(), "7");
}

// ── PUT / DELETE /projetos/{id} ─────────────────────────────────────

#[tokio::test]
async fn rename_project_sends_name_only() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/projetos/7"))
        .and(body_json(serde_json::json!({ "nome": "Fazenda Nova" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_json("pendente", "")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (id, _, _) = ids();
    let req = UpdateProjectRequest {
        nome: Some("Fazenda Nova".into()),
    };
    test_client(&mock_server).projects().update(&id, &req).await.unwrap();
}

#[tokio::test]
async fn delete_project_accepts_204() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/projetos/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (id, _, _) = ids();
    test_client(&mock_server).projects().delete(&id).await.unwrap();
}

// ── Theme and requirement sub-resources ─────────────────────────────

#[tokio::test]
async fn link_theme_posts_tema_id() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/projetos/7/temas"))
        .and(body_json(serde_json::json!({ "temaId": "1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_json("pendente", "")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (id, theme, _) = ids();
    test_client(&mock_server).projects().link_theme(&id, &theme).await.unwrap();
}

#[tokio::test]
async fn set_status_puts_status_only() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/projetos/7/temas/1/requisitos/11"))
        .and(body_json(serde_json::json!({ "status": "concluido" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_json("concluido", "ok")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (id, theme, req) = ids();
    let project = test_client(&mock_server)
        .projects()
        .set_requirement_status(&id, &theme, &req, RequirementStatus::Concluido)
        .await
        .unwrap();
    assert_eq!(project.concluded_count(), 1);
}

#[tokio::test]
async fn remove_requirement_returns_updated_project() {
    let mock_server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/projetos/7/temas/1/requisitos/11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 7,
            "nome": "Fazenda Boa Vista",
            "temas": [{ "id": 1, "nome": "Recursos Hídricos", "requisitos": [] }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (id, theme, req) = ids();
    let project = test_client(&mock_server)
        .projects()
        .remove_requirement(&id, &theme, &req)
        .await
        .unwrap();
    assert_eq!(project.requirement_count(), 0);
}

// ── POST .../evidencias ─────────────────────────────────────────────

#[tokio::test]
async fn record_evidence_sends_multipart_fields() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/projetos/7/temas/1/requisitos/11/evidencias"))
        .and(body_string_contains("name=\"evidencia\""))
        .and(body_string_contains("Portaria 123/2025"))
        .and(body_string_contains("name=\"data\""))
        .and(body_string_contains("2026-12-31"))
        .and(body_string_contains("filename=\"outorga.pdf\""))
        .respond_with(ResponseTemplate::new(201).set_body_json(project_json("pendente", "Portaria 123/2025")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (id, theme, req) = ids();
    let upload = EvidenceUpload {
        evidencia: "Portaria 123/2025".into(),
        data: NaiveDate::from_ymd_opt(2026, 12, 31),
        anexos: vec![FileUpload {
            file_name: "outorga.pdf".into(),
            bytes: b"%PDF-1.4 test".to_vec(),
        }],
    };
    let project = test_client(&mock_server)
        .projects()
        .record_evidence(&id, &theme, &req, upload)
        .await
        .unwrap();
    assert_eq!(
        project.requirement(&theme, &req).unwrap().evidencia,
        "Portaria 123/2025"
    );
}

#[tokio::test]
async fn record_evidence_surfaces_rejection() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/projetos/7/temas/1/requisitos/11/evidencias"))
        .respond_with(ResponseTemplate::new(413).set_body_string("Arquivo muito grande"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (id, theme, req) = ids();
    let upload = EvidenceUpload {
        evidencia: "Laudo".into(),
        data: None,
        anexos: vec![],
    };
    let err = test_client(&mock_server)
        .projects()
        .record_evidence(&id, &theme, &req, upload)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(413));
}

// ── PUT /projetos/{id}/editar-completo ──────────────────────────────

#[tokio::test]
async fn edit_complete_sends_rows_by_name() {
    let mock_server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/projetos/7/editar-completo"))
        .and(body_json(serde_json::json!({
            "nome": "Fazenda Boa Vista",
            "temas": [{
                "tema": "Recursos Hídricos",
                "requisitos": [{
                    "requisito": "Outorga de uso da água",
                    "status": "concluido",
                    "leis": ["3"],
                    "evidencia": "Portaria 123/2025",
                    "dataEvidencia": "2026-12-31"
                }]
            }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(project_json("concluido", "Portaria 123/2025")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (id, _, _) = ids();
    let req = EditProjectRequest {
        nome: "Fazenda Boa Vista".into(),
        temas: vec![EditThemeRow {
            tema: "Recursos Hídricos".into(),
            requisitos: vec![EditRequirementRow {
                requisito: "Outorga de uso da água".into(),
                status: RequirementStatus::Concluido,
                leis: vec![LawId::new("3").unwrap()],
                evidencia: Some("Portaria 123/2025".into()),
                data_evidencia: NaiveDate::from_ymd_opt(2026, 12, 31),
                anexos: None,
            }],
        }],
    };
    test_client(&mock_server).projects().edit_complete(&id, &req).await.unwrap();
}

// ── Transport ───────────────────────────────────────────────────────

#[tokio::test]
async fn unreachable_backend_is_http_error() {
    // Nothing listens on port 9 on the loopback interface.
    let config = ApiConfig::new("http://127.0.0.1:9/api", 2).unwrap();
    let client = ConformaClient::new(config).unwrap();
    let err = client.projects().list().await.unwrap_err();
    assert!(matches!(err, ApiError::Http { .. }));
}
