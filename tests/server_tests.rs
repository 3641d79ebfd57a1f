//! End-to-end tests for the HTTP API over the sample dataset

use async_trait::async_trait;
use malla_planner::core::chat::{ChatModel, ChatService, UnconfiguredModel};
use malla_planner::core::error::Result;
use malla_planner::core::models::MallasDataset;
use malla_planner::server::{router, serve_on, AppState};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;

const SAMPLE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/samples/mallas.json");

struct FixedModel(&'static str);

#[async_trait]
impl ChatModel for FixedModel {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.0.to_string())
    }
}

/// Start a server on an ephemeral port and return its base URL
async fn spawn_server(model: Arc<dyn ChatModel>) -> String {
    let dataset = MallasDataset::load(SAMPLE).expect("sample dataset loads");
    let state = AppState::new(dataset, ChatService::new(model));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve_on(listener, router(state, true), std::future::pending()));
    format!("http://{addr}")
}

async fn post(base: &str, path: &str, body: Value) -> (StatusCode, Value) {
    let response = Client::new()
        .post(format!("{base}{path}"))
        .json(&body)
        .send()
        .await
        .unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

/// POST a raw body, optionally labelled as JSON
async fn post_raw(base: &str, path: &str, body: &str, json_type: bool) -> (StatusCode, Value) {
    let mut request = Client::new()
        .post(format!("{base}{path}"))
        .body(body.to_string());
    if json_type {
        request = request.header("content-type", "application/json");
    }
    let response = request.send().await.unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

fn unconfigured() -> Arc<dyn ChatModel> {
    Arc::new(UnconfiguredModel {
        api_key_env: "API_KEY".to_string(),
    })
}

#[tokio::test]
async fn health_reports_version() {
    let base = spawn_server(unconfigured()).await;
    let body: Value = reqwest::get(format!("{base}/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn majors_minors_listing() {
    let base = spawn_server(unconfigured()).await;
    let body: Value = reqwest::get(format!("{base}/majors-minors"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["majors"].as_array().unwrap().len(), 3);
    assert_eq!(body["minors"][0]["nombre"], "Computación");
}

#[tokio::test]
async fn malla_success_and_errors() {
    let base = spawn_server(unconfigured()).await;

    let (status, body) = post(
        &base,
        "/malla",
        json!({ "major": "Ingeniería de Software", "minor": "Computación" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["Nombre"], "Ingeniería de Software con minor Computación");
    assert_eq!(body["Ramos"].as_array().unwrap().len(), 10);

    let (status, body) = post(&base, "/malla", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "El parámetro \"major\" es requerido");

    let (status, body) = post(&base, "/malla", json!({ "major": "Astronomía" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Major con nombre \"Astronomía\" no encontrado.");
}

#[tokio::test]
async fn semestres_applies_moves() {
    let base = spawn_server(unconfigured()).await;
    let (status, body) = post(
        &base,
        "/malla/semestres",
        json!({
            "major": "Ingeniería de Software",
            "movimientos": [
                { "id": "ING2000", "semestre": 5 },
                { "id": "NOPE000", "semestre": 1 }
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let semestres = body["semestres"].as_array().unwrap();
    assert_eq!(semestres.last().unwrap()["semestre"], 5);
    assert_eq!(semestres.last().unwrap()["ramos"][0]["Sigla"], "ING2000");
    assert!(body["sinSemestre"].as_array().unwrap().is_empty());
    assert_eq!(body["creditosTotales"], 70.0);
    assert_eq!(body["movimientosIgnorados"], json!(["NOPE000"]));
}

#[tokio::test]
async fn requisitos_and_progreso() {
    let base = spawn_server(unconfigured()).await;

    let (status, body) = post(
        &base,
        "/malla/requisitos",
        json!({ "major": "Ingeniería de Software", "sigla": "MAT1610" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["desbloquea"], json!(["FIS1514", "MAT1620"]));
    assert_eq!(body["prerequisitos"], json!([]));

    let (status, body) = post(
        &base,
        "/malla/requisitos",
        json!({ "major": "Ingeniería de Software" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "El parámetro \"sigla\" es requerido");

    let (status, body) = post(
        &base,
        "/malla/progreso",
        json!({ "major": "Ingeniería de Software", "completados": ["MAT1610"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["aprobados"], json!(["MAT1610"]));
    assert_eq!(body["creditosAprobados"], 10.0);
    assert_eq!(body["pendientes"], 7);
}

#[tokio::test]
async fn chat_returns_answer_and_suggestion() {
    let answer = r#"Te recomiendo Cálculo II.
{"cursos_sugeridos": ["MAT1620"], "explicacion": "Sigue a Cálculo I"}"#;
    let base = spawn_server(Arc::new(FixedModel(answer))).await;

    let (status, body) = post(
        &base,
        "/api/chat",
        json!({ "message": "¿Qué tomo ahora?", "dataMalla": { "aprobados": ["MAT1610"] } }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["respuesta"], answer);
    assert_eq!(
        body["cursosRecomendados"]["cursos_sugeridos"],
        json!(["MAT1620"])
    );
}

#[tokio::test]
async fn chat_errors() {
    let base = spawn_server(unconfigured()).await;

    let (status, body) = post(&base, "/api/chat", json!({ "dataMalla": {} })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = post(&base, "/api/chat", json!({ "message": "hola" })).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("API_KEY"));
}

#[tokio::test]
async fn unusable_bodies_get_json_errors() {
    let base = spawn_server(unconfigured()).await;

    // no JSON content type: read as an empty object
    let (status, body) = post_raw(
        &base,
        "/malla",
        r#"{"major":"Ingeniería de Software"}"#,
        false,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "El parámetro \"major\" es requerido");

    let (status, body) = post_raw(&base, "/malla", "{not json", true).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Cuerpo de la solicitud inválido"));

    let (status, body) = post(
        &base,
        "/malla/semestres",
        json!({
            "major": "Ingeniería de Software",
            "movimientos": [{ "id": "ING2000", "semestre": "3" }]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = post(
        &base,
        "/malla/progreso",
        json!({ "completados": "MAT1610" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn chat_rejects_unusable_bodies() {
    let base = spawn_server(Arc::new(FixedModel("ok"))).await;

    let (status, body) = post(&base, "/api/chat", json!({ "message": 123 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());

    let (status, body) = post_raw(&base, "/api/chat", "{\"message\":", true).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (status, body) = post_raw(&base, "/api/chat", r#"{"message":"hola"}"#, false).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "El parámetro \"message\" es requerido");
}
