//! Request handlers

use super::{status_for, AppState};
use crate::core::error::{MallaError, Result};
use crate::core::models::Ramo;
use crate::core::planner::{
    build_malla, catalog, progress, requisite_sets, Catalog, Malla, Progress, RequisiteSets,
    SemesterBoard, SemesterColumn,
};
use crate::{error, get_version, info};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

/// Major/minor selection shared by every plan route
#[derive(Debug, Default, Deserialize)]
pub struct PlanRequest {
    #[serde(default)]
    major: Option<String>,
    #[serde(default)]
    minor: Option<String>,
}

impl PlanRequest {
    fn build(&self, state: &AppState) -> Result<Malla> {
        build_malla(&state.dataset, self.major.as_deref(), self.minor.as_deref())
    }
}

/// A card moved on the board
#[derive(Debug, Deserialize)]
pub struct Move {
    id: String,
    semestre: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct BoardRequest {
    #[serde(flatten)]
    plan: PlanRequest,
    #[serde(default)]
    movimientos: Vec<Move>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RequisitosRequest {
    #[serde(flatten)]
    plan: PlanRequest,
    #[serde(default)]
    sigla: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProgressRequest {
    #[serde(flatten)]
    plan: PlanRequest,
    #[serde(default)]
    completados: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    message: Option<String>,
    #[serde(rename = "dataMalla", default)]
    data_malla: Value,
}

#[derive(Serialize)]
struct BoardResponse<'a> {
    #[serde(rename = "Nombre")]
    nombre: &'a str,
    semestres: Vec<SemesterColumn<'a>>,
    #[serde(rename = "sinSemestre")]
    sin_semestre: Vec<&'a Ramo>,
    #[serde(rename = "creditosTotales")]
    creditos_totales: f64,
    #[serde(rename = "movimientosIgnorados")]
    movimientos_ignorados: Vec<String>,
}

/// Unpack a JSON body. A body sent without a JSON content type reads as `{}`;
/// anything else the extractor rejects becomes a 400.
fn body<T: Default>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    match payload {
        Ok(Json(req)) => Ok(req),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => Err(MallaError::BadRequest(rejection.body_text())),
    }
}

pub async fn health() -> Json<Value> {
    info!("GET /health");
    Json(json!({ "status": "ok", "version": get_version() }))
}

pub async fn majors_minors(State(state): State<Arc<AppState>>) -> Json<Catalog> {
    info!("GET /majors-minors");
    Json(catalog(&state.dataset))
}

pub async fn malla(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<PlanRequest>, JsonRejection>,
) -> Result<Json<Malla>> {
    let req = body(payload)?;
    info!(
        "POST /malla major={:?} minor={:?}",
        req.major.as_deref().unwrap_or_default(),
        req.minor.as_deref().unwrap_or_default()
    );
    let malla = req.build(&state)?;
    info!("POST /malla -> {} ramos", malla.ramos.len());
    Ok(Json(malla))
}

pub async fn semestres(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<BoardRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let req = body(payload)?;
    info!(
        "POST /malla/semestres major={:?} ({} movimientos)",
        req.plan.major.as_deref().unwrap_or_default(),
        req.movimientos.len()
    );
    let malla = req.plan.build(&state)?;
    let mut board = SemesterBoard::from_ramos(malla.ramos);

    let movimientos_ignorados: Vec<String> = req
        .movimientos
        .iter()
        .filter(|m| !board.move_course(&m.id, m.semestre))
        .map(|m| m.id.clone())
        .collect();

    let response = BoardResponse {
        nombre: &malla.nombre,
        semestres: board.columns(),
        sin_semestre: board.unscheduled(),
        creditos_totales: board.total_credits(),
        movimientos_ignorados,
    };
    Ok(Json(serde_json::to_value(&response)?))
}

pub async fn requisitos(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<RequisitosRequest>, JsonRejection>,
) -> Result<Json<RequisiteSets>> {
    let req = body(payload)?;
    let sigla = req
        .sigla
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(MallaError::MissingParameter("sigla"))?;
    info!("POST /malla/requisitos sigla={sigla}");
    let malla = req.plan.build(&state)?;
    Ok(Json(requisite_sets(&malla.ramos, sigla)))
}

pub async fn progreso(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<ProgressRequest>, JsonRejection>,
) -> Result<Json<Progress>> {
    let req = body(payload)?;
    info!(
        "POST /malla/progreso ({} completados)",
        req.completados.len()
    );
    let malla = req.plan.build(&state)?;
    Ok(Json(progress(&malla.ramos, &req.completados)))
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let req = match body(payload) {
        Ok(req) => req,
        Err(e) => return chat_failure(&e),
    };
    let Some(message) = req.message.as_deref().filter(|m| !m.trim().is_empty()) else {
        return chat_failure(&MallaError::MissingParameter("message"));
    };
    info!("POST /api/chat ({} chars)", message.len());

    match state.chat.ask(message, &req.data_malla).await {
        Ok(reply) => Json(json!({
            "success": true,
            "respuesta": reply.respuesta,
            "cursosRecomendados": reply.cursos_recomendados,
        }))
        .into_response(),
        Err(e) => chat_failure(&e),
    }
}

fn chat_failure(err: &MallaError) -> Response {
    let status = status_for(err);
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!("Chat error: {err}");
    }
    (
        status,
        Json(json!({ "success": false, "error": err.to_string() })),
    )
        .into_response()
}
