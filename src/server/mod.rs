//! HTTP server exposing the planner to the browser UI
//!
//! Routes:
//! - `GET  /health`
//! - `GET  /majors-minors`
//! - `POST /malla`
//! - `POST /malla/semestres`
//! - `POST /malla/requisitos`
//! - `POST /malla/progreso`
//! - `POST /api/chat`

mod routes;

use crate::core::chat::{ChatService, GeminiClient, UnconfiguredModel};
use crate::core::config::Config;
use crate::core::error::{MallaError, Result};
use crate::core::models::MallasDataset;
use crate::{error, info, warn};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

/// Generic message returned for unexpected plan errors
const PLAN_FAILURE: &str = "Ocurrió un error al procesar la malla.";

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Curriculum dataset
    pub dataset: Arc<MallasDataset>,
    /// Chat relay
    pub chat: ChatService,
}

impl AppState {
    /// Bundle a dataset and a chat service
    #[must_use]
    pub fn new(dataset: MallasDataset, chat: ChatService) -> Self {
        Self {
            dataset: Arc::new(dataset),
            chat,
        }
    }

    /// Build state from config: the given dataset plus a Gemini client, or a
    /// model that reports the missing key when none is configured
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn from_config(config: &Config, dataset: MallasDataset) -> Result<Self> {
        let chat = match GeminiClient::from_config(config) {
            Ok(client) => ChatService::new(Arc::new(client)),
            Err(MallaError::MissingApiKey(env)) => {
                warn!("No chat API key found in ${env} or config; /api/chat will fail");
                ChatService::new(Arc::new(UnconfiguredModel { api_key_env: env }))
            }
            Err(e) => return Err(e),
        };
        Ok(Self::new(dataset, chat))
    }
}

/// HTTP status for an error
#[must_use]
pub const fn status_for(err: &MallaError) -> StatusCode {
    match err {
        MallaError::MissingParameter(_) | MallaError::BadRequest(_) => StatusCode::BAD_REQUEST,
        MallaError::UnknownMajor(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for MallaError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        let message = if status.is_server_error() {
            error!("Error processing malla: {self}");
            PLAN_FAILURE.to_string()
        } else {
            self.to_string()
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Build the router over the given state
pub fn router(state: AppState, cors: bool) -> Router {
    let app = Router::new()
        .route("/health", get(routes::health))
        .route("/majors-minors", get(routes::majors_minors))
        .route("/malla", post(routes::malla))
        .route("/malla/semestres", post(routes::semestres))
        .route("/malla/requisitos", post(routes::requisitos))
        .route("/malla/progreso", post(routes::progreso))
        .route("/api/chat", post(routes::chat))
        .with_state(Arc::new(state));

    if cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Serve `app` on an already-bound listener until `shutdown` resolves
///
/// # Errors
/// Returns an error if the server fails while accepting connections
pub async fn serve_on<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Bind `server.host:server.port` and serve until Ctrl-C
///
/// # Errors
/// Returns an error if the address cannot be bound or serving fails
pub async fn serve(config: &Config, state: AppState) -> Result<()> {
    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Servidor corriendo en {addr}");

    let app = router(state, config.server.cors);
    serve_on(listener, app, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Could not listen for Ctrl-C, serving until killed: {e}");
            std::future::pending::<()>().await;
        }
        info!("Shutting down");
    })
    .await
}
