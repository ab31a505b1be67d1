//! HTTP API exposing the three lookups as JSON.
//!
//! Routes (relative to the API mount point):
//!
//! - `GET /v1/synonyms?word=&startsWith=&endsWith=&pattern=&minLetters=&maxLetters=&sort=&all=`
//! - `GET /v1/matching-words?frame=&page=&syn1=&syn2=`
//! - `GET /v1/anagrams?phrase=&partial=`
//!
//! Failures are reported as `{"error": "...", "code": N}` with status `N`.

use std::collections::HashMap;
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::{
    AnagramQuery, AnagramResult, Crossie, CrosswordError, PatternQuery, PatternResult,
    SynonymQuery, SynonymResult,
};

/// Path the API router is mounted under by [`serve`].
pub const API_PREFIX: &str = "/api";

/// Settings for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    /// Directory served for every non-API path, if any.
    pub static_root: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8989)),
            static_root: None,
        }
    }
}

#[derive(Debug)]
struct ApiError(CrosswordError);

impl From<CrosswordError> for ApiError {
    fn from(err: CrosswordError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.status_code();
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            warn!(error = %self.0, "request failed");
        }
        let payload = json!({ "error": self.0.to_string(), "code": code });
        (status, Json(payload)).into_response()
    }
}

/// Router with the `/v1/...` API routes.
pub fn router(crossie: Crossie) -> Router {
    Router::new()
        .route("/v1/synonyms", get(synonyms))
        .route("/v1/matching-words", get(matching_words))
        .route("/v1/anagrams", get(anagrams))
        .with_state(crossie)
}

/// Full application: the API under [`API_PREFIX`] plus optional static files.
pub fn app(config: &ServerConfig, crossie: Crossie) -> io::Result<Router> {
    let mut app = Router::new().nest(API_PREFIX, router(crossie));
    if let Some(root) = &config.static_root {
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("static root {} is not a directory", root.display()),
            ));
        }
        app = app.fallback_service(ServeDir::new(root));
    }
    Ok(app.layer(TraceLayer::new_for_http()))
}

/// Serves the application until Ctrl-C or SIGTERM.
pub async fn serve(config: ServerConfig, crossie: Crossie) -> io::Result<()> {
    let app = app(&config, crossie)?;
    info!(addr = %config.addr, root = ?config.static_root, "starting server");
    let listener = TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server exited");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            let _ = stream.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

async fn synonyms(
    State(crossie): State<Crossie>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<SynonymResult>, ApiError> {
    let query = SynonymQuery::from_params(&params)?;
    Ok(Json(crossie.synonyms(query).await?))
}

async fn matching_words(
    State(crossie): State<Crossie>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<PatternResult>, ApiError> {
    let query = PatternQuery::from_params(&params)?;
    Ok(Json(crossie.find_words(query).await?))
}

async fn anagrams(
    State(crossie): State<Crossie>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<AnagramResult>, ApiError> {
    let query = AnagramQuery::from_params(&params)?;
    Ok(Json(crossie.anagrams(query).await?))
}
