use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::fetch::{self, FetchOutcome};
use crate::output::{self, escape_html, table};

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {source}")]
    Serve {
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone, Debug)]
pub struct ServerOptions {
    pub listen: SocketAddr,
    pub data_dir: PathBuf,
}

#[derive(Clone)]
struct AppState {
    data_dir: Arc<PathBuf>,
}

#[derive(Serialize, Deserialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "fleetview".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Deserialize)]
struct RenderParams {
    file: Option<String>,
}

// Only plain .json names under the data directory are served.
pub fn is_valid_filename(name: &str) -> bool {
    name.ends_with(".json") && !name.contains('/') && !name.contains('\\') && !name.contains("..")
}

fn error_page(status: StatusCode, message: &str) -> Response {
    let body = format!(
        "<html><body><h1>Error: {}</h1></body></html>",
        escape_html(message)
    );
    (status, Html(body)).into_response()
}

async fn render_file(
    State(state): State<AppState>,
    Query(params): Query<RenderParams>,
) -> Response {
    let Some(name) = params
        .file
        .as_deref()
        .map(str::trim)
        .filter(|f| !f.is_empty())
    else {
        return error_page(StatusCode::BAD_REQUEST, "No file parameter provided");
    };
    if !is_valid_filename(name) {
        return error_page(StatusCode::BAD_REQUEST, "Invalid filename");
    }

    let path = state.data_dir.join(name);
    let text = match tokio::fs::read_to_string(&path).await {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return error_page(
                StatusCode::NOT_FOUND,
                &format!("File \"{name}\" not found"),
            );
        }
        Err(e) => {
            tracing::error!("failed to read {}: {e}", path.display());
            return error_page(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read file");
        }
    };

    match fetch::parse_outcome(&text, fetch::file_base_url(&path)) {
        Err(_) => error_page(StatusCode::UNPROCESSABLE_ENTITY, "Invalid JSON file"),
        Ok(FetchOutcome::Empty { .. }) => Html(table::render_message_document(
            "No trucking companies found in the JSON file",
        ))
        .into_response(),
        Ok(FetchOutcome::Table(loaded)) => {
            let records = output::build_records(&loaded.rows, loaded.base_url.as_ref());
            let base_href = loaded.base_url.as_ref().map(|u| u.to_string());
            Html(table::render_document(
                &loaded.headers,
                &records,
                base_href.as_deref(),
            ))
            .into_response()
        }
    }
}

pub fn router(data_dir: PathBuf) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/render", get(render_file))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(AppState {
            data_dir: Arc::new(data_dir),
        })
}

pub async fn serve(options: ServerOptions) -> Result<(), ServeError> {
    let app = router(options.data_dir.clone());
    let listener = tokio::net::TcpListener::bind(options.listen)
        .await
        .map_err(|e| ServeError::Bind {
            addr: options.listen,
            source: e,
        })?;
    tracing::info!(
        "fleetview server listening on http://{} (data dir: {})",
        options.listen,
        options.data_dir.display()
    );
    axum::serve(listener, app)
        .await
        .map_err(|e| ServeError::Serve { source: e })?;
    Ok(())
}
