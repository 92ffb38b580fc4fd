use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::config::EXAMPLE_QUERIES;
use crate::facility::StopInfo;
use crate::location::ResolutionResult;

use super::state::AppState;
use super::static_files;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

// ─── Static file handlers ────────────────────────────────────────

pub async fn index() -> Html<&'static str> {
    Html(static_files::INDEX_HTML)
}

pub async fn style() -> Response {
    (
        [(header::CONTENT_TYPE, "text/css")],
        static_files::STYLE_CSS,
    )
        .into_response()
}

pub async fn script() -> Response {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        static_files::APP_JS,
    )
        .into_response()
}

// ─── GET /api/resolve ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResolveQuery {
    pub query: Option<String>,
}

/// Resolution failures are a normal outcome and come back as 200 with
/// `success: false`; only a missing query is a client error.
pub(super) async fn resolve(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ResolveQuery>,
) -> Result<Json<ResolutionResult>, ApiError> {
    let start = Instant::now();

    let query = params.query.as_deref().unwrap_or("").trim();
    if query.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Missing 'query' parameter"));
    }

    let result = state.resolver.resolve(query);

    let matched = result
        .matched_record
        .as_ref()
        .map(|r| r.stop_name.as_str())
        .unwrap_or("-");
    info!(
        query,
        success = result.success,
        stop = matched,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "GET /api/resolve"
    );

    Ok(Json(result))
}

// ─── GET /api/stops ──────────────────────────────────────────────

pub async fn stop_list(State(state): State<Arc<AppState>>) -> Json<Vec<StopInfo>> {
    Json(state.resolver.table().stop_list())
}

// ─── GET /api/examples ───────────────────────────────────────────

pub async fn examples() -> Json<&'static [&'static str]> {
    Json(EXAMPLE_QUERIES)
}

// ─── GET /health ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    stops: usize,
    source: String,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let table = state.resolver.table();
    Json(HealthResponse {
        status: "ok",
        stops: table.stop_names().len(),
        source: table.source().to_string(),
    })
}
