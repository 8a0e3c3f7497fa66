use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Html,
    Json,
};
use tracing::warn;

use crate::api::{state::AppState, types::*};
use crate::error::PulseError;

type ApiResult<T> = std::result::Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

fn reject(err: PulseError) -> (StatusCode, Json<ErrorResponse>) {
    let status = err.status_code();
    warn!(status = status.as_u16(), error = %err, "request rejected");
    (status, Json(ErrorResponse::from(&err)))
}

/// GET / -- dashboard shell
pub async fn dashboard() -> Html<&'static str> {
    Html(include_str!("../../static/index.html"))
}

/// GET /api/snapshot -- fresh mock snapshot plus derived signals
pub async fn get_snapshot(State(state): State<AppState>) -> ApiResult<SnapshotResponse> {
    let snapshot = state.source.snapshot().await.map_err(reject)?;
    let report = state.computer.compute(&snapshot).map_err(reject)?;
    Ok(Json(SnapshotResponse::from(&report)))
}

/// POST /api/snapshot/evaluate -- run the signal computer over a posted snapshot
pub async fn evaluate_snapshot(
    State(state): State<AppState>,
    body: std::result::Result<Json<EvaluateRequest>, JsonRejection>,
) -> ApiResult<SnapshotResponse> {
    let Json(req) =
        body.map_err(|rejection| reject(PulseError::InvalidSnapshotValue(rejection.body_text())))?;
    let snapshot = req.into_snapshot().map_err(reject)?;
    let report = state.computer.compute(&snapshot).map_err(reject)?;
    Ok(Json(SnapshotResponse::from(&report)))
}

/// GET /health -- liveness probe
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        feed: state.source.name().to_string(),
        uptime_secs: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
