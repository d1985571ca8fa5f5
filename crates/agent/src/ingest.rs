//! Sensor observation ingest endpoint.
//!
//! The vibration sensor bridge posts discrete state readings here.
//! Timestamps are assigned server-side at receipt so a slow or
//! clock-skewed bridge cannot corrupt the log's ordering assumptions.
//!
//! ```text
//! POST /submitState -> append one observation
//! GET  /status      -> liveness probe
//! ```

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use spindown_core::types::{Observation, SensorState};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::SharedLog;

/// Request body for `submitState`. The state arrives as a raw string
/// so an unknown value can be answered with a 400 and a helpful
/// message rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct SubmitStateRequest {
    pub state: String,
}

#[derive(Debug, Serialize)]
struct SubmitStateResponse {
    message: &'static str,
}

/// Rejection for malformed sensor submissions. Nothing is appended to
/// the log on rejection.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("State must be 'vibrating' or 'stationary'")]
    InvalidState,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        let status = match self {
            IngestError::InvalidState => StatusCode::BAD_REQUEST,
            IngestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

/// POST /submitState
pub async fn submit_state(
    State(log): State<SharedLog>,
    Json(input): Json<SubmitStateRequest>,
) -> Result<Json<SubmitStateResponse>, IngestError> {
    let state = match input.state.as_str() {
        "vibrating" => SensorState::Vibrating,
        "stationary" => SensorState::Stationary,
        _ => return Err(IngestError::InvalidState),
    };

    let observation = Observation::new(state, Utc::now());
    log.lock()
        .map_err(|_| IngestError::Internal("log lock poisoned".into()))?
        .append(observation);

    tracing::debug!(state = %state, "State submitted");

    Ok(Json(SubmitStateResponse {
        message: "State submitted",
    }))
}

/// GET /status -- trivial liveness probe for the sensor bridge.
pub async fn status() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Build the ingest router with permissive CORS and request tracing.
pub fn build_ingest_router(log: SharedLog) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/submitState", post(submit_state))
        .route("/status", get(status))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(log)
}
