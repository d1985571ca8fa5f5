//! Per-appliance agent status endpoints.
//!
//! ```text
//! GET  /{appliance}/getAgentStatus -> current monitor/idle state
//! POST /{appliance}/setAgentStatus -> arm monitoring or mark idle
//! ```
//!
//! The camelCase paths are kept wire-compatible with the existing
//! sensor bridge and dashboard clients.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use spindown_core::error::CoreError;
use spindown_core::types::{AgentState, Appliance};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `setAgentStatus`. The status arrives as a raw
/// string so an unknown value can be answered with a 400 and a
/// helpful message rather than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct SetAgentStatusRequest {
    pub status: String,
    #[serde(default)]
    pub user: Option<String>,
}

#[derive(Debug, Serialize)]
struct SetAgentStatusResponse {
    message: &'static str,
    status: String,
    user: String,
}

fn parse_appliance(segment: &str) -> AppResult<Appliance> {
    segment
        .parse::<Appliance>()
        .map_err(|_| AppError::NotFound(format!("Unknown appliance: '{segment}'")))
}

/// GET /{appliance}/getAgentStatus
///
/// Returns `{ status, user }`; `user` is empty whenever the appliance
/// is idle.
pub async fn get_agent_status(
    State(state): State<AppState>,
    Path(appliance): Path<String>,
) -> AppResult<impl IntoResponse> {
    let appliance = parse_appliance(&appliance)?;

    let current = state
        .registry
        .read()
        .map_err(|_| CoreError::Internal("registry lock poisoned".into()))?
        .get(appliance);

    Ok(Json(current))
}

/// POST /{appliance}/setAgentStatus
///
/// `monitor` requires a non-empty `user`; `idle` clears the user and
/// is safe to call redundantly.
pub async fn set_agent_status(
    State(state): State<AppState>,
    Path(appliance): Path<String>,
    Json(input): Json<SetAgentStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let appliance = parse_appliance(&appliance)?;

    let result: AgentState = {
        let mut registry = state
            .registry
            .write()
            .map_err(|_| CoreError::Internal("registry lock poisoned".into()))?;

        match input.status.as_str() {
            "monitor" => registry.set_monitor(appliance, input.user.as_deref().unwrap_or(""))?,
            "idle" => registry.set_idle(appliance),
            _ => {
                return Err(AppError::BadRequest(
                    "Status must be 'monitor' or 'idle'".into(),
                ))
            }
        }
    };

    tracing::info!(
        appliance = %appliance,
        status = %result.status,
        user = %result.user,
        "Agent status set",
    );

    Ok(Json(SetAgentStatusResponse {
        message: "Agent status set successfully",
        status: result.status.to_string(),
        user: result.user,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{appliance}/getAgentStatus", get(get_agent_status))
        .route("/{appliance}/setAgentStatus", post(set_agent_status))
}
