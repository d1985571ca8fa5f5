//! User display info for the dashboard.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;
use crate::users::UserProfile;

#[derive(Serialize)]
struct UserNamesResponse {
    user1: UserProfile,
    user2: UserProfile,
}

/// GET /users/names -- names and accent colors for both users.
async fn user_names(State(state): State<AppState>) -> Json<UserNamesResponse> {
    Json(UserNamesResponse {
        user1: state.config.user1.clone(),
        user2: state.config.user2.clone(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/users/names", get(user_names))
}
