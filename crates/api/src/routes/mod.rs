pub mod appliance;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// All application routes. Mounted at the root to stay
/// wire-compatible with the sensor bridge and dashboard clients.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(appliance::router())
        .merge(users::router())
}
