use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// API Router Module
///
/// The read-only JSON surface. The whole router is wrapped in the
/// authentication layer in `create_router`, so unauthenticated callers are
/// rejected with 401 before any handler runs. No write operations exist here.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // GET /api/public-users/
        // The user directory projected to {id, email, name}, id ascending.
        .route("/api/public-users/", get(handlers::api_list_public_users))
        // GET /api/public-users/{id}/
        // Single projected record; 404 when the id is unknown.
        .route("/api/public-users/{id}/", get(handlers::api_get_public_user))
}
