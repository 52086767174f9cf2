use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Web Router Module
///
/// Unauthenticated, read-only HTML endpoints. Trailing slashes are part of
/// the route contract and are kept literal. Each call returns a fresh router,
/// so the same page set can be mounted more than once (plain and
/// locale-prefixed) without shared registration state.
pub fn web_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Unauthenticated liveness check for monitors and load balancers.
        .route("/health", get(|| async { "ok" }))
        // GET /people/
        // Full-page user listing, one row per directory record, no pagination.
        .route("/people/", get(handlers::people))
        // GET /htmx/user-row/{pk}/
        // One-row fragment for in-place swaps; 404 on unknown pk.
        .route("/htmx/user-row/{pk}/", get(handlers::user_row_partial))
        // GET /cars?transmission=...&page=...
        // Paginated catalog listing; fragment-only response when the request
        // carries the HX-Request header.
        .route("/cars", get(handlers::cars_index))
}
