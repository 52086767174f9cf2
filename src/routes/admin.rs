use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, put},
};

/// Admin Router Module
///
/// The administration surface, nested under `/admin`. The authentication
/// layer above guarantees a resolved caller; the staff check itself runs
/// inside each handler via the shell's visibility callback, so an
/// authenticated non-staff user receives 403 rather than 401.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /admin/dashboard
        // Themed dashboard page: project name, environment badge, sidebar
        // badge for superusers.
        .route("/dashboard", get(handlers::dashboard))
        // GET /admin/cars           — full catalog, unavailable stock first.
        // POST /admin/cars          — create with field validation.
        .route(
            "/cars",
            get(handlers::admin_list_cars).post(handlers::admin_create_car),
        )
        // PUT /admin/cars/{id}
        // Partial update; only provided fields are validated and written.
        .route("/cars/{id}", put(handlers::admin_update_car))
        // Demonstration content, read-only listings.
        .route("/demo-categories", get(handlers::admin_list_demo_categories))
        .route("/demo-items", get(handlers::admin_list_demo_items))
}
