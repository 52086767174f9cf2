use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod admin_shell;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod render;
pub mod repository;
pub mod scheduler;
pub mod validators;

// Module for routing segregation (Web, API, Admin).
pub mod routes;
use auth::AuthUser; // The resolved authenticated user identity.
use routes::{admin, api, web};

// --- Public Re-exports ---

// Makes core state types easily accessible to the main entry point and tests.
pub use admin_shell::AdminShell;
pub use config::{AppConfig, Environment};
pub use render::{Renderer, RendererState, TeraRenderer, ThemedRenderer};
pub use repository::{InMemoryRepository, PostgresRepository, RepositoryState};

/// ApiDoc
///
/// Auto-generates the OpenAPI documentation (Swagger JSON) for the JSON
/// surface, aggregating the paths and schemas decorated with `#[utoipa::path]`
/// and `#[derive(utoipa::ToSchema)]`. Served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::api_list_public_users, handlers::api_get_public_user,
        handlers::admin_list_cars, handlers::admin_create_car, handlers::admin_update_car,
        handlers::admin_list_demo_categories, handlers::admin_list_demo_items
    ),
    components(
        schemas(
            models::PublicUser, models::Car, models::CreateCarRequest,
            models::UpdateCarRequest, models::DemoCategory, models::DemoItem,
        )
    ),
    tags(
        (name = "directory-portal", description = "User directory and catalog API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, thread-safe, immutable container holding all essential
/// application services and configuration, shared across all requests.
#[derive(Clone)]
pub struct AppState {
    /// Repository layer: abstracts data access behind `Arc<dyn Repository>`.
    pub repo: RepositoryState,
    /// Rendering layer: themed template rendering behind `Arc<dyn Renderer>`.
    pub renderer: RendererState,
    /// Typed admin-shell callbacks (badge, visibility, environment).
    pub shell: AdminShell,
    /// The loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// Allow handlers and extractors to selectively pull components from the
// shared AppState.

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for RendererState {
    fn from_ref(app_state: &AppState) -> RendererState {
        app_state.renderer.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// Enforces authentication for the API and admin routers. `AuthUser`
/// implements `FromRequestParts`, so a failed extraction rejects the request
/// with 401 before the handler runs; a successful one lets it proceed.
async fn auth_middleware(_auth_user: AuthUser, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles the application's entire routing structure, applies global and
/// scoped middleware, and registers the shared state. This is the one place
/// routes are registered; each mount happens exactly once per call, so there
/// is no import-order or double-registration hazard.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    // Header name constant for request correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    // Server-rendered pages: always mounted at the root; additionally mounted
    // under the locale prefix when locale-prefixed routing is enabled.
    let mut pages = web::web_routes();
    if state.config.locale_prefix {
        pages = pages.nest(
            &format!("/{}", state.config.default_locale),
            web::web_routes(),
        );
    }

    let base_router = Router::new()
        // Documentation: auto-generated Swagger UI for the JSON surface.
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Web pages: anonymous, read-only.
        .merge(pages)
        // JSON API: protected by the auth middleware layer.
        .merge(api::api_routes().route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        )))
        // Admin surface: nested under '/admin'. Authentication happens in the
        // layer; the staff check happens inside the handlers.
        .nest(
            "/admin",
            admin::admin_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                auth_middleware,
            )),
        )
        .with_state(state);

    // Observability and correlation layers, applied outermost.
    base_router
        .layer(
            ServiceBuilder::new()
                // Request ID generation: a unique UUID per incoming request.
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                // Request tracing: wraps the request/response lifecycle in a
                // span carrying the generated request id.
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                // Request ID propagation back to the client.
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Customizes `TraceLayer` span creation: includes the `x-request-id` header
/// (when present) alongside the HTTP method and URI so every log line of a
/// request shares one correlation id.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
