use directory_portal::{
    AppState,
    admin_shell::AdminShell,
    config::AppConfig,
    create_router,
    render::{RendererState, TeraRenderer, ThemedRenderer},
    repository::{PostgresRepository, RepositoryState},
    scheduler,
};
use sqlx::postgres::PgPoolOptions;
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// The asynchronous entry point, responsible for initializing all core
/// components: configuration, logging, database, rendering, the background
/// scheduler tick, and the HTTP server.
#[tokio::main]
async fn main() {
    // 1. Configuration & environment loading (fail-fast).
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging filter setup. RUST_LOG wins; otherwise sensible defaults for
    // local development.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "directory_portal=debug,tower_http=info,axum=trace".into());

    // 3. Structured logging format selected by environment: pretty output for
    // humans, JSON for log aggregators in deployed environments.
    if config.env.is_deployed() {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 4. Database initialization (Postgres).
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.db_url)
        .await
        .expect("FATAL: Failed to connect to Postgres. Check DATABASE_URL.");

    let repo = Arc::new(PostgresRepository::new(pool)) as RepositoryState;

    // 5. Admin shell callbacks and the rendering layer: the plain engine
    // wrapped in the theming decorator, so every page carries the shell's
    // environment badge and title prefix.
    let shell = AdminShell::default();
    let tera = TeraRenderer::new().expect("FATAL: embedded templates failed to parse.");
    let renderer = Arc::new(ThemedRenderer::new(
        Arc::new(tera),
        config.project_name.clone(),
        config.env.clone(),
        shell.clone(),
    )) as RendererState;

    // 6. Background scheduler tick. No job logic is attached; the tick only
    // proves the schedule is alive.
    scheduler::spawn_heartbeat(Duration::from_secs(config.scheduler_tick_secs));

    // 7. Unified state assembly and server startup.
    let app_state = AppState {
        repo,
        renderer,
        shell,
        config,
    };

    let app = create_router(app_state);

    let listener = TcpListener::bind("0.0.0.0:8000")
        .await
        .expect("FATAL: failed to bind 0.0.0.0:8000");

    tracing::info!("HTTP server bound successfully.");
    tracing::info!("Listening on 0.0.0.0:8000");
    tracing::info!("API documentation (Swagger UI) available at: http://localhost:8000/swagger-ui");

    axum::serve(listener, app)
        .await
        .expect("FATAL: server error");
}
