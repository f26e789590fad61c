use tracing::info;

mod admin;
mod app;
mod auth;
mod config;
mod errors;
mod jobs;
mod mentor;
mod ratings;
mod state;

use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "careermind=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let app_state = AppState::init().await?;

    sqlx::migrate!("./migrations").run(&app_state.db).await?;

    // Idempotent: inserts the reserved admin identity only when missing.
    auth::services::seed_admin(&app_state.db, &app_state.config.admin).await?;
    info!(email = %app_state.config.admin.email, "admin identity ensured");

    let app = app::build_app(app_state);
    app::serve(app).await
}
