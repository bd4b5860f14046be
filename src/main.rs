use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing::info;

use question_service::api::{create_router, serve, shutdown_signal};
use question_service::app::AppState;
use question_service::config::AppConfig;
use question_service::domain::QuestionRepository;
use question_service::infra::{MIGRATOR, SqliteConfig, SqliteQuestionRepository, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = AppConfig::from_env().context("invalid configuration")?;
    init_tracing(config.log_format).context("failed to install tracing subscriber")?;

    let repo = SqliteQuestionRepository::new(
        &config.database_url,
        SqliteConfig {
            max_connections: config.database_max_connections,
            ..SqliteConfig::default()
        },
    )
    .await
    .with_context(|| format!("failed to open database at {}", config.database_url))?;

    repo.run_migrations(&MIGRATOR)
        .await
        .context("failed to run migrations")?;
    repo.health_check().await.context("database health check failed")?;

    let repo = Arc::new(repo);
    let app_state = Arc::new(AppState::new(repo.clone()));
    let router = create_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, database = %config.database_url, "Server starting");

    serve(listener, router, shutdown_signal(), config.shutdown_timeout)
        .await
        .context("server error")?;

    repo.close().await;
    info!("Server stopped");

    Ok(())
}
