use anyhow::Context;
use dotenvy::dotenv;
use filmoteka::config::settings::AppConfig;
use filmoteka::infrastructure::{db, logging};
use filmoteka::{app, state::AppState};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = AppConfig::new().context("missing required configuration")?;
    logging::init(config.app_env);

    info!(env = ?config.app_env, "Starting server...");

    let pool = db::pool::connect_to_db(&config.database_url, config.database_max_connections)
        .await
        .context("failed to connect to PostgreSQL")?;
    db::pool::run_migrations(&pool)
        .await
        .context("failed to apply migrations")?;

    let addr = format!("{}:{}", config.server_host, config.server_port);
    let app = app::create_app(AppState::new(&config, pool)).await;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server running on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on SIGINT or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
