//! Keygate authentication server

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use keygate_server::{db, routes, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in development; real deployments set the environment
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("keygate_server=info,tower_http=info")),
        )
        .with(tracing_subscriber::fmt::layer().compact())
        .init();

    // A missing or weak JWT_SECRET aborts startup here, before anything
    // binds or connects
    let config = Config::from_env().context("invalid configuration")?;

    let pool = db::create_pool(&config.database_url)
        .await
        .context("failed to connect to database")?;
    db::run_migrations(&pool)
        .await
        .context("failed to run migrations")?;

    let bind_address = config.bind_address.clone();
    let state = AppState::new(config, pool);
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;
    tracing::info!(%bind_address, "keygate server listening");

    axum::serve(listener, app)
        .await
        .context("server exited with error")?;

    Ok(())
}
