use crate::config::{AdminConfig, Config};
use crate::services::registry::UserDirectory;
use crate::{routes, state};
use anyhow::Context;
use sqlx::migrate::Migrator;
use sqlx::sqlite;
use std::str::FromStr;
use tokio::{net::TcpListener, signal, task::JoinSet};
use tokio_util::sync::CancellationToken;

pub struct ServerArgs<'a> {
    pub config: &'a Config,
    /// Already resolved against the configuration directory.
    pub database_url: String,
}

pub static MIGRATOR: Migrator = sqlx::migrate!();

async fn connect_database(database_url: &str) -> anyhow::Result<sqlx::SqlitePool> {
    let options = sqlite::SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Failed to parse SQLite url: '{}'", database_url))?
        .create_if_missing(true);
    let pool = sqlx::SqlitePool::connect_with(options)
        .await
        .with_context(|| format!("Failed to connect to SQLite database: {}", database_url))?;
    MIGRATOR
        .run(&pool)
        .await
        .with_context(|| "Failed to apply database migrations")?;
    Ok(pool)
}

/// Creates the configured administrator unless the username already exists.
async fn ensure_admin(state: &state::AppState, admin: &AdminConfig) -> anyhow::Result<()> {
    let username = admin.username.trim();
    if let Some(existing) = state
        .user_service
        .find_by_username(username)
        .await
        .map_err(|err| anyhow::anyhow!("Failed to look up admin account: {err}"))?
    {
        if !existing.is_admin {
            tracing::warn!(
                user = %existing.id,
                "configured admin username belongs to a non-admin account"
            );
        }
        return Ok(());
    }
    let hash = state.password_service.hash(&admin.password)?;
    let user = state
        .user_service
        .create(username, &hash, true)
        .await
        .map_err(|err| anyhow::anyhow!("Failed to create admin account: {err}"))?;
    tracing::info!(user = %user.id, "bootstrap admin account created");
    Ok(())
}

pub async fn run_until_done(args: ServerArgs<'_>, bind: TcpListener) -> anyhow::Result<()> {
    let mut join_set = JoinSet::new();
    let shutdown_signal = CancellationToken::new();
    let pool = connect_database(&args.database_url).await?;
    let state = state::AppState::build(pool, &args.config.authorize)?;
    if let Some(admin) = &args.config.admin {
        ensure_admin(&state, admin).await?;
    }
    // register ctrl+c signal
    {
        let shutdown_signal = shutdown_signal.clone();
        join_set.spawn(async move {
            signal::ctrl_c().await?;
            tracing::debug!("Received Ctrl+C, start terminating");
            shutdown_signal.cancel();
            anyhow::Ok(())
        });
    }
    // register sigterm signal
    #[cfg(unix)]
    {
        let shutdown_signal = shutdown_signal.clone();
        join_set.spawn(async move {
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;
            sigterm.recv().await;
            tracing::debug!("Received SIGTERM signal, start terminating");
            shutdown_signal.cancel();
            anyhow::Ok(())
        });
    }
    // axum serve
    {
        let shutdown_signal = shutdown_signal.clone();
        axum::serve(bind, routes::build(state))
            .with_graceful_shutdown(async move {
                shutdown_signal.cancelled().await;
            })
            .await
            .with_context(|| "Server terminated unexpectedly")?;
    }
    join_set.shutdown().await;
    tracing::info!("Server stopped");
    Ok(())
}
