use anyhow::Context;
use tokio::net::TcpListener;

mod common;
mod config;
mod extractors;
mod logging;
mod middlewares;
mod models;
mod routes;
mod server;
mod services;
mod state;
mod utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = config::parse_config_path(std::env::args())?;
    let config = config::load(&config_path)?;
    logging::registry_logs(config.logs.level)?;
    let database_url = config.database.resolve_url(&config::root_dir(&config_path));
    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{}", addr);
    server::run_until_done(
        server::ServerArgs {
            config: &config,
            database_url,
        },
        listener,
    )
    .await
}
