//! Bookshelf API server. Configuration comes from the environment (and `.env`).

use bookshelf_api::{app, AppConfig, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("bookshelf_api=info".parse()?))
        .init();

    let config = AppConfig::from_env()?;
    let state = AppState::connect(&config).await?;
    let router = app(state, config.server.max_body_bytes);

    let listener = TcpListener::bind(config.server.address()).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
