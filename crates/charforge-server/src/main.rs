//! HTTP server entry point.

use anyhow::Result;
use charforge_server::{build_router, RelayConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".parse().unwrap()),
        )
        .compact()
        .init();

    let config = RelayConfig::from_env()?;
    let addr = config.bind_addr.clone();

    info!("Starting relay server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, build_router(config)).await?;

    Ok(())
}
