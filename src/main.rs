use anyhow::Context;
use dotenvy::dotenv;
use tracing::info;

use jobboard::logging::init_tracing;
use jobboard::router::init_router;
use jobboard::state::init_app_state;
use jobboard_config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let server_config = ServerConfig::from_env();
    init_tracing(&server_config.log_dir)?;

    let state = init_app_state().await?;
    let app = init_router(state);

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!(address = %address, "Server running");
    info!("Swagger UI available at http://{address}/swagger-ui");
    info!("Scalar UI available at http://{address}/scalar");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
