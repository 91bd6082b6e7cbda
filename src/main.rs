use std::net::SocketAddr;

use anyhow::Context;
use dotenvy::dotenv;

use campus::logging::init_tracing;
use campus::router::init_router;
use campus::state::init_app_state;
use campus_config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _log_guard = init_tracing()?;

    let state = init_app_state().await?;
    let server = ServerConfig::from_env();
    let app = init_router(state);

    let address = server.address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    tracing::info!(address = %address, "server listening");
    tracing::info!("Swagger UI available at http://{}/swagger-ui", address);
    tracing::info!("Scalar UI available at http://{}/scalar", address);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
