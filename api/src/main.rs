use actix_web::HttpServer;
use anyhow::Context;
use tracing::info;

use mt_api::{create_app, startup, telemetry};
use mt_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;
    telemetry::init_tracing(&config.logging);

    info!(
        environment = %config.environment,
        "Starting admin backend API"
    );
    if config.otp.expose_code_in_response {
        tracing::warn!("OTP codes are echoed in API responses");
    }

    let (state, pool) = startup::build_state(&config).await?;

    let bind_address = config.server.bind_address();
    let cors = config.cors.clone();
    let max_payload_size = config.server.max_payload_size;
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || create_app(state.clone(), &cors, max_payload_size));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await?;

    pool.close().await;
    info!("Server stopped");
    Ok(())
}
