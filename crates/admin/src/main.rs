use anyhow::{Context, Result};
use deposit_admin::{handler::AppRouter, state::AppState};
use dotenv::dotenv;
use shared::{
    config::{Config, ConnectionManager},
    utils::{Telemetry, init_logger},
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let _log_guard = init_logger("deposit-admin");

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = Telemetry::new(
        "deposit-admin",
        config.otlp_endpoint.clone(),
        config.otel_stdout,
    );
    let tracer_provider = telemetry
        .init_tracer()
        .context("Failed to initialize tracing")?;

    let pool = ConnectionManager::new_pool(&config.database_url, config.run_migrations)
        .await
        .context("Failed to initialize database pool")?;

    let state = AppState::new(pool, &config.jwt_secret, config.cookie_secure);

    if let Some((email, password)) = &config.bootstrap_admin {
        match state
            .di_container
            .auth_service
            .ensure_admin(email, password)
            .await
        {
            Ok(response) => info!("👤 {}: {}", response.message, response.data.email),
            Err(e) => error!("Failed to bootstrap administrator {email}: {}", e.message),
        }
    }

    info!("🚀 Server started successfully");

    AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server")?;

    info!("Shutting down servers...");

    if let Err(e) = tracer_provider.shutdown() {
        error!("Failed to flush traces: {e}");
    }

    Ok(())
}
