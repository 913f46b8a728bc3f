//! Risk decision API server
//!
//! Serves lending decisions over HTTP. Holds no per-applicant state and can be
//! horizontally scaled.

use dotenvy::dotenv;
use riskgate::config::ServiceConfig;
use riskgate::core::http::start_server;
use riskgate::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load environment variables from .env if present
    dotenv().ok();

    // Initialize logging based on environment
    logging::init_logging();

    let config = ServiceConfig::from_env().map_err(|e| {
        error!(error = %e, "Invalid configuration, refusing to start");
        e
    })?;

    info!("Starting risk decision API server");
    info!(environment = %config.environment, "Environment");
    info!(
        scorer_timeout_ms = config.engine.scorer_timeout.as_millis() as u64,
        credit_scorer = %config.endpoints.credit,
        fraud_scorer = %config.endpoints.fraud,
        aml_scorer = %config.endpoints.aml,
        "Scorer configuration validated"
    );
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
