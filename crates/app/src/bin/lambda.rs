//! Castrelay - AWS Lambda Runtime

use lambda_http::{run, Error};
use tower_http::trace::TraceLayer;
use tracing::info;

use castrelay_app::{body_limit_layer, build_cors_layer, create_app};
use castrelay_common::config::Config;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_env().map_err(|e| Error::from(format!("Config error: {}", e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&config.rust_log))
        .json()
        .without_time()
        .init();

    info!("Initializing Castrelay Lambda");

    let app =
        create_app(&config).map_err(|e| Error::from(format!("App initialization error: {}", e)))?;

    let cors_origins = config
        .cors_allowed_origins
        .as_deref()
        .ok_or_else(|| Error::from("CORS_ALLOWED_ORIGINS environment variable is required"))?;

    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(cors_origins))
        .layer(body_limit_layer());

    info!("Castrelay Lambda ready to serve requests");

    run(app).await
}
