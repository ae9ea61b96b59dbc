/**
 * Legacy Ledger Server Entry Point
 *
 * Loads `.env`, initializes tracing, reads configuration from the
 * environment and serves the account API.
 */

#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use legacy_ledger::backend::routes::create_router;
    use legacy_ledger::backend::server::{config::warm_up, create_state};
    use legacy_ledger::shared::AppConfig;

    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    // RUST_LOG overrides; info by default
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!("Server initialization started");

    let config = AppConfig::from_env()?;
    tracing::debug!("Configuration: {:?}", config);

    let app_state = create_state(&config)?;
    warm_up(&app_state.accounts).await;
    let app = create_router(app_state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(not(feature = "ssr"))]
fn main() {
    eprintln!("Server requires the 'ssr' feature to be enabled.");
    eprintln!("Run with: cargo run --bin legacy-ledger-server --features ssr");
    std::process::exit(1);
}
