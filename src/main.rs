use tokio::net::TcpListener;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod data;
mod models;
mod pages;
mod routes;
mod services;
mod state;
mod utils;

use config::DashboardConfig;
use data::Dataset;
use state::AppState;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()
            .add_directive("trade_dashboard=debug".parse().unwrap())
            .add_directive("tower_http=info".parse().unwrap()))
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("📈 Starting Außenhandel dashboard...");

    let config = DashboardConfig::from_env();
    debug!("Config: {:?}", config);

    // Load the three CSV tables once; every request reads from memory
    let dataset = match Dataset::load(&config.data_dir) {
        Ok(d) => d,
        Err(e) => {
            error!("Failed to load data: {}", e);
            return;
        }
    };

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(config, dataset);
    let app = routes::router(state);

    let listener = match TcpListener::bind(&bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind {}: {}", bind_addr, e);
            return;
        }
    };
    info!("Dashboard listening on http://{}", bind_addr);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping...");
}
