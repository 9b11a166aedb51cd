//! Catalog HTTP/JSON Gateway binary.

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use catalogo_gateway::{create_router, AppState, Args, GatewayConfig};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_filter = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("catalogo_gateway={log_filter},catalogo_core={log_filter},tower_http=info")
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GatewayConfig::from(&args);

    info!(
        listen = %config.listen_addr,
        store = ?config.store,
        results = %config.results_path.display(),
        demo = config.demo,
        "Starting catalog gateway"
    );

    let state = AppState::open(config.clone())?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!("Gateway listening on {}", config.listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
