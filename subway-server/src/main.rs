use tracing::info;
use tracing_subscriber::EnvFilter;

use subway_server::config::ServerConfig;
use subway_server::network::SubwayNetwork;
use subway_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    let config = ServerConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(2);
    });

    // RUST_LOG takes precedence over the configured filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let network = if config.seed_demo {
        SubwayNetwork::demo().expect("Failed to build demo network")
    } else {
        SubwayNetwork::new()
    };
    info!(
        stations = network.stations().count(),
        lines = network.lines().count(),
        "network loaded"
    );

    let app = create_router(AppState::new(network));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listener");
    info!(addr = %config.bind_addr, "subway server listening");
    info!("  GET    /health");
    info!("  GET    /stations, POST /stations, DELETE /stations/:id");
    info!("  GET    /lines, POST /lines, GET|PUT|DELETE /lines/:id");
    info!("  GET    /lines/:id/sections, POST /lines/:id/sections");
    info!("  DELETE /lines/:id/sections?stationId=N");

    axum::serve(listener, app).await.expect("Server error");
}
