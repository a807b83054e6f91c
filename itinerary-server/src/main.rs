use tracing::info;
use tracing_subscriber::EnvFilter;

use itinerary_server::catalog;
use itinerary_server::config::AppConfig;
use itinerary_server::planner::SearchConfig;
use itinerary_server::sessions::SessionConfig;
use itinerary_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    // Load the catalog (fail fast if unreadable)
    let catalog = catalog::load_file(&config.data_file).expect("Failed to import catalog");
    info!(
        file = %config.data_file.display(),
        services = catalog.network.len(),
        passengers = catalog.passengers.len(),
        "catalog loaded"
    );

    let state = AppState::from_catalog(catalog, SearchConfig::default(), &SessionConfig::default());
    let app = create_router(state);

    info!(addr = %config.addr, "itinerary planner listening");
    info!("  GET  /health");
    info!("  GET  /services, /services/:id");
    info!("  GET  /stations/:station/departures, /stations/:station/arrivals");
    info!("  GET  /passengers, /passengers/:id, /passengers/:id/itineraries");
    info!("  POST /passengers, /itineraries/search, /itineraries/commit");

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
