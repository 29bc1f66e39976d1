use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use transit_server::cache::CachedSchedule;
use transit_server::config::{ServerConfig, StoreBackend};
use transit_server::schedule::ProjectionConfig;
use transit_server::store::{
    MockScheduleStore, ScheduleClient, ScheduleClientConfig, ScheduleSource,
};
use transit_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().expect("Invalid configuration");

    // Create the schedule source
    let source = match &config.backend {
        StoreBackend::Http {
            base_url,
            api_key,
            timeout_secs,
            max_concurrent,
        } => {
            if api_key.is_empty() {
                warn!("SCHEDULE_API_KEY not set. Store requests will likely be rejected.");
            }
            let mut client_config = ScheduleClientConfig::new(api_key).with_base_url(base_url);
            if let Some(secs) = timeout_secs {
                client_config = client_config.with_timeout(*secs);
            }
            if let Some(n) = max_concurrent {
                client_config = client_config.with_max_concurrent(*n);
            }
            let client = ScheduleClient::new(client_config).expect("Failed to create store client");
            info!(%base_url, "reading schedules from store");
            ScheduleSource::Http(client)
        }
        StoreBackend::Mock { path } => {
            let store = MockScheduleStore::from_file(path).expect("Failed to load mock data");
            info!(path = %path.display(), "reading schedules from fixture");
            ScheduleSource::Mock(store)
        }
    };

    let schedule = CachedSchedule::new(source, &config.cache);

    // Warm the route cache. The server still starts if the store is down.
    match schedule.routes().await {
        Ok(routes) => info!(count = routes.len(), "loaded routes"),
        Err(e) => warn!(error = %e, "could not load routes at start-up"),
    }

    let state = AppState::new(schedule, ProjectionConfig::default(), config.timezone);
    let app = create_router(state, &config.static_dir);

    info!(addr = %config.bind, timezone = %config.timezone, "Kadirli transit server listening");
    info!("  GET  /health                          - Health check");
    info!("  GET  /api/routes                      - Routes and stops");
    info!("  GET  /api/routes/:id/board            - Arrivals at every stop");
    info!("  GET  /api/routes/:id/stops/:stop_id   - Arrivals at one stop");
    info!("  GET  /api/routes/:id/nearest          - Nearest stop and next bus");
    info!("  GET  /api/intercity                   - Intercity departures");

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app).await.expect("Server error");
}
