use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use disruption_server::bus::{BusConfig, DelayPublisher};
use disruption_server::directory::{DirectoryClient, DirectoryConfig, StationDirectory};
use disruption_server::enrich::{LookupClient, LookupConfig, RouteClient, RouteConfig};
use disruption_server::poll::{PollConfig, Poller};
use disruption_server::timetable::{TimetableClient, TimetableConfig};
use disruption_server::web::{AppState, create_router};

/// Postal-code prefixes used when none are configured.
const DEFAULT_ZIP_PREFIXES: &str = "50,51";

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_or_warn(name: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| {
        eprintln!("Warning: {name} not set. API calls will fail.");
        String::new()
    })
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Get credentials from environment
    let api_key = env_or_warn("DB_API_KEY");
    let client_id = env_or_warn("DB_CLIENT_ID");
    let route_api_key = env_or_warn("ROUTE_API_KEY");

    let zip_prefixes: Vec<String> = env_or("ZIP_PREFIXES", DEFAULT_ZIP_PREFIXES)
        .split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect();

    // Build the station directory (fail fast if unavailable)
    println!("Fetching station directory...");
    let directory_client = DirectoryClient::new(DirectoryConfig::new(&api_key, &client_id))
        .expect("Failed to create directory client");
    let records = directory_client
        .fetch_all()
        .await
        .expect("Failed to fetch station directory");
    let directory = Arc::new(StationDirectory::from_records(records, &zip_prefixes));
    println!(
        "Loaded {} stations for prefixes {:?}",
        directory.len(),
        zip_prefixes
    );

    // Connect to the message bus and keep the connection serviced
    let broker_host = env_or("BROKER_HOST", "localhost");
    let broker_port = env_or("BROKER_PORT", "1883")
        .parse::<u16>()
        .expect("BROKER_PORT must be a port number");
    let mut bus_config = BusConfig::new(broker_host, broker_port);
    if let (Ok(username), Ok(password)) = (
        std::env::var("BROKER_USERNAME"),
        std::env::var("BROKER_PASSWORD"),
    ) {
        bus_config = bus_config.with_credentials(username, password);
    }
    let (publisher, event_loop) = DelayPublisher::connect(&bus_config);
    let driver = publisher.clone();
    tokio::spawn(async move { driver.drive(event_loop).await });

    // Spawn the poll scheduler
    let poll_interval = env_or("POLL_INTERVAL_SECS", "300")
        .parse::<u64>()
        .expect("POLL_INTERVAL_SECS must be a number of seconds");
    let timetable_client = TimetableClient::new(TimetableConfig::new(&api_key, &client_id))
        .expect("Failed to create timetable client");
    let poller = Poller::new(
        timetable_client,
        publisher,
        directory.clone(),
        PollConfig {
            interval: Duration::from_secs(poll_interval),
        },
    );
    tokio::spawn(poller.run());

    // Build app state
    let port = env_or("PORT", "3001")
        .parse::<u16>()
        .expect("PORT must be a port number");
    let lookup_base = format!(
        "http://{}:{}",
        env_or("LOOKUP_HOST", "localhost"),
        env_or("LOOKUP_PORT", &port.to_string())
    );
    let route_client =
        RouteClient::new(RouteConfig::new(route_api_key)).expect("Failed to create route client");
    let lookup_client =
        LookupClient::new(LookupConfig::new(lookup_base)).expect("Failed to create lookup client");
    let state = AppState::new(directory, route_client, lookup_client);

    // Create router
    let app = create_router(state);

    // Bind and serve
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    println!("Disruption server listening on http://{addr}");
    println!();
    println!("Endpoints:");
    println!("  GET  /health    - Health check");
    println!("  GET  /stations  - Look up a station by name");
    println!("  GET  /route     - Plan a route with station identifiers");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
