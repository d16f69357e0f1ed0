use std::net::SocketAddr;
use std::sync::Arc;

use innkeep_api::{customer_app, AppState};
use innkeep_shared::topics::CUSTOMER_QUEUE;
use innkeep_store::app_config::Config;
use innkeep_store::{Database, EventProducer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PORT: u16 = 5003;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "innkeep_api=debug,innkeep_store=debug,tower_http=debug,axum::rejection=trace"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().expect("Failed to load config");
    let port = config.server.port.unwrap_or(DEFAULT_PORT);
    tracing::info!("Starting customer service on port {}", port);

    let db = Arc::new(Database::connect(&config.database));

    let producer = EventProducer::new(&config.queue.brokers, &[CUSTOMER_QUEUE])
        .expect("Failed to create queue producer");

    let state = AppState {
        bookings: db.clone(),
        customers: db,
        events: Arc::new(producer),
    };

    let app = customer_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind port");
    axum::serve(listener, app).await.expect("Server error");
}
