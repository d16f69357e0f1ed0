use std::sync::Arc;

use innkeep_store::app_config::Config;
use innkeep_store::Database;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "innkeep_finance=debug,innkeep_store=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().expect("Failed to load config");
    tracing::info!(
        "Starting finance service, ack policy {:?}",
        config.consumer.ack_policy
    );

    let db = Arc::new(Database::connect(&config.database));

    innkeep_finance::consumer::run(&config, db).await;
}
