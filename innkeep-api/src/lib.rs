use axum::http::Method;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use innkeep_core::repository::EventPublisher;

pub mod bookings;
pub mod customers;
pub mod error;
pub mod health;
pub mod hotel;
pub mod state;

#[cfg(test)]
mod test_support;

pub use state::AppState;

/// Booking service surface: create and list bookings.
pub fn booking_app(state: AppState) -> Router {
    with_layers(bookings::routes().merge(health::routes()), state)
}

/// Hotel service surface: same table as bookings, `/book` spelling.
pub fn hotel_app(state: AppState) -> Router {
    with_layers(hotel::routes().merge(health::routes()), state)
}

/// Customer service surface.
pub fn customer_app(state: AppState) -> Router {
    with_layers(customers::routes().merge(health::routes()), state)
}

fn with_layers(router: Router<AppState>, state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serializes and publishes an event, discarding the outcome. A
/// producer endpoint never fails its request over the queue; delivery
/// problems only show up in the logs.
pub async fn publish_event<T: serde::Serialize>(
    events: &dyn EventPublisher,
    topic: &str,
    key: &str,
    event: &T,
) {
    match serde_json::to_string(event) {
        Ok(payload) => {
            let _ = events.publish(topic, key, &payload).await;
        }
        Err(e) => {
            tracing::error!("Failed to encode event for {}: {}", topic, e);
        }
    }
}
