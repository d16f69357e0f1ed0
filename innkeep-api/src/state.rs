use std::sync::Arc;

use innkeep_core::repository::{BookingStore, CustomerStore, EventPublisher};

/// Handles shared by every handler. Trait objects so tests can swap
/// the supervised store and producer for in-memory doubles.
#[derive(Clone)]
pub struct AppState {
    pub bookings: Arc<dyn BookingStore>,
    pub customers: Arc<dyn CustomerStore>,
    pub events: Arc<dyn EventPublisher>,
}
