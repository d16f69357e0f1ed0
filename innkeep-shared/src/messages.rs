//! Wire messages exchanged over the queues. JSON-encoded, no
//! envelope; consumers rely on these exact field names.

/// Snapshot of a booking, published to the finance queue after the
/// row is written. `booking_id` is the store-assigned id.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct BookingEvent {
    pub room_id: i64,
    pub guest_name: String,
    pub booking_id: i64,
}

/// Snapshot of a customer, published to the customer queue.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct CustomerEvent {
    pub customer_id: i64,
    pub name: String,
    pub email: String,
}
