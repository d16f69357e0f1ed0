use serde::{Deserialize, Serialize};

use crate::ValidationError;
use innkeep_shared::messages::BookingEvent;

/// A persisted booking row. Ids are store-assigned and never reused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub room_id: i64,
    pub guest_name: String,
}

impl Booking {
    /// Snapshot published to the finance queue once the row exists.
    pub fn as_event(&self) -> BookingEvent {
        BookingEvent {
            room_id: self.room_id,
            guest_name: self.guest_name.clone(),
            booking_id: self.id,
        }
    }
}

/// Validated insert payload, produced by [`CreateBookingRequest::validate`].
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub room_id: i64,
    pub guest_name: String,
}

/// Incoming create payload. Fields are optional so that a missing
/// field surfaces as a 400 with the contract message rather than a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub room_id: Option<i64>,
    pub guest_name: Option<String>,
}

impl CreateBookingRequest {
    /// Checks both required fields are present. A blank guest name
    /// counts as missing.
    pub fn validate(self) -> Result<NewBooking, ValidationError> {
        match (self.room_id, self.guest_name) {
            (Some(room_id), Some(guest_name)) if !guest_name.trim().is_empty() => {
                Ok(NewBooking { room_id, guest_name })
            }
            _ => Err(ValidationError("room_id and guest_name are required")),
        }
    }
}
