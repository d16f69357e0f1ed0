use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::get,
    Router,
};
use serde::Serialize;
use tracing::info;

use innkeep_core::booking::{Booking, CreateBookingRequest};
use innkeep_shared::topics::FINANCE_QUEUE;

use crate::error::AppError;
use crate::publish_event;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct BookingCreated {
    message: &'static str,
    booking_id: i64,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/bookings", get(list_bookings).post(create_booking))
}

/// POST /bookings
async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingCreated>), AppError> {
    // 1. Validate required fields
    let new_booking = req
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    // 2. Persist the row; the id comes back from the store
    let id = state.bookings.insert_booking(&new_booking).await?;
    let booking = Booking {
        id,
        room_id: new_booking.room_id,
        guest_name: new_booking.guest_name,
    };

    // 3. Publish the event; delivery failures never fail the request
    publish_event(
        state.events.as_ref(),
        FINANCE_QUEUE,
        &booking.id.to_string(),
        &booking.as_event(),
    )
    .await;

    info!("Booking created: {}", booking.id);

    Ok((
        StatusCode::CREATED,
        Json(BookingCreated {
            message: "Booking created successfully",
            booking_id: booking.id,
        }),
    ))
}

/// GET /bookings
async fn list_bookings(State(state): State<AppState>) -> Result<Json<Vec<Booking>>, AppError> {
    let bookings = state.bookings.list_bookings().await?;
    Ok(Json(bookings))
}
