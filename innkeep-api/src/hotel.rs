use axum::{
    extract::{Json, State},
    http::StatusCode,
    routing::{get, post},
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
struct RoomBooked {
    message: &'static str,
    booking_id: i64,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/book", post(book_room))
        .route("/bookings", get(list_bookings))
}

/// POST /book
///
/// Same table and queue as the booking service; only the route and
/// the success message differ.
async fn book_room(
    State(state): State<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<RoomBooked>), AppError> {
    // 1. Validate required fields
    let new_booking = req
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    // 2. Persist the row
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

    info!("Room booked: {}", booking.id);

    Ok((
        StatusCode::CREATED,
        Json(RoomBooked {
            message: "Room booked successfully",
            booking_id: booking.id,
        }),
    ))
}

/// GET /bookings
async fn list_bookings(State(state): State<AppState>) -> Result<Json<Vec<Booking>>, AppError> {
    let bookings = state.bookings.list_bookings().await?;
    Ok(Json(bookings))
}
