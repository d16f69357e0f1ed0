//! In-memory doubles and request helpers for router tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;

use innkeep_core::booking::{Booking, NewBooking};
use innkeep_core::customer::{Customer, NewCustomer};
use innkeep_core::repository::{BookingStore, CustomerStore, EventPublisher};
use innkeep_core::{EventError, StoreError};

use crate::state::AppState;

/// Store double backed by vectors, assigning ids the way the real
/// store does. `fail` forces query errors; `connected = false`
/// mimics the supervised handle before its pool arrives.
pub struct MemoryStore {
    pub bookings: Mutex<Vec<Booking>>,
    pub customers: Mutex<Vec<Customer>>,
    fail: bool,
    connected: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            bookings: Mutex::new(Vec::new()),
            customers: Mutex::new(Vec::new()),
            fail: false,
            connected: true,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn disconnected() -> Self {
        Self {
            connected: false,
            ..Self::new()
        }
    }

    fn check(&self) -> Result<(), StoreError> {
        if !self.connected {
            return Err(StoreError::Unavailable);
        }
        if self.fail {
            return Err(StoreError::Query("forced failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    async fn insert_booking(&self, booking: &NewBooking) -> Result<i64, StoreError> {
        self.check()?;
        let mut bookings = self.bookings.lock().unwrap();
        let id = bookings.len() as i64 + 1;
        bookings.push(Booking {
            id,
            room_id: booking.room_id,
            guest_name: booking.guest_name.clone(),
        });
        Ok(id)
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>, StoreError> {
        self.check()?;
        Ok(self.bookings.lock().unwrap().clone())
    }

    async fn is_connected(&self) -> bool {
        self.connected
    }
}

#[async_trait]
impl CustomerStore for MemoryStore {
    async fn insert_customer(&self, customer: &NewCustomer) -> Result<i64, StoreError> {
        self.check()?;
        let mut customers = self.customers.lock().unwrap();
        let id = customers.len() as i64 + 1;
        customers.push(Customer {
            id,
            name: customer.name.clone(),
            email: customer.email.clone(),
        });
        Ok(id)
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, StoreError> {
        self.check()?;
        Ok(self.customers.lock().unwrap().clone())
    }

    async fn is_connected(&self) -> bool {
        self.connected
    }
}

/// Publisher double recording every accepted message as
/// `(topic, key, payload)`.
pub struct RecordingPublisher {
    pub published: Mutex<Vec<(String, String, String)>>,
    ready: bool,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            ready: true,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            ready: false,
            ..Self::new()
        }
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, topic: &str, key: &str, payload: &str) -> Result<(), EventError> {
        if !self.ready {
            return Err(EventError::NotReady);
        }
        self.published.lock().unwrap().push((
            topic.to_string(),
            key.to_string(),
            payload.to_string(),
        ));
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}

pub fn test_state(store: Arc<MemoryStore>, events: Arc<RecordingPublisher>) -> AppState {
    AppState {
        bookings: store.clone(),
        customers: store,
        events,
    }
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn read_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
