use async_trait::async_trait;

use crate::booking::{Booking, NewBooking};
use crate::customer::{Customer, NewCustomer};
use crate::finance::FinanceRecord;
use crate::{EventError, StoreError};

/// Booking table access.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Inserts a row and returns the store-assigned id.
    async fn insert_booking(&self, booking: &NewBooking) -> Result<i64, StoreError>;

    async fn list_bookings(&self) -> Result<Vec<Booking>, StoreError>;

    /// Whether the supervised connection is currently established.
    async fn is_connected(&self) -> bool;
}

/// Customer table access.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Inserts a row and returns the store-assigned id.
    async fn insert_customer(&self, customer: &NewCustomer) -> Result<i64, StoreError>;

    async fn list_customers(&self) -> Result<Vec<Customer>, StoreError>;

    /// Whether the supervised connection is currently established.
    async fn is_connected(&self) -> bool;
}

/// Finance table access, used by the queue consumer.
#[async_trait]
pub trait FinanceStore: Send + Sync {
    /// Inserts a charge and returns the persisted row.
    async fn insert_charge(&self, booking_id: i64, amount: i64)
        -> Result<FinanceRecord, StoreError>;

    /// Inserts a charge unless one already exists for `booking_id`.
    /// Returns the new row, or `None` when a charge was already there.
    async fn insert_charge_once(
        &self,
        booking_id: i64,
        amount: i64,
    ) -> Result<Option<FinanceRecord>, StoreError>;
}

/// Queue producer seam. The production implementation fronts a Kafka
/// producer behind a supervised topic declaration.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, topic: &str, key: &str, payload: &str) -> Result<(), EventError>;

    /// Whether the queue side will currently accept publishes.
    fn is_ready(&self) -> bool;
}
