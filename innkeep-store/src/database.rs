use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::RwLock;

use innkeep_core::booking::{Booking, NewBooking};
use innkeep_core::customer::{Customer, NewCustomer};
use innkeep_core::finance::FinanceRecord;
use innkeep_core::repository::{BookingStore, CustomerStore, FinanceStore};
use innkeep_core::StoreError;

use crate::app_config::DatabaseConfig;
use crate::supervisor::connect_with_retry;

/// Supervised handle to the relational store. The handle starts
/// empty; a background task fills in the pool once a connection
/// succeeds. Operations invoked before that fail with
/// [`StoreError::Unavailable`] instead of crashing the process.
#[derive(Clone)]
pub struct Database {
    pool: Arc<RwLock<Option<PgPool>>>,
}

impl Database {
    /// Creates the handle and spawns the connect supervisor.
    pub fn connect(config: &DatabaseConfig) -> Self {
        let db = Self {
            pool: Arc::new(RwLock::new(None)),
        };

        let url = config.url();
        let handle = db.pool.clone();
        tokio::spawn(async move {
            let pool = connect_with_retry("database", || {
                PgPoolOptions::new()
                    .max_connections(5)
                    .acquire_timeout(Duration::from_secs(3))
                    .connect(&url)
            })
            .await;
            *handle.write().await = Some(pool);
        });

        db
    }

    async fn pool(&self) -> Result<PgPool, StoreError> {
        self.pool.read().await.clone().ok_or(StoreError::Unavailable)
    }
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct BookingRow {
    id: i64,
    room_id: i64,
    guest_name: String,
}

impl From<BookingRow> for Booking {
    fn from(row: BookingRow) -> Self {
        Self {
            id: row.id,
            room_id: row.room_id,
            guest_name: row.guest_name,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: i64,
    name: String,
    email: String,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
        }
    }
}

#[async_trait]
impl BookingStore for Database {
    async fn insert_booking(&self, booking: &NewBooking) -> Result<i64, StoreError> {
        let pool = self.pool().await?;

        let id: (i64,) = sqlx::query_as(
            "INSERT INTO bookings (room_id, guest_name) VALUES ($1, $2) RETURNING id",
        )
        .bind(booking.room_id)
        .bind(&booking.guest_name)
        .fetch_one(&pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(id.0)
    }

    async fn list_bookings(&self) -> Result<Vec<Booking>, StoreError> {
        let pool = self.pool().await?;

        let rows: Vec<BookingRow> =
            sqlx::query_as("SELECT id, room_id, guest_name FROM bookings")
                .fetch_all(&pool)
                .await
                .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn is_connected(&self) -> bool {
        self.pool.read().await.is_some()
    }
}

#[async_trait]
impl CustomerStore for Database {
    async fn insert_customer(&self, customer: &NewCustomer) -> Result<i64, StoreError> {
        let pool = self.pool().await?;

        let id: (i64,) =
            sqlx::query_as("INSERT INTO customers (name, email) VALUES ($1, $2) RETURNING id")
                .bind(&customer.name)
                .bind(&customer.email)
                .fetch_one(&pool)
                .await
                .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(id.0)
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, StoreError> {
        let pool = self.pool().await?;

        let rows: Vec<CustomerRow> = sqlx::query_as("SELECT id, name, email FROM customers")
            .fetch_all(&pool)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn is_connected(&self) -> bool {
        self.pool.read().await.is_some()
    }
}

#[async_trait]
impl FinanceStore for Database {
    async fn insert_charge(
        &self,
        booking_id: i64,
        amount: i64,
    ) -> Result<FinanceRecord, StoreError> {
        let pool = self.pool().await?;

        let id: (i64,) =
            sqlx::query_as("INSERT INTO finance (booking_id, amount) VALUES ($1, $2) RETURNING id")
                .bind(booking_id)
                .bind(amount)
                .fetch_one(&pool)
                .await
                .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(FinanceRecord {
            id: id.0,
            booking_id,
            amount,
        })
    }

    async fn insert_charge_once(
        &self,
        booking_id: i64,
        amount: i64,
    ) -> Result<Option<FinanceRecord>, StoreError> {
        let pool = self.pool().await?;

        // The schema carries no unique constraint on booking_id, so
        // dedup is an insert guarded by an existence check. The
        // consumer processes one message at a time, which keeps the
        // window between check and insert closed.
        let id: Option<(i64,)> = sqlx::query_as(
            "INSERT INTO finance (booking_id, amount) \
             SELECT $1, $2 \
             WHERE NOT EXISTS (SELECT 1 FROM finance WHERE booking_id = $1) \
             RETURNING id",
        )
        .bind(booking_id)
        .bind(amount)
        .fetch_optional(&pool)
        .await
        .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(id.map(|row| FinanceRecord {
            id: row.0,
            booking_id,
            amount,
        }))
    }
}
