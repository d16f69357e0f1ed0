pub mod booking;
pub mod customer;
pub mod finance;
pub mod repository;

/// Rejected create request. The display string is returned verbatim
/// in the HTTP error body, so it is part of the API contract.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("{0}")]
pub struct ValidationError(pub &'static str);

/// Failures surfaced by the relational store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The supervised connection has not been established yet.
    #[error("Database connection not established")]
    Unavailable,
    #[error("Query failed: {0}")]
    Query(String),
}

/// Failures surfaced by the queue producer.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// The queue has not been declared yet; the message was dropped.
    #[error("Producer is not ready")]
    NotReady,
    #[error("Publish failed: {0}")]
    Publish(String),
}
