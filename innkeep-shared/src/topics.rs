//! Queue topic names shared by publishers and consumers.
//!
//! Single source of truth so a producer and its consumer can never
//! drift apart on the queue name.

/// Booking-created events, consumed by the finance service.
pub const FINANCE_QUEUE: &str = "finance_queue";

/// Customer-created events. Nothing consumes these yet.
pub const CUSTOMER_QUEUE: &str = "customer_queue";
