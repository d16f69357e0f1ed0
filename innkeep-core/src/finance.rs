use serde::{Deserialize, Serialize};

/// Fixed amount recorded for every consumed booking event.
pub const BOOKING_AMOUNT: i64 = 100;

/// A persisted finance row, one per consumed booking event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinanceRecord {
    pub id: i64,
    pub booking_id: i64,
    pub amount: i64,
}
