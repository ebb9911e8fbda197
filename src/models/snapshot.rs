use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::seat::SeatAssignment;

/// One page of seat data for a scope and date.
///
/// The same shape serves as the per-HTTP-page record produced by the
/// fetcher, the stored historical document, and the aggregated result
/// returned to the presentation layer (aggregation replaces seats and
/// totals on a copy, it never mutates its inputs).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatSnapshot {
    /// Store identifier; empty for freshly fetched API data
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub enterprise: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    pub seats: Vec<SeatAssignment>,
    pub total_seats: i64,
    /// Absent on records stored before this field existed; backfilled
    /// during aggregation
    #[serde(default)]
    pub total_active_seats: Option<i64>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default)]
    pub has_next_page: bool,
    pub date: NaiveDate,
    #[serde(default)]
    pub last_update: Option<DateTime<Utc>>,
}

fn default_page() -> i64 {
    1
}

impl SeatSnapshot {
    /// Empty aggregate for a date: zero seats, zero totals
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            id: String::new(),
            enterprise: None,
            organization: None,
            seats: Vec::new(),
            total_seats: 0,
            total_active_seats: Some(0),
            page: 1,
            has_next_page: false,
            date,
            last_update: None,
        }
    }
}
