//! Activity window classification for seat assignments.
//!
//! Every active-seat count in the system goes through this one
//! predicate so the fetch-time aggregate and the post-filter recount
//! cannot drift apart.

use chrono::{DateTime, Duration, Utc};

use crate::models::SeatAssignment;

/// Rolling window (in days) within which a seat counts as active
pub const ACTIVITY_WINDOW_DAYS: i64 = 30;

/// True iff the last recorded activity falls within the rolling window
/// relative to `reference`. The boundary is inclusive: activity exactly
/// `ACTIVITY_WINDOW_DAYS` ago still counts. A missing timestamp is
/// always inactive.
pub fn is_active(last_activity_at: Option<DateTime<Utc>>, reference: DateTime<Utc>) -> bool {
    match last_activity_at {
        Some(ts) => ts >= reference - Duration::days(ACTIVITY_WINDOW_DAYS),
        None => false,
    }
}

/// Counts the seats whose last activity falls within the window
pub fn count_active(seats: &[SeatAssignment], reference: DateTime<Utc>) -> i64 {
    seats
        .iter()
        .filter(|seat| is_active(seat.last_activity_at, reference))
        .count() as i64
}
