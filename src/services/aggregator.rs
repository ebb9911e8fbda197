//! Reduction of page-records into one canonical seats result.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::models::{SeatAssignment, SeatSnapshot};

use super::activity;
use super::teams::TeamMembershipResolver;

pub struct SeatAggregator;

impl SeatAggregator {
    /// Merges one or more page-records into a single deduplicated,
    /// filtered, re-counted result. An empty `teams` slice means no
    /// team filter.
    ///
    /// Seats are flattened in input order; duplicates by assignee
    /// login keep the first occurrence. Scope fields, page, date,
    /// last_update and id come from the first record; the aggregate
    /// never reports a next page. Deterministic: identical inputs
    /// produce identical output ordering and counts.
    pub async fn aggregate(
        resolver: &TeamMembershipResolver<'_>,
        mut snapshots: Vec<SeatSnapshot>,
        teams: &[String],
        now: DateTime<Utc>,
    ) -> SeatSnapshot {
        if snapshots.is_empty() {
            return SeatSnapshot::empty(now.date_naive());
        }

        // Records stored before the active total existed are backfilled
        // from their own seats before anything else touches them.
        let first = &mut snapshots[0];
        if first.total_active_seats.is_none() {
            first.total_active_seats = Some(activity::count_active(&first.seats, now));
        }

        let mut result = snapshots.remove(0);
        let mut seats: Vec<SeatAssignment> = std::mem::take(&mut result.seats);
        for snapshot in snapshots {
            seats.extend(snapshot.seats);
        }

        let mut seats = if teams.is_empty() {
            seats
        } else {
            resolver.filter_by_teams(seats, teams).await
        };

        // First occurrence in flattened order wins
        let mut seen = HashSet::new();
        seats.retain(|seat| seen.insert(seat.assignee.login.clone()));

        result.total_seats = seats.len() as i64;
        result.total_active_seats = Some(activity::count_active(&seats, now));
        result.seats = seats;
        result.has_next_page = false;
        result
    }
}
