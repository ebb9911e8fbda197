//! Sequential retrieval of the complete seat page set for one scope.

use chrono::{DateTime, Utc};

use crate::error::AppResult;
use crate::github::SeatsProvider;
use crate::models::{SeatScope, SeatSnapshot};

use super::activity;

/// Lazy cursor over the seat listing pages of one scope.
///
/// Each `next` call performs one API round trip and yields one
/// page-record; the sequence terminates when a response carries no
/// `next` link. Pages are numbered from 1 in request order. Page
/// requests are strictly sequential - each depends on the previous
/// response's link header.
pub struct SeatPageCursor<'a> {
    api: &'a dyn SeatsProvider,
    scope: &'a SeatScope,
    fetched_at: DateTime<Utc>,
    next_url: Option<String>,
    page: i64,
    done: bool,
}

impl<'a> SeatPageCursor<'a> {
    pub fn new(api: &'a dyn SeatsProvider, scope: &'a SeatScope, fetched_at: DateTime<Utc>) -> Self {
        Self {
            api,
            scope,
            fetched_at,
            next_url: None,
            page: 0,
            done: false,
        }
    }

    /// Fetches the next page, or None after the last page. A failed
    /// round trip surfaces immediately; the cursor makes no retries.
    pub async fn next(&mut self) -> AppResult<Option<SeatSnapshot>> {
        if self.done {
            return Ok(None);
        }

        let page = self
            .api
            .fetch_seats_page(self.scope, self.next_url.as_deref())
            .await?;

        self.page += 1;
        self.done = page.next_url.is_none();
        self.next_url = page.next_url;

        Ok(Some(SeatSnapshot {
            id: String::new(),
            enterprise: self.scope.enterprise().map(str::to_string),
            organization: self.scope.organization().map(str::to_string),
            seats: page.seats,
            total_seats: page.total_seats,
            total_active_seats: None,
            page: self.page,
            has_next_page: !self.done,
            date: self.fetched_at.date_naive(),
            last_update: Some(self.fetched_at),
        }))
    }
}

/// Drains the page cursor and finalizes the cross-page totals
pub struct SeatFetcher;

impl SeatFetcher {
    /// Retrieves every seat page for the scope. All-or-nothing: a
    /// failure on any page discards the pages already fetched.
    ///
    /// Once the full set is collected, each page's active total is
    /// overwritten with the global active count across all pages
    /// combined - a cross-page aggregate, not a per-page statistic.
    pub async fn fetch_all(
        api: &dyn SeatsProvider,
        scope: &SeatScope,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<SeatSnapshot>> {
        let mut cursor = SeatPageCursor::new(api, scope, now);
        let mut snapshots = Vec::new();

        while let Some(snapshot) = cursor.next().await? {
            snapshots.push(snapshot);
        }

        let total_active: i64 = snapshots
            .iter()
            .map(|snapshot| activity::count_active(&snapshot.seats, now))
            .sum();
        for snapshot in &mut snapshots {
            snapshot.total_active_seats = Some(total_active);
        }

        log::info!(
            "Fetched {} seat page(s) for {} ({} active)",
            snapshots.len(),
            scope,
            total_active
        );

        Ok(snapshots)
    }
}
