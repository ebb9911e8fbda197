//! Historical snapshot store.
//!
//! Persists the per-page seat records of a day's fetch and serves
//! them back for a requested date. Rows written before the page
//! column existed carry NULL there; queries with a page predicate
//! retry without it when the first attempt comes back empty.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{SeatAssignment, SeatScope, SeatSnapshot};

/// Structured filter for historical snapshot queries
#[derive(Debug, Clone)]
pub struct SnapshotQuery {
    pub date: NaiveDate,
    pub scope: SeatScope,
    /// Requested team names; filtering happens during aggregation,
    /// not in the store
    pub teams: Vec<String>,
    pub page: Option<i64>,
}

/// Row shape of the seat_snapshots table
#[derive(FromRow)]
struct SnapshotRow {
    id: Uuid,
    enterprise: Option<String>,
    organization: Option<String>,
    seats: Json<Vec<SeatAssignment>>,
    total_seats: i64,
    total_active_seats: Option<i64>,
    page: Option<i32>,
    has_next_page: bool,
    snapshot_date: NaiveDate,
    last_update: Option<DateTime<Utc>>,
}

impl SnapshotRow {
    fn into_snapshot(self) -> SeatSnapshot {
        SeatSnapshot {
            id: self.id.to_string(),
            enterprise: self.enterprise,
            organization: self.organization,
            seats: self.seats.0,
            total_seats: self.total_seats,
            total_active_seats: self.total_active_seats,
            // Legacy rows predate the page column
            page: self.page.map(i64::from).unwrap_or(1),
            has_next_page: self.has_next_page,
            date: self.snapshot_date,
            last_update: self.last_update,
        }
    }
}

const SELECT_COLUMNS: &str = "SELECT id, enterprise, organization, seats, total_seats, \
     total_active_seats, page, has_next_page, snapshot_date, last_update FROM seat_snapshots";

pub struct SnapshotService;

impl SnapshotService {
    /// Stores one day's fetched page set, replacing any prior capture
    /// of the same scope and date
    pub async fn capture(pool: &DbPool, snapshots: &[SeatSnapshot]) -> AppResult<()> {
        let first = match snapshots.first() {
            Some(first) => first,
            None => return Ok(()),
        };

        let mut tx = pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM seat_snapshots
            WHERE snapshot_date = $1
              AND enterprise IS NOT DISTINCT FROM $2
              AND organization IS NOT DISTINCT FROM $3
            "#,
        )
        .bind(first.date)
        .bind(&first.enterprise)
        .bind(&first.organization)
        .execute(&mut *tx)
        .await?;

        for snapshot in snapshots {
            sqlx::query(
                r#"
                INSERT INTO seat_snapshots
                    (id, enterprise, organization, seats, total_seats,
                     total_active_seats, page, has_next_page, snapshot_date, last_update)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(&snapshot.enterprise)
            .bind(&snapshot.organization)
            .bind(Json(&snapshot.seats))
            .bind(snapshot.total_seats)
            .bind(snapshot.total_active_seats)
            .bind(snapshot.page as i32)
            .bind(snapshot.has_next_page)
            .bind(snapshot.date)
            .bind(snapshot.last_update)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        log::info!(
            "Captured {} snapshot page(s) for {}",
            snapshots.len(),
            first.date
        );
        Ok(())
    }

    /// Loads the page-records for a date and scope.
    ///
    /// The page predicate applies on the first attempt only; rows
    /// stored before the page column existed get a second chance via a
    /// predicate-free retry. An empty final result is the distinct
    /// no-data condition, not an upstream failure.
    pub async fn find(pool: &DbPool, query: &SnapshotQuery) -> AppResult<Vec<SeatSnapshot>> {
        let mut rows = Self::select(pool, query, query.page).await?;

        if rows.is_empty() && query.page.is_some() {
            rows = Self::select(pool, query, None).await?;
        }

        if rows.is_empty() {
            return Err(AppError::NoData(format!(
                "no snapshot for {} on {}",
                query.scope, query.date
            )));
        }

        Ok(rows.into_iter().map(SnapshotRow::into_snapshot).collect())
    }

    /// Distinct snapshot dates with stored data, newest first
    pub async fn list_dates(pool: &DbPool) -> AppResult<Vec<NaiveDate>> {
        let rows: Vec<(NaiveDate,)> = sqlx::query_as(
            "SELECT DISTINCT snapshot_date FROM seat_snapshots ORDER BY snapshot_date DESC",
        )
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(|row| row.0).collect())
    }

    async fn select(
        pool: &DbPool,
        query: &SnapshotQuery,
        page: Option<i64>,
    ) -> AppResult<Vec<SnapshotRow>> {
        let page = page.map(|p| p as i32);

        let rows = match &query.scope {
            SeatScope::Enterprise(name) => {
                sqlx::query_as::<_, SnapshotRow>(&format!(
                    "{} WHERE snapshot_date = $1 AND enterprise = $2 \
                     AND ($3::int IS NULL OR page = $3) \
                     ORDER BY page NULLS FIRST, id",
                    SELECT_COLUMNS
                ))
                .bind(query.date)
                .bind(name)
                .bind(page)
                .fetch_all(pool)
                .await?
            }
            SeatScope::Organization(name) => {
                sqlx::query_as::<_, SnapshotRow>(&format!(
                    "{} WHERE snapshot_date = $1 AND organization = $2 \
                     AND ($3::int IS NULL OR page = $3) \
                     ORDER BY page NULLS FIRST, id",
                    SELECT_COLUMNS
                ))
                .bind(query.date)
                .bind(name)
                .bind(page)
                .fetch_all(pool)
                .await?
            }
        };

        Ok(rows)
    }
}
