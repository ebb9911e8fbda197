use actix_web::{web, HttpResponse};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::config::Config;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::github::SeatsProvider;
use crate::services::{
    SeatAggregator, SeatFetcher, SnapshotQuery, SnapshotService, TeamMembershipResolver,
};

use super::snapshot_store;

/// Query parameters for the seat report
#[derive(Debug, Deserialize)]
pub struct SeatsQuery {
    /// Snapshot date; omitted means a live API fetch
    pub date: Option<NaiveDate>,

    /// Comma-separated team names to filter by
    pub team: Option<String>,

    /// Stored page to load (historical queries only)
    pub page: Option<i64>,
}

fn team_list(raw: Option<&str>) -> Vec<String> {
    match raw {
        Some(raw) => raw
            .split(',')
            .map(|team| team.trim().to_string())
            .filter(|team| !team.is_empty())
            .collect(),
        None => Vec::new(),
    }
}

/// GET /api/seats
/// Aggregated seat report: a live fetch, or a stored snapshot when a
/// date is given
pub async fn get_seats(
    api: web::Data<dyn SeatsProvider>,
    pool: web::Data<Option<DbPool>>,
    config: web::Data<Config>,
    query: web::Query<SeatsQuery>,
) -> AppResult<HttpResponse> {
    let now = Utc::now();
    let scope = &config.github.scope;
    let teams = team_list(query.team.as_deref());
    let resolver = TeamMembershipResolver::new(api.get_ref(), scope, &config.teams);

    let snapshots = match query.date {
        Some(date) => {
            let pool = snapshot_store(&pool)?;
            let snapshot_query = SnapshotQuery {
                date,
                scope: scope.clone(),
                teams: teams.clone(),
                page: query.page,
            };
            SnapshotService::find(pool, &snapshot_query).await?
        }
        None => {
            let snapshots = SeatFetcher::fetch_all(api.get_ref(), scope, now).await?;

            // The store is a cache, not the system of record; a failed
            // capture must not fail the report
            if let Some(pool) = pool.get_ref() {
                if let Err(e) = SnapshotService::capture(pool, &snapshots).await {
                    log::error!("Failed to store seat snapshot: {}", e);
                }
            }

            snapshots
        }
    };

    let result = SeatAggregator::aggregate(&resolver, snapshots, &teams, now).await;
    Ok(HttpResponse::Ok().json(result))
}

/// GET /api/seats/dates
/// Snapshot dates available in the store, newest first
pub async fn list_dates(pool: web::Data<Option<DbPool>>) -> AppResult<HttpResponse> {
    let pool = snapshot_store(&pool)?;
    let dates = SnapshotService::list_dates(pool).await?;
    Ok(HttpResponse::Ok().json(dates))
}

/// Configure seat routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/seats")
            .route("", web::get().to(get_seats))
            .route("/dates", web::get().to(list_dates)),
    );
}
