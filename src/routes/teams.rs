use actix_web::{web, HttpResponse};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::config::Config;
use crate::db::DbPool;
use crate::error::AppResult;
use crate::github::SeatsProvider;
use crate::services::{SeatFetcher, SnapshotQuery, SnapshotService, TeamCatalog};

use super::snapshot_store;

/// Query parameters for the team catalog
#[derive(Debug, Deserialize)]
pub struct TeamsQuery {
    /// Snapshot date; omitted means a live API fetch
    pub date: Option<NaiveDate>,
}

/// GET /api/teams
/// Sorted catalog of the distinct assigning teams
pub async fn get_teams(
    api: web::Data<dyn SeatsProvider>,
    pool: web::Data<Option<DbPool>>,
    config: web::Data<Config>,
    query: web::Query<TeamsQuery>,
) -> AppResult<HttpResponse> {
    let scope = &config.github.scope;

    let catalog = match query.date {
        Some(date) => {
            let pool = snapshot_store(&pool)?;
            let snapshot_query = SnapshotQuery {
                date,
                scope: scope.clone(),
                teams: Vec::new(),
                page: None,
            };
            let snapshots = SnapshotService::find(pool, &snapshot_query).await?;
            TeamCatalog::from_snapshots(&snapshots)
        }
        None => {
            let snapshots = SeatFetcher::fetch_all(api.get_ref(), scope, Utc::now()).await?;
            TeamCatalog::with_listing_fallback(api.get_ref(), scope, &snapshots).await?
        }
    };

    Ok(HttpResponse::Ok().json(catalog))
}

/// Configure team routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/teams").route("", web::get().to(get_teams)));
}
