pub mod health;
pub mod seats;
pub mod teams;

use actix_web::web;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};

/// Resolves the snapshot store pool, or rejects the request when the
/// store is not configured
pub(crate) fn snapshot_store(pool: &web::Data<Option<DbPool>>) -> AppResult<&DbPool> {
    pool.get_ref().as_ref().ok_or_else(|| {
        AppError::Validation(
            "historical snapshots are not enabled (DATABASE_URL is not set)".to_string(),
        )
    })
}
