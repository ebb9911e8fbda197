use actix_web::{http::StatusCode, web, HttpResponse};
use serde::Serialize;

use crate::db::{self, DbPool};

#[derive(Serialize)]
pub struct LivenessResponse {
    status: &'static str,
}

#[derive(Serialize)]
pub struct ReadinessResponse {
    status: &'static str,
    checks: ReadinessChecks,
}

#[derive(Serialize)]
pub struct ReadinessChecks {
    database: &'static str,
}

/// Liveness check - is the process running?
/// Returns 200 if the server is alive.
pub async fn liveness() -> HttpResponse {
    HttpResponse::Ok().json(LivenessResponse { status: "ok" })
}

/// Readiness check - is the service ready to handle requests?
/// The database is checked only when the snapshot store is configured.
pub async fn readiness(pool: web::Data<Option<DbPool>>) -> HttpResponse {
    let (status, db_status, http_status) = match pool.get_ref() {
        Some(pool) => {
            if db::health_check(pool).await {
                ("ready", "ok", StatusCode::OK)
            } else {
                ("not_ready", "error", StatusCode::SERVICE_UNAVAILABLE)
            }
        }
        None => ("ready", "disabled", StatusCode::OK),
    };

    let response = ReadinessResponse {
        status,
        checks: ReadinessChecks {
            database: db_status,
        },
    };

    HttpResponse::build(http_status).json(response)
}
