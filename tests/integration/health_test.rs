//! Integration tests for the health endpoints.

use actix_web::{http::StatusCode, test, web, App};

use seatboard::db::DbPool;
use seatboard::routes;

#[actix_web::test]
async fn test_liveness() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(Option::<DbPool>::None))
            .service(
                web::scope("/health")
                    .route("", web::get().to(routes::health::liveness))
                    .route("/ready", web::get().to(routes::health::readiness)),
            ),
    )
    .await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn test_readiness_without_store() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(Option::<DbPool>::None))
            .service(
                web::scope("/health")
                    .route("", web::get().to(routes::health::liveness))
                    .route("/ready", web::get().to(routes::health::readiness)),
            ),
    )
    .await;

    let req = test::TestRequest::get().uri("/health/ready").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["database"], "disabled");
}
