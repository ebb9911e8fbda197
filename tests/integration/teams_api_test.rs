//! Integration tests for the team catalog endpoint.

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web, App};
use pretty_assertions::assert_eq;

use seatboard::db::DbPool;
use seatboard::github::SeatsProvider;
use seatboard::routes;

use crate::common::fixtures::{seat, team, test_config};
use crate::common::mock::MockProvider;

macro_rules! teams_app {
    ($api:expr) => {{
        let api: Arc<dyn SeatsProvider> = $api;
        test::init_service(
            App::new()
                .app_data(web::Data::from(api))
                .app_data(web::Data::new(Option::<DbPool>::None))
                .app_data(web::Data::new(test_config()))
                .configure(routes::teams::configure),
        )
        .await
    }};
}

#[actix_web::test]
async fn test_catalog_from_seat_assignments() {
    let mock = MockProvider::new().with_pages(vec![vec![
        seat("alice", Some("platform"), None),
        seat("bob", Some("api"), None),
        seat("carol", Some("platform"), None),
    ]]);
    let app = teams_app!(Arc::new(mock));

    let req = test::TestRequest::get().uri("/api/teams").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["api", "platform"]);
}

#[actix_web::test]
async fn test_catalog_falls_back_to_teams_listing() {
    let mock = MockProvider::new()
        .with_pages(vec![vec![seat("alice", None, None)]])
        .with_teams(vec![team("mobile", None), team("api", None)]);
    let app = teams_app!(Arc::new(mock));

    let req = test::TestRequest::get().uri("/api/teams").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["api", "mobile"]);
}

#[actix_web::test]
async fn test_historical_catalog_requires_the_store() {
    let mock = MockProvider::new();
    let app = teams_app!(Arc::new(mock));

    let req = test::TestRequest::get()
        .uri("/api/teams?date=2025-06-14")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
