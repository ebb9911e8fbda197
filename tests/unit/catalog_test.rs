//! Unit tests for the team catalog derivation.

use pretty_assertions::assert_eq;

use seatboard::models::TeamReference;
use seatboard::services::TeamCatalog;

use crate::common::fixtures::{enterprise_scope, org_scope, seat, snapshot, team};
use crate::common::mock::MockProvider;

fn named_team(name: &str, id: Option<i64>) -> TeamReference {
    TeamReference {
        name: name.to_string(),
        id,
        slug: None,
        parent: None,
    }
}

#[test]
fn test_distinct_teams_sorted_by_name() {
    let snapshots = vec![
        snapshot(
            1,
            true,
            vec![
                seat("a", Some("beta"), None),
                seat("b", Some("alpha"), None),
            ],
        ),
        snapshot(2, false, vec![seat("c", Some("beta"), None)]),
    ];

    let catalog = TeamCatalog::from_snapshots(&snapshots);

    let names: Vec<&str> = catalog.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "beta"]);
}

#[test]
fn test_empty_name_sorts_first() {
    let mut with_empty = seat("a", Some("zulu"), None);
    with_empty.assigning_team = Some(named_team("", None));
    let snapshots = vec![snapshot(
        1,
        false,
        vec![with_empty, seat("b", Some("alpha"), None)],
    )];

    let catalog = TeamCatalog::from_snapshots(&snapshots);

    let names: Vec<&str> = catalog.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["", "alpha"]);
}

#[test]
fn test_dedup_by_id_when_both_carry_one() {
    // Same team id seen under two display names counts once.
    let mut first = seat("a", None, None);
    first.assigning_team = Some(named_team("platform", Some(7)));
    let mut second = seat("b", None, None);
    second.assigning_team = Some(named_team("platform-renamed", Some(7)));

    let snapshots = vec![snapshot(1, false, vec![first, second])];
    let catalog = TeamCatalog::from_snapshots(&snapshots);

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog[0].name, "platform");
}

#[test]
fn test_dedup_by_name_when_id_missing() {
    let mut first = seat("a", None, None);
    first.assigning_team = Some(named_team("platform", Some(7)));
    let mut second = seat("b", None, None);
    second.assigning_team = Some(named_team("platform", None));

    let snapshots = vec![snapshot(1, false, vec![first, second])];
    let catalog = TeamCatalog::from_snapshots(&snapshots);

    assert_eq!(catalog.len(), 1);
}

#[tokio::test]
async fn test_live_fallback_to_teams_listing() {
    // No seat carries an assigning team, so the organization listing
    // supplies the catalog.
    let snapshots = vec![snapshot(1, false, vec![seat("a", None, None)])];
    let api = MockProvider::new().with_teams(vec![team("mobile", None), team("api", None)]);
    let scope = org_scope();

    let catalog = TeamCatalog::with_listing_fallback(&api, &scope, &snapshots)
        .await
        .unwrap();

    let names: Vec<&str> = catalog.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["api", "mobile"]);
    assert_eq!(api.teams_listing_calls(), 1);
}

#[tokio::test]
async fn test_no_fallback_when_assignments_present() {
    let snapshots = vec![snapshot(1, false, vec![seat("a", Some("alpha"), None)])];
    let api = MockProvider::new().with_teams(vec![team("mobile", None)]);
    let scope = org_scope();

    let catalog = TeamCatalog::with_listing_fallback(&api, &scope, &snapshots)
        .await
        .unwrap();

    let names: Vec<&str> = catalog.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["alpha"]);
    assert_eq!(api.teams_listing_calls(), 0);
}

#[tokio::test]
async fn test_enterprise_scope_has_no_listing_fallback() {
    let snapshots = vec![snapshot(1, false, vec![seat("a", None, None)])];
    let api = MockProvider::new().with_teams(vec![team("mobile", None)]);
    let scope = enterprise_scope();

    let catalog = TeamCatalog::with_listing_fallback(&api, &scope, &snapshots)
        .await
        .unwrap();

    assert!(catalog.is_empty());
    assert_eq!(api.teams_listing_calls(), 0);
}
