//! Unit tests for configuration parsing
//!
//! Tests environment variable parsing and default values.
//!
//! Note: These tests modify global environment variables and must run serially.

use serial_test::serial;

use seatboard::config::{Config, ConfigError, GithubConfig, TeamConfig};
use seatboard::models::SeatScope;

fn clear_env() {
    std::env::remove_var("HOST");
    std::env::remove_var("PORT");
    std::env::remove_var("GITHUB_TOKEN");
    std::env::remove_var("GITHUB_API_URL");
    std::env::remove_var("GITHUB_ENTERPRISE");
    std::env::remove_var("GITHUB_ORGANIZATION");
    std::env::remove_var("TEAM_CHILD_OVERRIDES");
    std::env::remove_var("DATABASE_URL");
}

#[test]
#[serial]
fn test_defaults_with_organization_scope() {
    clear_env();
    std::env::set_var("GITHUB_TOKEN", "ghp_test");
    std::env::set_var("GITHUB_ORGANIZATION", "acme");

    let config = Config::from_env().unwrap();

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 8080);
    assert_eq!(config.github.api_url, "https://api.github.com");
    assert_eq!(
        config.github.scope,
        SeatScope::Organization("acme".to_string())
    );
    assert!(config.database.is_none());
    assert!(config.teams.child_overrides.is_empty());
}

#[test]
#[serial]
fn test_enterprise_scope_selected() {
    clear_env();
    std::env::set_var("GITHUB_TOKEN", "ghp_test");
    std::env::set_var("GITHUB_ENTERPRISE", "acme-corp");

    let config = GithubConfig::from_env().unwrap();

    assert_eq!(
        config.scope,
        SeatScope::Enterprise("acme-corp".to_string())
    );
}

#[test]
#[serial]
fn test_missing_token_is_an_error() {
    clear_env();
    std::env::set_var("GITHUB_ORGANIZATION", "acme");

    let err = GithubConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::MissingGithubToken));
}

#[test]
#[serial]
fn test_scope_is_required() {
    clear_env();
    std::env::set_var("GITHUB_TOKEN", "ghp_test");

    let err = GithubConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::MissingScope));
}

#[test]
#[serial]
fn test_scopes_are_mutually_exclusive() {
    clear_env();
    std::env::set_var("GITHUB_TOKEN", "ghp_test");
    std::env::set_var("GITHUB_ENTERPRISE", "acme-corp");
    std::env::set_var("GITHUB_ORGANIZATION", "acme");

    let err = GithubConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::ConflictingScope));
}

#[test]
#[serial]
fn test_database_enabled_by_url() {
    clear_env();
    std::env::set_var("GITHUB_TOKEN", "ghp_test");
    std::env::set_var("GITHUB_ORGANIZATION", "acme");
    std::env::set_var("DATABASE_URL", "postgres://localhost/seatboard");

    let config = Config::from_env().unwrap();

    let database = config.database.expect("store should be enabled");
    assert_eq!(database.url, "postgres://localhost/seatboard");
    assert_eq!(database.max_connections, 10);
}

#[test]
#[serial]
fn test_team_child_overrides_parsed() {
    clear_env();
    std::env::set_var(
        "TEAM_CHILD_OVERRIDES",
        "platform=platform-eu,platform-us;mobile=mobile-ios",
    );

    let config = TeamConfig::from_env().unwrap();

    assert_eq!(
        config.child_overrides.get("platform"),
        Some(&vec!["platform-eu".to_string(), "platform-us".to_string()])
    );
    assert_eq!(
        config.child_overrides.get("mobile"),
        Some(&vec!["mobile-ios".to_string()])
    );
}

#[test]
#[serial]
fn test_malformed_team_child_overrides_rejected() {
    clear_env();
    std::env::set_var("TEAM_CHILD_OVERRIDES", "platform");

    let err = TeamConfig::from_env().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidTeamOverrides(_)));
}

#[test]
#[serial]
fn test_empty_overrides_are_ignored() {
    clear_env();
    std::env::set_var("TEAM_CHILD_OVERRIDES", "  ");

    let config = TeamConfig::from_env().unwrap();
    assert!(config.child_overrides.is_empty());
}
