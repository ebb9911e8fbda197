use std::collections::HashMap;
use std::env;
use std::time::Duration;

use crate::models::SeatScope;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub github: GithubConfig,
    /// Snapshot store; enabled only when DATABASE_URL is set
    pub database: Option<DatabaseConfig>,
    pub teams: TeamConfig,
}

/// GitHub API connection configuration
#[derive(Debug, Clone)]
pub struct GithubConfig {
    pub token: String,
    pub api_url: String,
    pub scope: SeatScope,
}

/// Database connection pool configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
}

/// Team resolution configuration
#[derive(Debug, Clone, Default)]
pub struct TeamConfig {
    /// Extra parent -> child team mappings applied on top of the
    /// parent relations reported by the teams API. Format of the
    /// TEAM_CHILD_OVERRIDES variable: "parent=child1,child2;other=child3"
    pub child_overrides: HashMap<String, Vec<String>>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            github: GithubConfig::from_env()?,
            database: DatabaseConfig::from_env(),
            teams: TeamConfig::from_env()?,
        })
    }
}

impl GithubConfig {
    /// Load GitHub configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = env::var("GITHUB_TOKEN").map_err(|_| ConfigError::MissingGithubToken)?;

        let api_url = env::var("GITHUB_API_URL")
            .unwrap_or_else(|_| "https://api.github.com".to_string());

        let enterprise = env::var("GITHUB_ENTERPRISE").ok().filter(|v| !v.is_empty());
        let organization = env::var("GITHUB_ORGANIZATION")
            .ok()
            .filter(|v| !v.is_empty());

        // Exactly one of enterprise / organization selects the billing scope
        let scope = match (enterprise, organization) {
            (Some(_), Some(_)) => return Err(ConfigError::ConflictingScope),
            (Some(enterprise), None) => SeatScope::Enterprise(enterprise),
            (None, Some(organization)) => SeatScope::Organization(organization),
            (None, None) => return Err(ConfigError::MissingScope),
        };

        Ok(Self {
            token,
            api_url,
            scope,
        })
    }
}

impl DatabaseConfig {
    /// Load database configuration from environment variables.
    /// Returns None when DATABASE_URL is not set (store disabled).
    pub fn from_env() -> Option<Self> {
        let url = env::var("DATABASE_URL").ok().filter(|v| !v.is_empty())?;

        Some(Self {
            url,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
            min_connections: env::var("DATABASE_MIN_CONNECTIONS")
                .unwrap_or_else(|_| "1".to_string())
                .parse()
                .unwrap_or(1),
            acquire_timeout: Duration::from_secs(
                env::var("DATABASE_ACQUIRE_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .unwrap_or(5),
            ),
        })
    }
}

impl TeamConfig {
    /// Load team configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = match env::var("TEAM_CHILD_OVERRIDES") {
            Ok(v) if !v.trim().is_empty() => v,
            _ => return Ok(Self::default()),
        };

        let mut child_overrides = HashMap::new();
        for entry in raw.split(';').filter(|e| !e.trim().is_empty()) {
            let (parent, children) = entry
                .split_once('=')
                .ok_or_else(|| ConfigError::InvalidTeamOverrides(entry.trim().to_string()))?;

            let parent = parent.trim();
            let children: Vec<String> = children
                .split(',')
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect();

            if parent.is_empty() || children.is_empty() {
                return Err(ConfigError::InvalidTeamOverrides(entry.trim().to_string()));
            }

            child_overrides.insert(parent.to_string(), children);
        }

        Ok(Self { child_overrides })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    MissingGithubToken,
    MissingScope,
    ConflictingScope,
    InvalidTeamOverrides(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "PORT must be a valid number"),
            ConfigError::MissingGithubToken => {
                write!(f, "GITHUB_TOKEN environment variable is required")
            }
            ConfigError::MissingScope => {
                write!(
                    f,
                    "one of GITHUB_ENTERPRISE or GITHUB_ORGANIZATION is required"
                )
            }
            ConfigError::ConflictingScope => {
                write!(
                    f,
                    "GITHUB_ENTERPRISE and GITHUB_ORGANIZATION are mutually exclusive"
                )
            }
            ConfigError::InvalidTeamOverrides(entry) => {
                write!(
                    f,
                    "TEAM_CHILD_OVERRIDES entry '{}' must look like 'parent=child1,child2'",
                    entry
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}
