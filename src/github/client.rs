//! HTTP client for the GitHub Copilot billing and teams endpoints.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, LINK, USER_AGENT};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::GithubConfig;
use crate::error::{AppError, AppResult};
use crate::models::{SeatAssignment, SeatScope, Team, TeamMember};

use super::link;

/// Page size requested from every paginated endpoint
pub const SEATS_PAGE_SIZE: u32 = 100;

/// One page of the seat listing plus the follow-up link
#[derive(Debug, Clone)]
pub struct SeatsPage {
    pub seats: Vec<SeatAssignment>,
    pub total_seats: i64,
    /// URL of the next page, None on the last page
    pub next_url: Option<String>,
}

/// Collaborator surface of the GitHub REST API used by the pipeline
#[async_trait]
pub trait SeatsProvider: Send + Sync {
    /// Fetches one page of the Copilot seat listing for a scope.
    /// `url` is the `next` link of the previous response; None
    /// requests the first page.
    async fn fetch_seats_page(
        &self,
        scope: &SeatScope,
        url: Option<&str>,
    ) -> AppResult<SeatsPage>;

    /// Lists all members of an organization team, following pagination
    /// to completion
    async fn list_team_members(&self, org: &str, team: &str) -> AppResult<Vec<TeamMember>>;

    /// Lists all teams of an organization, following pagination to
    /// completion
    async fn list_teams(&self, org: &str) -> AppResult<Vec<Team>>;
}

/// Wire shape of the seat listing body
#[derive(Debug, Deserialize)]
struct SeatsPageBody {
    total_seats: i64,
    #[serde(default)]
    seats: Vec<SeatAssignment>,
}

/// Live GitHub REST API client
pub struct GithubClient {
    client: reqwest::Client,
    api_url: String,
}

impl GithubClient {
    /// Creates a client with the credentials and headers GitHub
    /// expects on every request
    pub fn new(config: &GithubConfig) -> AppResult<Self> {
        let parsed = url::Url::parse(&config.api_url)
            .map_err(|_| AppError::Validation("Invalid GitHub API URL".to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(AppError::Validation(
                "GitHub API URL must use HTTP or HTTPS".to_string(),
            ));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| AppError::Validation("Invalid GITHUB_TOKEN value".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("seatboard"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Performs one GET round trip. Returns the decoded body and the
    /// `next` link of the response, if any. A non-success status is a
    /// terminal error for the operation; there are no retries.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> AppResult<(T, Option<String>)> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream {
                status: status.as_u16(),
                context: url.to_string(),
            });
        }

        let next_url =
            link::next_page_url(response.headers().get(LINK).and_then(|v| v.to_str().ok()));

        let body = response.json::<T>().await?;
        Ok((body, next_url))
    }

    /// Drains a paginated array endpoint into one vector
    async fn get_all_pages<T: DeserializeOwned>(&self, first_url: String) -> AppResult<Vec<T>> {
        let mut items = Vec::new();
        let mut url = Some(first_url);

        while let Some(current) = url {
            let (page, next): (Vec<T>, _) = self.get_json(&current).await?;
            items.extend(page);
            url = next;
        }

        Ok(items)
    }
}

#[async_trait]
impl SeatsProvider for GithubClient {
    async fn fetch_seats_page(
        &self,
        scope: &SeatScope,
        url: Option<&str>,
    ) -> AppResult<SeatsPage> {
        let url = match url {
            Some(next) => next.to_string(),
            None => format!(
                "{}?per_page={}",
                self.api_url(&scope.seats_path()),
                SEATS_PAGE_SIZE
            ),
        };

        let (body, next_url): (SeatsPageBody, _) = self.get_json(&url).await?;

        Ok(SeatsPage {
            seats: body.seats,
            total_seats: body.total_seats,
            next_url,
        })
    }

    async fn list_team_members(&self, org: &str, team: &str) -> AppResult<Vec<TeamMember>> {
        let url = format!(
            "{}?per_page={}",
            self.api_url(&format!("orgs/{}/teams/{}/members", org, team)),
            SEATS_PAGE_SIZE
        );
        self.get_all_pages(url).await
    }

    async fn list_teams(&self, org: &str) -> AppResult<Vec<Team>> {
        let url = format!(
            "{}?per_page={}",
            self.api_url(&format!("orgs/{}/teams", org)),
            SEATS_PAGE_SIZE
        );
        self.get_all_pages(url).await
    }
}
