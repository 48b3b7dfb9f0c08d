//! GitHub REST calls: issue replies and the activity feed.
//!
//! Everything here is built from an explicit [`GitHubConfig`]; nothing reads
//! the process environment.

use std::time::Duration;

use cyber_pet::ActivityEvent;
use serde_json::json;
use thiserror::Error;

const ACCEPT: &str = "application/vnd.github.v3+json";
const TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from GitHub requests.
#[derive(Error, Debug)]
pub enum GitHubError {
    /// The request failed or returned an error status.
    #[error("GitHub request failed: {0}")]
    Http(#[from] Box<ureq::Error>),
    /// The response body could not be read or decoded.
    #[error("Failed to read GitHub response: {0}")]
    Body(#[from] std::io::Error),
}

impl From<ureq::Error> for GitHubError {
    fn from(e: ureq::Error) -> Self {
        GitHubError::Http(Box::new(e))
    }
}

/// Connection settings for the GitHub API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubConfig {
    /// REST API base URL without a trailing slash.
    pub api_url: String,
    /// `owner/name` of the repository holding the issues.
    pub repository: Option<String>,
    /// Token for authenticated calls.
    pub token: Option<String>,
    /// Issue that triggered this run.
    pub issue: Option<u64>,
}

impl GitHubConfig {
    /// Owner part of the repository.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.repository.as_deref()?.split('/').next().filter(|s| !s.is_empty())
    }
}

/// Receives human readable results for the issue that triggered the run.
pub trait Notifier {
    /// Posts a comment.
    fn comment(&self, body: &str) -> Result<(), GitHubError>;

    /// Closes the issue.
    fn close(&self) -> Result<(), GitHubError>;
}

/// Notifier used for local runs; drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn comment(&self, body: &str) -> Result<(), GitHubError> {
        tracing::info!("Skipping issue comment (local run): {}", body);
        Ok(())
    }

    fn close(&self) -> Result<(), GitHubError> {
        Ok(())
    }
}

/// Comments on and closes a GitHub issue.
pub struct IssueNotifier {
    client: GitHubClient,
    repository: String,
    token: String,
    issue: u64,
}

impl IssueNotifier {
    fn issue_url(&self) -> String {
        format!(
            "{}/repos/{}/issues/{}",
            self.client.api_url, self.repository, self.issue
        )
    }
}

impl Notifier for IssueNotifier {
    fn comment(&self, body: &str) -> Result<(), GitHubError> {
        let url = format!("{}/comments", self.issue_url());
        self.client
            .request("POST", &url, Some(&self.token))
            .send_json(json!({ "body": body }))?;
        tracing::info!("Commented on issue #{}", self.issue);
        Ok(())
    }

    fn close(&self) -> Result<(), GitHubError> {
        self.client
            .request("PATCH", &self.issue_url(), Some(&self.token))
            .send_json(json!({ "state": "closed" }))?;
        tracing::info!("Closed issue #{}", self.issue);
        Ok(())
    }
}

/// Picks the notifier for this run: a real one when token, issue and
/// repository are all known, otherwise a no-op.
#[must_use]
pub fn notifier(config: &GitHubConfig) -> Box<dyn Notifier> {
    match (&config.token, config.issue, &config.repository) {
        (Some(token), Some(issue), Some(repository)) => Box::new(IssueNotifier {
            client: GitHubClient::new(config),
            repository: repository.clone(),
            token: token.clone(),
            issue,
        }),
        _ => Box::new(NullNotifier),
    }
}

/// Minimal blocking GitHub API client.
#[derive(Clone)]
pub struct GitHubClient {
    agent: ureq::Agent,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Creates a client from the configuration.
    #[must_use]
    pub fn new(config: &GitHubConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(TIMEOUT)
            .user_agent(concat!("readme-bot/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    fn request(&self, method: &str, url: &str, token: Option<&str>) -> ureq::Request {
        let request = self.agent.request(method, url).set("Accept", ACCEPT);
        match token {
            Some(token) => request.set("Authorization", &format!("token {}", token)),
            None => request,
        }
    }

    /// Fetches the public events of a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError`] if the request fails or the body is not an
    /// event list.
    pub fn user_events(&self, user: &str) -> Result<Vec<ActivityEvent>, GitHubError> {
        let url = format!("{}/users/{}/events", self.api_url, user);
        tracing::info!("Fetching events from {}", url);

        let events: Vec<ActivityEvent> = self
            .request("GET", &url, self.token.as_deref())
            .call()?
            .into_json()?;

        tracing::debug!("Received {} events", events.len());
        Ok(events)
    }
}
