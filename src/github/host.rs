//! The source-control host seen by the pipeline.

use async_trait::async_trait;
use octocrab::Octocrab;
use tracing::info;

use crate::commits::RawCommit;
use crate::error::GitHubError;

use super::pulls::{self, ChangedFile, PullRequest};
use super::{RepoRef, publish};

/// Reads and writes a single repository's pull requests.
///
/// This abstraction allows mocking GitHub in pipeline tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestHost: Send + Sync {
    async fn fetch_pull_request(&self, number: u64) -> Result<PullRequest, GitHubError>;

    async fn list_changed_files(&self, number: u64) -> Result<Vec<ChangedFile>, GitHubError>;

    async fn list_commits(&self, number: u64) -> Result<Vec<RawCommit>, GitHubError>;

    async fn update_body(&self, number: u64, body: &str) -> Result<(), GitHubError>;

    async fn create_comment(&self, number: u64, body: &str) -> Result<(), GitHubError>;
}

/// [`PullRequestHost`] backed by the GitHub REST API.
pub struct GitHubHost {
    octocrab: Octocrab,
    repo: RepoRef,
}

impl GitHubHost {
    /// Build a client authenticated with `token`.
    ///
    /// `api_url` overrides the API root for GitHub Enterprise Server
    /// (the runner exports it as `GITHUB_API_URL`).
    pub fn new(token: &str, repo: RepoRef, api_url: Option<&str>) -> Result<Self, GitHubError> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        if let Some(url) = api_url.map(str::trim).filter(|u| !u.is_empty()) {
            builder = builder
                .base_uri(url)
                .map_err(|e| GitHubError::ClientBuild(Box::new(e)))?;
        }

        let octocrab = builder
            .build()
            .map_err(|e| GitHubError::ClientBuild(Box::new(e)))?;

        info!("GitHub client ready for {}", repo);
        Ok(Self::with_client(octocrab, repo))
    }

    /// Use a pre-configured octocrab client.
    ///
    /// This allows dependency injection for testing with mock servers.
    pub fn with_client(octocrab: Octocrab, repo: RepoRef) -> Self {
        Self { octocrab, repo }
    }

    pub fn repo(&self) -> &RepoRef {
        &self.repo
    }
}

#[async_trait]
impl PullRequestHost for GitHubHost {
    async fn fetch_pull_request(&self, number: u64) -> Result<PullRequest, GitHubError> {
        pulls::fetch_pull_request(&self.octocrab, &self.repo, number).await
    }

    async fn list_changed_files(&self, number: u64) -> Result<Vec<ChangedFile>, GitHubError> {
        pulls::list_changed_files(&self.octocrab, &self.repo, number).await
    }

    async fn list_commits(&self, number: u64) -> Result<Vec<RawCommit>, GitHubError> {
        pulls::list_commits(&self.octocrab, &self.repo, number).await
    }

    async fn update_body(&self, number: u64, body: &str) -> Result<(), GitHubError> {
        publish::update_pull_request_body(&self.octocrab, &self.repo, number, body).await
    }

    async fn create_comment(&self, number: u64, body: &str) -> Result<(), GitHubError> {
        publish::create_comment(&self.octocrab, &self.repo, number, body).await
    }
}
