//! GitHub API operations using octocrab.

pub mod auth;
pub mod host;
pub mod publish;
pub mod pulls;

use std::fmt;
use std::str::FromStr;

use crate::error::GitHubError;

pub use auth::resolve_github_token;
pub use host::{GitHubHost, PullRequestHost};
pub use pulls::{ChangedFile, FileStatus, PullRequest};

/// An `owner/repo` pair, as found in `GITHUB_REPOSITORY`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String,
    pub repo: String,
}

impl RepoRef {
    pub fn new(owner: &str, repo: &str) -> Self {
        Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        }
    }
}

impl FromStr for RepoRef {
    type Err = GitHubError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (owner, repo) = trimmed
            .split_once('/')
            .ok_or_else(|| GitHubError::InvalidRepository(s.to_string()))?;
        let repo = repo.strip_suffix(".git").unwrap_or(repo);

        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return Err(GitHubError::InvalidRepository(s.to_string()));
        }

        Ok(Self::new(owner, repo))
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
