//! Pull request reads via octocrab: metadata, changed files, commits.

use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::commits::RawCommit;
use crate::error::GitHubError;

use super::RepoRef;

/// GitHub's maximum page size for list endpoints.
const PER_PAGE: u8 = 100;

/// Safety limit to prevent infinite loops. The files endpoint caps at
/// 3000 entries, which is 30 pages of 100.
const MAX_PAGES: u32 = 30;

/// The pull request fields the release notes are built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
}

/// File status as reported by the pull request files endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Modified,
    Removed,
    Renamed,
    Copied,
    Changed,
    Unchanged,
}

impl From<String> for FileStatus {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "added" => Self::Added,
            "modified" => Self::Modified,
            "removed" => Self::Removed,
            "renamed" => Self::Renamed,
            "copied" => Self::Copied,
            "unchanged" => Self::Unchanged,
            _ => Self::Changed,
        }
    }
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Removed => "removed",
            Self::Renamed => "renamed",
            Self::Copied => "copied",
            Self::Changed => "changed",
            Self::Unchanged => "unchanged",
        }
    }
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry from `GET /repos/{owner}/{repo}/pulls/{number}/files`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangedFile {
    pub filename: String,
    pub status: FileStatus,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    #[serde(default)]
    pub changes: u64,
}

#[derive(Serialize)]
struct PageParams {
    per_page: u8,
    page: u32,
}

/// Fetch a single pull request.
pub async fn fetch_pull_request(
    octocrab: &Octocrab,
    repo: &RepoRef,
    number: u64,
) -> Result<PullRequest, GitHubError> {
    let route = format!("/repos/{}/{}/pulls/{}", repo.owner, repo.repo, number);
    octocrab
        .get::<PullRequest, _, ()>(route, None)
        .await
        .map_err(|e| classify_error(e, repo, number))
}

/// List every file changed by a pull request.
pub async fn list_changed_files(
    octocrab: &Octocrab,
    repo: &RepoRef,
    number: u64,
) -> Result<Vec<ChangedFile>, GitHubError> {
    let route = format!("/repos/{}/{}/pulls/{}/files", repo.owner, repo.repo, number);
    fetch_all_pages(octocrab, &route, repo, number).await
}

/// List every commit on a pull request, oldest first.
pub async fn list_commits(
    octocrab: &Octocrab,
    repo: &RepoRef,
    number: u64,
) -> Result<Vec<RawCommit>, GitHubError> {
    let route = format!("/repos/{}/{}/pulls/{}/commits", repo.owner, repo.repo, number);
    fetch_all_pages(octocrab, &route, repo, number).await
}

/// Walk a list endpoint page by page until a short page comes back.
async fn fetch_all_pages<T: DeserializeOwned>(
    octocrab: &Octocrab,
    route: &str,
    repo: &RepoRef,
    number: u64,
) -> Result<Vec<T>, GitHubError> {
    let mut items = Vec::new();
    let mut page = 1u32;

    loop {
        let params = PageParams {
            per_page: PER_PAGE,
            page,
        };

        let batch: Vec<T> = octocrab
            .get(route, Some(&params))
            .await
            .map_err(|e| classify_error(e, repo, number))?;

        let count = batch.len();
        debug!("{} page {}: {} item(s)", route, page, count);
        items.extend(batch);

        if count < PER_PAGE as usize {
            break;
        }

        page += 1;

        if page > MAX_PAGES {
            warn!(
                "Reached {}-page safety limit while listing {}",
                MAX_PAGES, route
            );
            break;
        }
    }

    Ok(items)
}

/// Map an octocrab error onto the cases callers care about.
///
/// Checks both Display and Debug output to handle the different octocrab
/// error formats.
pub(crate) fn classify_error(e: octocrab::Error, repo: &RepoRef, number: u64) -> GitHubError {
    let err_display = e.to_string();
    let err_debug = format!("{:?}", e);

    if err_display.to_lowercase().contains("rate limit")
        || err_debug.to_lowercase().contains("rate limit")
    {
        return GitHubError::RateLimited {
            reset_time: "unknown".to_string(),
        };
    }

    if err_display.contains("Not Found") || err_debug.contains("Not Found") {
        return GitHubError::PullRequestNotFound {
            owner: repo.owner.clone(),
            repo: repo.repo.clone(),
            number,
        };
    }

    GitHubError::Api(Box::new(e))
}
