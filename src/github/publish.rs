//! Pull request writes: body edits and comments.

use octocrab::Octocrab;
use serde::Serialize;
use tracing::debug;

use crate::error::GitHubError;

use super::RepoRef;
use super::pulls::classify_error;

#[derive(Serialize)]
struct BodyPayload<'a> {
    body: &'a str,
}

/// Replace the pull request description with `body`.
pub async fn update_pull_request_body(
    octocrab: &Octocrab,
    repo: &RepoRef,
    number: u64,
    body: &str,
) -> Result<(), GitHubError> {
    let route = format!("/repos/{}/{}/pulls/{}", repo.owner, repo.repo, number);
    debug!("PATCH {} ({} chars)", route, body.len());

    let _: serde_json::Value = octocrab
        .patch(route, Some(&BodyPayload { body }))
        .await
        .map_err(|e| classify_error(e, repo, number))?;

    Ok(())
}

/// Post `body` as a new comment on the pull request's conversation.
pub async fn create_comment(
    octocrab: &Octocrab,
    repo: &RepoRef,
    number: u64,
    body: &str,
) -> Result<(), GitHubError> {
    // PR conversation comments live on the issues API.
    let route = format!("/repos/{}/{}/issues/{}/comments", repo.owner, repo.repo, number);
    debug!("POST {} ({} chars)", route, body.len());

    let _: serde_json::Value = octocrab
        .post(route, Some(&BodyPayload { body }))
        .await
        .map_err(|e| classify_error(e, repo, number))?;

    Ok(())
}
