//! GitHub token resolution.
//!
//! Lookup order:
//! 1. The `github-token` action input (passed explicitly)
//! 2. GITHUB_TOKEN env var
//! 3. GH_TOKEN env var

use std::env;

use crate::error::GitHubError;

/// Resolve the token used for every GitHub API call.
///
/// Blank values are skipped so an unset action input (which the runner
/// exports as an empty string) falls through to the environment.
pub fn resolve_github_token(explicit: Option<&str>) -> Result<String, GitHubError> {
    if let Some(token) = explicit.map(str::trim)
        && !token.is_empty()
    {
        return Ok(token.to_string());
    }

    for var in ["GITHUB_TOKEN", "GH_TOKEN"] {
        if let Ok(token) = env::var(var) {
            let token = token.trim();
            if !token.is_empty() {
                return Ok(token.to_string());
            }
        }
    }

    Err(GitHubError::AuthenticationFailed)
}
