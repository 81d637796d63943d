//! Error types for prnotes modules using thiserror.

use thiserror::Error;

/// Errors from GitHub API operations.
#[derive(Error, Debug)]
pub enum GitHubError {
    #[error(
        "GitHub authentication failed: no token found. Pass the github-token input or set GITHUB_TOKEN environment variable"
    )]
    AuthenticationFailed,

    #[error("Failed to build GitHub client: {0}")]
    ClientBuild(#[source] Box<octocrab::Error>),

    #[error("GitHub API request failed: {0}")]
    Api(#[source] Box<octocrab::Error>),

    #[error("Rate limited by GitHub API. Resets at: {reset_time}")]
    RateLimited { reset_time: String },

    #[error("Pull request #{number} not found in {owner}/{repo}")]
    PullRequestNotFound {
        owner: String,
        repo: String,
        number: u64,
    },

    #[error("Invalid repository '{0}': expected owner/repo")]
    InvalidRepository(String),
}

/// Errors from the Gemini generateContent API.
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("Gemini API key is empty. Set the gemini-api-key input")]
    MissingApiKey,

    #[error("Gemini API key contains characters not allowed in an HTTP header")]
    InvalidApiKey,

    #[error("Invalid Gemini endpoint '{0}': must start with http:// or https://")]
    InvalidEndpoint(String),

    #[error("Gemini request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Gemini returned HTTP {status}: {snippet}")]
    HttpStatus { status: u16, snippet: String },

    #[error("Failed to decode Gemini response: {0}")]
    Decode(String),

    #[error("Gemini returned no text")]
    EmptyResponse,
}

/// Errors from writing GitHub Actions outputs.
#[derive(Error, Debug)]
pub enum ActionError {
    #[error("Failed to write action output '{name}': {source}")]
    WriteOutput {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Output value for '{0}' contains the heredoc delimiter")]
    DelimiterCollision(String),
}

/// Any failure during a single release-notes run.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    GitHub(#[from] GitHubError),

    #[error(transparent)]
    Gemini(#[from] GeminiError),
}
