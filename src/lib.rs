//! prnotes - drafts release notes for a GitHub pull request with Gemini.
//!
//! # Overview
//!
//! prnotes reads a pull request's metadata, changed files, and commits,
//! classifies the commits, asks Gemini to write release notes, and publishes
//! the result back to the pull request as a marked section of the
//! description or as a comment.

pub mod action;
pub mod commits;
pub mod error;
pub mod gemini;
pub mod github;
pub mod notes;
pub mod pipeline;
pub mod prompt;

// Re-export commonly used types
pub use commits::{Commit, CommitSummary, RawCommit, classify};
pub use error::{ActionError, GeminiError, GitHubError, PipelineError};
pub use gemini::{GeminiClient, Generation, NotesGenerator, UsageMetadata};
pub use github::{ChangedFile, FileStatus, GitHubHost, PullRequest, PullRequestHost, RepoRef};
pub use notes::{PublishMode, merge_into_body};
pub use pipeline::{RunConfig, run};
pub use prompt::{Language, PromptInput, build_prompt};
