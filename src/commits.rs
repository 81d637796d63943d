//! Commit classification: importance flags, merge filtering, contributors.
//!
//! Works on the commit records returned by the pull request commits endpoint
//! and produces the summary the prompt is built from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Keywords that mark a commit as important, matched case-insensitively
/// anywhere in the full commit message.
pub const IMPORTANT_KEYWORDS: &[&str] = &[
    // features
    "feat", "feature", "add", "implement", "create",
    // fixes
    "fix", "bug", "patch", "resolve", "solve",
    // breaking
    "break", "breaking", "major", "remove", "delete",
    // refactoring
    "refactor", "improve", "optimize", "enhance",
    // security
    "security", "vulnerability", "critical",
    // release
    "release", "version", "bump",
    // docs
    "docs", "documentation", "readme",
    // tests
    "test", "testing", "spec",
    // config
    "config", "configuration", "setup",
];

/// Length of the abbreviated commit hash.
pub const SHORT_SHA_LEN: usize = 7;

/// Author name used when GitHub returns a commit without author details.
const UNKNOWN_AUTHOR: &str = "unknown";

/// A commit as returned by `GET /repos/{owner}/{repo}/pulls/{number}/commits`.
///
/// Only the fields the classifier reads are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCommit {
    pub sha: String,
    pub commit: RawCommitDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCommitDetail {
    pub message: String,
    #[serde(default)]
    pub author: Option<RawSignature>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSignature {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

impl RawCommit {
    /// Build a raw commit from its parts. Mostly useful in tests.
    pub fn new(sha: &str, message: &str, author: &str) -> Self {
        Self {
            sha: sha.to_string(),
            commit: RawCommitDetail {
                message: message.to_string(),
                author: Some(RawSignature {
                    name: Some(author.to_string()),
                    date: None,
                }),
            },
        }
    }
}

/// A classified commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    /// First 7 characters of the full hash.
    pub sha: String,
    /// First line of the message.
    pub message: String,
    pub full_message: String,
    pub author: String,
    pub date: Option<DateTime<Utc>>,
    pub is_important: bool,
}

impl Commit {
    pub fn from_raw(raw: &RawCommit) -> Self {
        let full_message = raw.commit.message.clone();
        let message = first_line(&full_message).to_string();
        let (author, date) = match &raw.commit.author {
            Some(sig) => (
                sig.name.clone().unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
                sig.date,
            ),
            None => (UNKNOWN_AUTHOR.to_string(), None),
        };

        Self {
            sha: short_sha(&raw.sha).to_string(),
            is_important: is_important(&full_message),
            message,
            full_message,
            author,
            date,
        }
    }

    /// Whether this is a merge commit by its first line.
    pub fn is_merge(&self) -> bool {
        is_merge(&self.message)
    }
}

/// Aggregate view of a pull request's commits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CommitSummary {
    pub all: Vec<Commit>,
    pub important: Vec<Commit>,
    /// Commits whose first line does not start with "merge".
    pub meaningful: Vec<Commit>,
    /// Distinct author names in first-seen order.
    pub contributors: Vec<String>,
    pub total: usize,
}

/// Classify commits in their original order.
pub fn classify(raw: &[RawCommit]) -> CommitSummary {
    let all: Vec<Commit> = raw.iter().map(Commit::from_raw).collect();

    let important = all.iter().filter(|c| c.is_important).cloned().collect();
    let meaningful = all.iter().filter(|c| !c.is_merge()).cloned().collect();

    let mut contributors: Vec<String> = Vec::new();
    for commit in &all {
        if !contributors.contains(&commit.author) {
            contributors.push(commit.author.clone());
        }
    }

    CommitSummary {
        total: all.len(),
        all,
        important,
        meaningful,
        contributors,
    }
}

/// Case-insensitive keyword match against the whole message.
pub fn is_important(message: &str) -> bool {
    let lower = message.to_lowercase();
    IMPORTANT_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Whether a first line starts with "merge", ignoring case.
pub fn is_merge(first_line: &str) -> bool {
    first_line.to_lowercase().starts_with("merge")
}

fn first_line(message: &str) -> &str {
    message.split('\n').next().unwrap_or("")
}

fn short_sha(sha: &str) -> &str {
    match sha.char_indices().nth(SHORT_SHA_LEN) {
        Some((idx, _)) => &sha[..idx],
        None => sha,
    }
}
