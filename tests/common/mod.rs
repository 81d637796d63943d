//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use octocrab::Octocrab;
use prnotes::github::{GitHubHost, RepoRef};
use serde_json::{Value, json};
use wiremock::MockServer;

/// Helper to create an octocrab client pointing to a mock server.
pub fn mock_octocrab(server: &MockServer) -> Octocrab {
    Octocrab::builder()
        .base_uri(server.uri())
        .expect("Failed to set base URI")
        .build()
        .expect("Failed to build octocrab")
}

/// A GitHub host for `owner/repo` backed by the mock server.
pub fn mock_host(server: &MockServer) -> GitHubHost {
    GitHubHost::with_client(mock_octocrab(server), RepoRef::new("owner", "repo"))
}

/// Minimal pull request JSON as returned by `GET /repos/{o}/{r}/pulls/{n}`.
pub fn mock_pr(number: u64, title: &str, body: Option<&str>) -> Value {
    json!({
        "url": format!("https://api.github.com/repos/owner/repo/pulls/{}", number),
        "id": number * 1000,
        "number": number,
        "state": "open",
        "title": title,
        "body": body,
        "user": { "login": "testuser", "id": 100 },
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-15T00:00:00Z"
    })
}

/// Commit JSON as returned by `GET /repos/{o}/{r}/pulls/{n}/commits`.
pub fn mock_commit(sha: &str, message: &str, author: &str) -> Value {
    json!({
        "sha": sha,
        "node_id": format!("C_{}", sha),
        "commit": {
            "author": {
                "name": author,
                "email": format!("{}@example.com", author),
                "date": "2024-06-15T12:00:00Z"
            },
            "committer": {
                "name": author,
                "email": format!("{}@example.com", author),
                "date": "2024-06-15T12:00:00Z"
            },
            "message": message,
            "comment_count": 0
        },
        "author": { "login": author, "id": 1 },
        "parents": []
    })
}

/// Changed file JSON as returned by `GET /repos/{o}/{r}/pulls/{n}/files`.
pub fn mock_file(filename: &str, status: &str, additions: u64, deletions: u64) -> Value {
    json!({
        "sha": "bbcd538c8e72b8c175046e27cc8f907076331401",
        "filename": filename,
        "status": status,
        "additions": additions,
        "deletions": deletions,
        "changes": additions + deletions,
        "blob_url": format!("https://github.com/owner/repo/blob/abc/{}", filename),
        "patch": "@@ -1 +1 @@"
    })
}

/// A 40-character hex SHA whose 7-character prefix encodes `n`.
pub fn sha(n: usize) -> String {
    format!("{:07x}{}", n, "a".repeat(33))
}

/// Gemini `generateContent` response JSON.
pub fn gemini_response(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }], "role": "model" },
            "finishReason": "STOP",
            "index": 0
        }],
        "usageMetadata": {
            "promptTokenCount": 321,
            "candidatesTokenCount": 123,
            "totalTokenCount": 444
        },
        "modelVersion": "gemini-2.0-flash-001"
    })
}

/// GitHub's error body for a missing resource.
pub fn not_found() -> Value {
    json!({
        "message": "Not Found",
        "documentation_url": "https://docs.github.com/rest"
    })
}
