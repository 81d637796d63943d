//! The release-notes section kept in a pull request description.
//!
//! The section is always the tail of the body: a separator, a fixed heading,
//! then the generated text. Republishing swaps the tail and leaves everything
//! above it alone.

use std::fmt;
use std::str::FromStr;

/// Delimiter that starts the section: separator plus the
/// `## 🚀 Release Notes` heading.
pub const SECTION_DELIMITER: &str = "\n\n---\n\n## 🚀 Release Notes\n\n";

/// Where the generated notes end up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PublishMode {
    /// Replace or append the marked section in the PR description.
    #[default]
    Body,
    /// Post the notes as a new PR comment.
    Comment,
}

impl PublishMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishMode::Body => "body",
            PublishMode::Comment => "comment",
        }
    }
}

impl fmt::Display for PublishMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublishMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "body" | "description" => Ok(Self::Body),
            "comment" => Ok(Self::Comment),
            _ => Err(format!(
                "Unknown publish mode: {} (expected 'body' or 'comment')",
                s
            )),
        }
    }
}

/// Render the section appended to a PR body.
pub fn render_section(notes: &str) -> String {
    format!("{}{}", SECTION_DELIMITER, notes)
}

/// Whether `body` already carries a generated section.
pub fn has_section(body: &str) -> bool {
    body.contains(SECTION_DELIMITER)
}

/// Produce the new PR body for `notes`.
///
/// If the body already has a section, everything from its first delimiter
/// to the end is replaced. Otherwise the section is appended.
pub fn merge_into_body(current: Option<&str>, notes: &str) -> String {
    let current = current.unwrap_or("");
    let section = render_section(notes);

    match current.find(SECTION_DELIMITER) {
        Some(idx) => format!("{}{}", &current[..idx], section),
        None => format!("{}{}", current, section),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_when_missing() {
        let body = merge_into_body(Some("Fixes #12."), "- first");
        assert_eq!(body, "Fixes #12.\n\n---\n\n## 🚀 Release Notes\n\n- first");
    }

    #[test]
    fn test_append_to_empty_body() {
        assert_eq!(merge_into_body(None, "notes"), render_section("notes"));
        assert_eq!(merge_into_body(Some(""), "notes"), render_section("notes"));
    }

    #[test]
    fn test_replace_existing_section() {
        let first = merge_into_body(Some("Intro\n\nMore intro"), "old notes\n\n## Summary");
        let second = merge_into_body(Some(&first), "new notes");

        assert_eq!(second, "Intro\n\nMore intro\n\n---\n\n## 🚀 Release Notes\n\nnew notes");
        assert!(!second.contains("old notes"));
    }

    #[test]
    fn test_republish_is_idempotent() {
        let once = merge_into_body(Some("Body"), "same");
        let twice = merge_into_body(Some(&once), "same");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_plain_separator_is_not_a_section() {
        let body = "Intro\n\n---\n\nFooter";
        assert!(!has_section(body));
        let merged = merge_into_body(Some(body), "notes");
        assert!(merged.starts_with(body));
    }

    #[test]
    fn test_publish_mode_parse() {
        assert_eq!("body".parse::<PublishMode>().unwrap(), PublishMode::Body);
        assert_eq!("Comment".parse::<PublishMode>().unwrap(), PublishMode::Comment);
        assert!("issue".parse::<PublishMode>().is_err());
        assert_eq!(PublishMode::default(), PublishMode::Body);
    }
}
