//! Prompt construction for release-notes generation.

use std::fmt;

use crate::commits::{Commit, CommitSummary};
use crate::github::{ChangedFile, PullRequest};

/// Output language for the generated notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Ja,
    Es,
    Fr,
    De,
}

impl Language {
    /// Map a language code to a language. Codes match exactly; anything
    /// else, including other casings, falls back to Japanese.
    pub fn from_code(code: &str) -> Self {
        match code {
            "en" => Self::En,
            "ja" => Self::Ja,
            "es" => Self::Es,
            "fr" => Self::Fr,
            "de" => Self::De,
            _ => Self::Ja,
        }
    }

    /// Resolve the `language` action input. Only an unset or empty input
    /// means English.
    pub fn from_input(input: Option<&str>) -> Self {
        match input {
            None | Some("") => Self::En,
            Some(code) => Self::from_code(code),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ja => "ja",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::De => "de",
        }
    }

    /// The sentence that opens the prompt.
    pub fn instruction(&self) -> &'static str {
        match self {
            Self::En => "Please generate release notes in English.",
            Self::Ja => "リリースノートを日本語で生成してください。",
            Self::Es => "Por favor, genere notas de lanzamiento en español.",
            Self::Fr => "Veuillez générer des notes de version en français.",
            Self::De => "Bitte erstellen Sie Release-Notizen auf Deutsch.",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Everything the prompt is built from.
#[derive(Debug, Clone)]
pub struct PromptInput<'a> {
    pub pull_request: &'a PullRequest,
    /// Not rendered into the prompt yet.
    pub changed_files: &'a [ChangedFile],
    pub commits: &'a CommitSummary,
    pub language: Language,
}

/// Build the prompt sent to the model.
pub fn build_prompt(input: &PromptInput<'_>) -> String {
    let commits = input.commits;

    let contributors = commits
        .contributors
        .iter()
        .map(|name| format!("- {}", name))
        .collect::<Vec<_>>()
        .join("\n");

    let important = commit_lines(&commits.important);
    let meaningful = commit_lines(&commits.meaningful);

    format!(
        r#"
{instruction}

以下のプルリクエスト情報に基づいて、具体的なリリースノートをマークダウン形式で生成してください：

**厳守事項：**
- バージョン番号、バージョン表記、[バージョン番号を挿入]などは一切含めないでください
- 「このリリースでは」「ユーザー体験の大幅な向上」などの抽象的な表現は使用しないでください
- プレースホルダーやテンプレート文字列は絶対に使用しないでください
- 具体的な変更内容のみを記述してください

**貢献者:**
{contributors}

**重要なコミット ({important_count}/{total}):**
{important}

**すべてのコミット:**
{meaningful}

上記のコミット情報を基に、以下の構成でリリースノートを作成してください：

## 要約
（変更を元にプルリクエストの概要を記述）

## 新機能
（該当するコミットがある場合のみ、具体的な機能を記述）

## バグ修正
（該当するコミットがある場合のみ、修正内容を記述）

## 改善
（該当するコミットがある場合のみ、改善内容を記述）

## 破壊的変更
（該当するコミットがある場合のみ、変更内容を記述）

## 貢献者
（貢献者一覧）

抽象的な表現は避け、コミットメッセージから読み取れる具体的な変更内容のみを記述してください。
"#,
        instruction = input.language.instruction(),
        important_count = commits.important.len(),
        total = commits.total,
    )
}

fn commit_lines(commits: &[Commit]) -> String {
    commits
        .iter()
        .map(|c| format!("- {}: {} (by {})", c.sha, c.message, c.author))
        .collect::<Vec<_>>()
        .join("\n")
}
