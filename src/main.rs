//! prnotes - action entry point.
//!
//! Every flag falls back to the `INPUT_*` variable the Actions runner
//! exports for the matching action input.

use std::process::ExitCode;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use clap::error::ErrorKind;
use tracing_subscriber::EnvFilter;

use prnotes::action::{RELEASE_NOTES_OUTPUT, format_failure, non_blank, set_output};
use prnotes::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL, GeminiClient};
use prnotes::github::{GitHubHost, RepoRef, resolve_github_token};
use prnotes::{Language, PublishMode, RunConfig};

/// Generate release notes for a pull request with Gemini.
#[derive(Parser, Debug)]
#[command(name = "prnotes")]
#[command(about = "Generate release notes for a pull request with Gemini")]
#[command(version)]
struct Cli {
    /// Gemini API key
    #[arg(long, env = "INPUT_GEMINI-API-KEY", hide_env_values = true)]
    gemini_api_key: String,

    /// GitHub token (falls back to GITHUB_TOKEN / GH_TOKEN)
    #[arg(long, env = "INPUT_GITHUB-TOKEN", hide_env_values = true)]
    github_token: Option<String>,

    /// Pull request number
    #[arg(long, env = "INPUT_PULL-REQUEST-NUMBER")]
    pull_request_number: u64,

    /// Output language: en, ja, es, fr, de (other codes use ja) [default: en]
    #[arg(long, env = "INPUT_LANGUAGE")]
    language: Option<String>,

    /// Where to publish: body (PR description section) or comment [default: body]
    #[arg(long, env = "INPUT_PUBLISH-MODE")]
    publish_mode: Option<String>,

    /// Gemini model name [default: gemini-2.0-flash-001]
    #[arg(long, env = "INPUT_MODEL")]
    model: Option<String>,

    /// Repository as owner/repo
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: RepoRef,

    /// GitHub API root (GitHub Enterprise Server)
    #[arg(long, env = "GITHUB_API_URL")]
    github_api_url: Option<String>,

    /// Gemini API root [default: https://generativelanguage.googleapis.com]
    #[arg(long, env = "INPUT_GEMINI-ENDPOINT")]
    gemini_endpoint: Option<String>,

    /// Dry run - print the notes without touching the pull request
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn language(&self) -> Language {
        Language::from_input(self.language.as_deref())
    }

    fn publish_mode(&self) -> Result<PublishMode> {
        match non_blank(self.publish_mode.as_deref()) {
            Some(mode) => mode.parse().map_err(|e: String| anyhow!(e)),
            None => Ok(PublishMode::default()),
        }
    }

    fn model(&self) -> &str {
        non_blank(self.model.as_deref()).unwrap_or(DEFAULT_MODEL)
    }

    fn gemini_endpoint(&self) -> &str {
        non_blank(self.gemini_endpoint.as_deref()).unwrap_or(DEFAULT_ENDPOINT)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(e),
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{}", format_failure(&format!("{:#}", e)));
            ExitCode::FAILURE
        }
    }
}

/// Help and version go through clap; real input errors fail the step.
fn report_parse_error(e: clap::Error) -> ExitCode {
    match parse_failure(&e) {
        Some(line) => {
            println!("{}", line);
            ExitCode::FAILURE
        }
        None => {
            let _ = e.print();
            ExitCode::SUCCESS
        }
    }
}

fn parse_failure(e: &clap::Error) -> Option<String> {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => None,
        _ => Some(format_failure(e.to_string().trim())),
    }
}

/// Log to stderr; `RUST_LOG` overrides the default `info` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let language = cli.language();
    let publish_mode = cli.publish_mode()?;

    let token = resolve_github_token(cli.github_token.as_deref())
        .context("GitHub token is required")?;

    let generator = GeminiClient::with_endpoint(&cli.gemini_api_key, cli.model(), cli.gemini_endpoint())
        .context("Failed to create Gemini client")?;

    let host = GitHubHost::new(&token, cli.repository, cli.github_api_url.as_deref())
        .context("Failed to create GitHub client")?;

    let config = RunConfig {
        pull_request_number: cli.pull_request_number,
        language,
        publish_mode,
        dry_run: cli.dry_run,
    };

    println!(
        "Drafting release notes for {}#{} (language: {}, publish: {})",
        host.repo(),
        config.pull_request_number,
        config.language,
        config.publish_mode
    );

    let notes = prnotes::run(&config, &host, &generator).await?;

    set_output(RELEASE_NOTES_OUTPUT, &notes).context("Failed to set action output")?;

    Ok(())
}
