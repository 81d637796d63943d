//! One release-notes run: fetch, classify, prompt, generate, publish.

use tracing::info;

use crate::commits::classify;
use crate::error::PipelineError;
use crate::gemini::{NotesGenerator, log_token_usage};
use crate::github::PullRequestHost;
use crate::notes::{PublishMode, merge_into_body};
use crate::prompt::{Language, PromptInput, build_prompt};

/// Per-run settings that shape the pipeline.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub pull_request_number: u64,
    pub language: Language,
    pub publish_mode: PublishMode,
    /// Generate but do not touch the pull request.
    pub dry_run: bool,
}

/// Run the whole pipeline once and return the generated notes.
///
/// Steps run strictly in order; the first error aborts the run.
pub async fn run<H, G>(config: &RunConfig, host: &H, generator: &G) -> Result<String, PipelineError>
where
    H: PullRequestHost + ?Sized,
    G: NotesGenerator + ?Sized,
{
    let number = config.pull_request_number;

    let pull_request = host.fetch_pull_request(number).await?;
    info!("Fetched PR #{}: {}", pull_request.number, pull_request.title);

    let changed_files = host.list_changed_files(number).await?;
    let raw_commits = host.list_commits(number).await?;
    info!(
        "Found {} changed file(s) and {} commit(s)",
        changed_files.len(),
        raw_commits.len()
    );

    let summary = classify(&raw_commits);
    info!(
        "{} important, {} non-merge, {} contributor(s)",
        summary.important.len(),
        summary.meaningful.len(),
        summary.contributors.len()
    );

    let prompt = build_prompt(&PromptInput {
        pull_request: &pull_request,
        changed_files: &changed_files,
        commits: &summary,
        language: config.language,
    });

    println!("Generating release notes with Gemini...");
    let generation = generator.generate(&prompt).await?;
    log_token_usage(generation.usage.as_ref());

    let notes = generation.text;

    if config.dry_run {
        println!("\n--- Dry Run Output ---\n");
        println!("{}", notes);
        return Ok(notes);
    }

    match config.publish_mode {
        PublishMode::Body => {
            let new_body = merge_into_body(pull_request.body.as_deref(), &notes);
            host.update_body(number, &new_body).await?;
            println!("Release notes generated and updated in PR description successfully!");
        }
        PublishMode::Comment => {
            host.create_comment(number, &notes).await?;
            println!("Release notes generated and posted as a PR comment successfully!");
        }
    }

    Ok(notes)
}
