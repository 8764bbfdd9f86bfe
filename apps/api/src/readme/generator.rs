//! README generation pipeline.
//!
//! Flow: fetch_readme_bundle (repo, tree, ≤10 code files) → build_readme_prompt →
//!       LLM complete. The reply is the README itself; no JSON is extracted.

use tracing::info;

use crate::errors::AppError;
use crate::github::GithubClient;
use crate::llm_client::{ChatCompletion, CompletionParams};
use crate::readme::models::{ReadmeResponse, RepoTarget};
use crate::readme::prompts::build_readme_prompt;

pub async fn generate_readme(
    github: &GithubClient,
    llm: &dyn ChatCompletion,
    target: &RepoTarget<'_>,
) -> Result<ReadmeResponse, AppError> {
    let bundle = github
        .fetch_readme_bundle(target.owner, target.name, target.branch)
        .await?;

    let prompt = build_readme_prompt(&bundle.repo, &bundle.files);
    info!(
        "README prompt for {}/{}: {} files, {} chars",
        target.owner,
        target.name,
        bundle.files.len(),
        prompt.len()
    );

    let readme = llm.complete(&prompt, CompletionParams::DOCUMENT).await?;
    info!(
        "Generated README for {}/{}: {} chars",
        target.owner,
        target.name,
        readme.len()
    );

    Ok(ReadmeResponse {
        repo_data: bundle.repo,
        files_list: bundle.files_list,
        readme,
    })
}
