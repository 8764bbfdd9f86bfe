//! Repository visualization pipeline.
//!
//! Flow: fetch_repo_stats_bundle → aggregate (commit weeks, language shares,
//!       issue partition) → assemble. No model call is involved.

use tracing::info;

use crate::aggregate::{commit_activity, issue_counts, language_shares, AggregateError};
use crate::errors::AppError;
use crate::github::models::RepoStatsBundle;
use crate::github::GithubClient;
use crate::visualizer::models::VisualizeResponse;

pub async fn visualize_repository(
    github: &GithubClient,
    owner: &str,
    name: &str,
) -> Result<VisualizeResponse, AppError> {
    let bundle = github.fetch_repo_stats_bundle(owner, name).await?;
    let response = build_visualization(bundle)?;
    info!(
        "Visualized {owner}/{name}: {} weeks, {} languages, {} open / {} closed issues",
        response.commit_activity.len(),
        response.languages.0.len(),
        response.issues.open,
        response.issues.closed
    );
    Ok(response)
}

pub fn build_visualization(bundle: RepoStatsBundle) -> Result<VisualizeResponse, AggregateError> {
    Ok(VisualizeResponse {
        commit_activity: commit_activity(&bundle.commit_activity),
        languages: language_shares(&bundle.languages)?,
        issues: issue_counts(&bundle.issues),
        repo_data: bundle.repo,
        contributors: bundle.contributors,
    })
}
