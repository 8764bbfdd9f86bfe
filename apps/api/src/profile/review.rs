//! Profile review pipeline.
//!
//! Flow: fetch_profile_bundle → build_profile_data → build_profile_prompt →
//!       LLM complete → extract_json_object → assemble_review.

use serde_json::json;
use tracing::info;

use crate::aggregate::{recent_activity, top_languages, total_stars};
use crate::errors::AppError;
use crate::github::models::ProfileBundle;
use crate::github::GithubClient;
use crate::llm_client::extract::{extract_json_object, Extraction};
use crate::llm_client::{ChatCompletion, CompletionParams};
use crate::profile::models::{
    BasicInfo, ProfileData, ProfileReviewResponse, ProfileStats, RepositorySummary,
};
use crate::profile::prompts::PROFILE_REVIEW_PROMPT_TEMPLATE;

pub async fn review_profile(
    github: &GithubClient,
    llm: &dyn ChatCompletion,
    username: &str,
) -> Result<ProfileReviewResponse, AppError> {
    let bundle = github.fetch_profile_bundle(username).await?;

    let profile_data = build_profile_data(&bundle);
    info!(
        "Aggregated {username}: {} stars, {} top languages",
        profile_data.stats.total_stars,
        profile_data.stats.top_languages.len()
    );

    let prompt = build_profile_prompt(&profile_data)?;
    info!("Profile prompt for {username}: {} chars", prompt.len());

    let reply = llm.complete(&prompt, CompletionParams::SCORING).await?;
    info!("Profile review reply for {username}: {} chars", reply.len());

    assemble_review(profile_data, &reply)
}

pub fn build_profile_data(bundle: &ProfileBundle) -> ProfileData {
    let user = &bundle.user;
    ProfileData {
        basic_info: BasicInfo {
            name: user.name.clone(),
            login: user.login.clone(),
            avatar: user.avatar_url.clone(),
            bio: user.bio.clone(),
            location: user.location.clone(),
            company: user.company.clone(),
            blog: user.blog.clone(),
            followers: user.followers,
            following: user.following,
            public_repos: user.public_repos,
            created_at: user.created_at.clone(),
        },
        stats: ProfileStats {
            total_stars: total_stars(&bundle.repos),
            top_languages: top_languages(&bundle.repos),
            recent_activity: recent_activity(&bundle.events),
            repositories: bundle
                .repos
                .iter()
                .map(|r| RepositorySummary {
                    id: r.id,
                    name: r.name.clone(),
                    description: r.description.clone(),
                    stars: r.stargazers_count,
                    forks: r.forks_count,
                    language: r.language.clone(),
                    updated_at: r.updated_at.clone(),
                    url: r.html_url.clone(),
                })
                .collect(),
        },
    }
}

pub fn build_profile_prompt(profile_data: &ProfileData) -> Result<String, AppError> {
    let profile_json = serde_json::to_string_pretty(profile_data)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize profile data: {e}")))?;
    Ok(PROFILE_REVIEW_PROMPT_TEMPLATE.replace("{profile_json}", &profile_json))
}

/// Merges the profile data with the analysis found in `reply`.
///
/// No JSON in the reply returns the profile data inside an `ExtractionAbsent`
/// error; an unparsable span is a hard `ExtractionMalformed` failure.
pub fn assemble_review(
    profile_data: ProfileData,
    reply: &str,
) -> Result<ProfileReviewResponse, AppError> {
    match extract_json_object(reply) {
        Extraction::Found(analysis) => Ok(ProfileReviewResponse {
            profile_data,
            analysis,
        }),
        Extraction::Absent => Err(AppError::ExtractionAbsent {
            partial: json!({ "profileData": profile_data }),
        }),
        Extraction::Malformed(e) => Err(AppError::ExtractionMalformed(e.to_string())),
    }
}
