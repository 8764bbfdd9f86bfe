use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::aggregate::LanguageCount;
use crate::errors::AppError;
use crate::models::request::non_blank;

#[derive(Debug, Deserialize)]
pub struct ProfileReviewRequest {
    pub username: Option<String>,
}

impl ProfileReviewRequest {
    /// The requested login; missing and blank are both rejected.
    pub fn username(&self) -> Result<&str, AppError> {
        non_blank(self.username.as_deref())
            .ok_or_else(|| AppError::Validation("GitHub username is required".to_string()))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicInfo {
    pub name: Option<String>,
    pub login: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub followers: Option<u64>,
    pub following: Option<u64>,
    pub public_repos: Option<u64>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositorySummary {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub stars: u64,
    pub forks: u64,
    pub language: Option<String>,
    pub updated_at: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileStats {
    pub total_stars: u64,
    pub top_languages: Vec<LanguageCount>,
    pub recent_activity: Vec<Value>,
    pub repositories: Vec<RepositorySummary>,
}

/// Everything fetched and aggregated for one profile; embedded in the prompt
/// and returned to the caller as `profileData`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    pub basic_info: BasicInfo,
    pub stats: ProfileStats,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileReviewResponse {
    pub profile_data: ProfileData,
    pub analysis: Value,
}
