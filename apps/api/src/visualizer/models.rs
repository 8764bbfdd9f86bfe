use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::aggregate::{IssueCounts, LanguageShares, WeekActivity};
use crate::errors::AppError;
use crate::models::request::require_repo;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizeRequest {
    pub repo_owner: Option<String>,
    pub repo_name: Option<String>,
}

impl VisualizeRequest {
    pub fn owner_and_name(&self) -> Result<(&str, &str), AppError> {
        require_repo(self.repo_owner.as_deref(), self.repo_name.as_deref())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizeResponse {
    pub repo_data: Value,
    pub contributors: Value,
    pub commit_activity: Vec<WeekActivity>,
    pub languages: LanguageShares,
    pub issues: IssueCounts,
}
