use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::models::request::{non_blank, require_repo};

pub const DEFAULT_BRANCH: &str = "main";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadmeRequest {
    pub repo_owner: Option<String>,
    pub repo_name: Option<String>,
    pub branch: Option<String>,
}

/// A request whose required fields are present.
#[derive(Debug, Clone, PartialEq)]
pub struct RepoTarget<'a> {
    pub owner: &'a str,
    pub name: &'a str,
    pub branch: &'a str,
}

impl ReadmeRequest {
    pub fn target(&self) -> Result<RepoTarget<'_>, AppError> {
        let (owner, name) = require_repo(self.repo_owner.as_deref(), self.repo_name.as_deref())?;
        let branch = non_blank(self.branch.as_deref()).unwrap_or(DEFAULT_BRANCH);
        Ok(RepoTarget {
            owner,
            name,
            branch,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadmeResponse {
    pub repo_data: Value,
    pub files_list: Vec<String>,
    pub readme: String,
}
