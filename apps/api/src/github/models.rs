//! Typed views of the GitHub REST records the pipelines read.
//!
//! Only fields the pipelines use are modelled; everything that is passed back to the
//! caller untouched (repository metadata, contributors, events) stays a raw `Value`.

use serde::Deserialize;
use serde_json::Value;

/// `GET /users/{username}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct User {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub followers: Option<u64>,
    pub following: Option<u64>,
    pub public_repos: Option<u64>,
    pub created_at: Option<String>,
}

/// One element of `GET /users/{username}/repos`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub language: Option<String>,
    pub updated_at: Option<String>,
    pub html_url: Option<String>,
}

/// `GET /repos/{owner}/{repo}/git/trees/{branch}?recursive=1`
#[derive(Debug, Clone, Deserialize)]
pub struct Tree {
    pub tree: Vec<TreeEntry>,
    #[serde(default)]
    pub truncated: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub entry_type: String,
}

impl TreeEntry {
    pub fn is_blob(&self) -> bool {
        self.entry_type == "blob"
    }
}

/// `GET /repos/{owner}/{repo}/contents/{path}`
#[derive(Debug, Clone, Deserialize)]
pub struct FileContent {
    pub content: Option<String>,
    pub encoding: Option<String>,
}

/// One element of `GET /repos/{owner}/{repo}/issues?state=all`.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub state: String,
}

/// One element of `GET /repos/{owner}/{repo}/stats/commit_activity`, oldest week first.
#[derive(Debug, Clone, Deserialize)]
pub struct WeeklyCommits {
    pub total: u64,
}

/// A fetched source file, or the placeholder when its content could not be retrieved.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub path: String,
    pub content: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Resource bundles: everything one pipeline run fetched, immutable after fetch
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ProfileBundle {
    pub user: User,
    pub repos: Vec<Repository>,
    /// Reverse-chronological public events, raw.
    pub events: Vec<Value>,
}

#[derive(Debug, Clone)]
pub struct ReadmeBundle {
    pub repo: Value,
    /// Every blob path in tree order.
    pub files_list: Vec<String>,
    /// Up to ten allow-listed source files with their (possibly placeholder) content.
    pub files: Vec<SourceFile>,
}

#[derive(Debug, Clone)]
pub struct RepoStatsBundle {
    pub repo: Value,
    pub contributors: Value,
    pub commit_activity: Vec<WeeklyCommits>,
    /// Language byte counts in the order GitHub returned them.
    pub languages: Vec<(String, u64)>,
    pub issues: Vec<Issue>,
}
