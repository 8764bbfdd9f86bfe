//! Source-file sub-fetch for README generation.
//!
//! Picks up to ten allow-listed code files from the recursive tree listing and
//! fetches their contents. A file whose content cannot be retrieved or decoded is
//! replaced by [`CONTENT_PLACEHOLDER`]; it never fails the pipeline.

use base64::Engine;
use futures::future::join_all;
use tracing::{info, warn};

use super::models::{FileContent, ReadmeBundle, SourceFile, Tree};
use super::{GithubClient, GithubError};

pub const CODE_EXTENSIONS: [&str; 13] = [
    "js", "jsx", "ts", "tsx", "py", "java", "c", "cpp", "cs", "go", "rs", "rb", "php",
];
pub const MAX_CODE_FILES: usize = 10;
pub const CONTENT_PLACEHOLDER: &str = "// Content could not be retrieved";

/// Every blob path in tree order.
pub fn blob_paths(tree: &Tree) -> Vec<String> {
    tree.tree
        .iter()
        .filter(|entry| entry.is_blob())
        .map(|entry| entry.path.clone())
        .collect()
}

/// Text after the last `.` of the path, lower-cased.
pub fn is_code_file(path: &str) -> bool {
    let extension = path.rsplit('.').next().unwrap_or(path).to_lowercase();
    CODE_EXTENSIONS.contains(&extension.as_str())
}

/// The first ten code files, in tree order.
pub fn select_code_files(paths: &[String]) -> Vec<&str> {
    paths
        .iter()
        .map(String::as_str)
        .filter(|p| is_code_file(p))
        .take(MAX_CODE_FILES)
        .collect()
}

/// Decodes a contents-API payload. GitHub wraps base64 at 60 columns, so
/// whitespace is dropped before decoding.
pub fn decode_content(file: &FileContent) -> Result<String, String> {
    if let Some(encoding) = file.encoding.as_deref() {
        if encoding != "base64" {
            return Err(format!("unsupported encoding '{encoding}'"));
        }
    }
    let encoded: String = file
        .content
        .as_deref()
        .ok_or_else(|| "missing content".to_string())?
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| format!("invalid base64: {e}"))?;
    String::from_utf8(bytes).map_err(|e| format!("not valid UTF-8: {e}"))
}

impl GithubClient {
    pub async fn fetch_file_content(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        branch: &str,
    ) -> Result<FileContent, GithubError> {
        let mut segments = vec!["repos", owner, repo, "contents"];
        segments.extend(path.split('/'));
        let url = self.endpoint(&segments, &[("ref", branch)])?;
        self.get(url).await
    }

    /// Fetches `paths` concurrently, keeping their order. Never fails.
    pub async fn fetch_source_files(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        paths: &[&str],
    ) -> Vec<SourceFile> {
        let fetches = paths.iter().map(|path| async move {
            let content = match self.fetch_file_content(owner, repo, path, branch).await {
                Ok(file) => decode_content(&file),
                Err(e) => Err(e.to_string()),
            };
            let content = content.unwrap_or_else(|reason| {
                warn!("Using placeholder for {path}: {reason}");
                CONTENT_PLACEHOLDER.to_string()
            });
            SourceFile {
                path: path.to_string(),
                content,
            }
        });
        join_all(fetches).await
    }

    /// Repository metadata, blob listing, and up to ten code files with content.
    pub async fn fetch_readme_bundle(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<ReadmeBundle, GithubError> {
        let (repo_data, tree) = tokio::try_join!(
            self.fetch_repository(owner, repo),
            self.fetch_tree(owner, repo, branch),
        )?;

        let files_list = blob_paths(&tree);
        let code_files = select_code_files(&files_list);
        info!(
            "{owner}/{repo}@{branch}: {} blobs, fetching {} code files",
            files_list.len(),
            code_files.len()
        );

        let files = self.fetch_source_files(owner, repo, branch, &code_files).await;

        Ok(ReadmeBundle {
            repo: repo_data,
            files_list,
            files,
        })
    }
}
