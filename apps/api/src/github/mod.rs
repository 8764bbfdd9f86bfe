//! GitHub client. Every hosting-platform call goes through here.
//!
//! Each request is an authenticated GET; any non-2xx status aborts the calling
//! pipeline. The only local recovery is per-file content in `files`.
use reqwest::{header, Client, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::Config;

pub mod files;
pub mod models;

use models::{Issue, ProfileBundle, Repository, RepoStatsBundle, Tree, User, WeeklyCommits};

const ACCEPT_V3: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("GitHub request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API returned {status} for {path}: {message}")]
    Status {
        status: StatusCode,
        path: String,
        message: String,
    },

    #[error("Unexpected GitHub response for {path}: {message}")]
    Decode { path: String, message: String },

    #[error("Invalid GitHub API URL '{url}': {message}")]
    BaseUrl { url: String, message: String },
}

#[derive(Debug, Deserialize)]
struct GithubErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    base_url: Url,
    token: String,
}

impl GithubClient {
    pub fn new(config: &Config) -> Result<Self, GithubError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        let base_url = Url::parse(&config.github_api_url).map_err(|e| GithubError::BaseUrl {
            url: config.github_api_url.clone(),
            message: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(GithubError::BaseUrl {
                url: config.github_api_url.clone(),
                message: "URL cannot carry a path".to_string(),
            });
        }
        Ok(Self {
            client,
            base_url,
            token: config.github_token.clone(),
        })
    }

    /// API URL for `segments` under the base path. Each segment is
    /// percent-encoded on its own, so `/`, `?` and `#` inside caller input
    /// never reach GitHub as URL syntax.
    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, GithubError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GithubError::BaseUrl {
                url: self.base_url.to_string(),
                message: "URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// GETs `url` and decodes the body.
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, GithubError> {
        let path = match url.query() {
            Some(query) => format!("{}?{query}", url.path()),
            None => url.path().to_string(),
        };
        debug!("GET {path}");

        let response = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, format!("token {}", self.token))
            .header(header::ACCEPT, ACCEPT_V3)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<GithubErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(GithubError::Status {
                status,
                path,
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| GithubError::Decode {
            path,
            message: e.to_string(),
        })
    }

    pub async fn fetch_user(&self, username: &str) -> Result<User, GithubError> {
        self.get(self.endpoint(&["users", username], &[])?).await
    }

    pub async fn fetch_user_repos(&self, username: &str) -> Result<Vec<Repository>, GithubError> {
        let url = self.endpoint(
            &["users", username, "repos"],
            &[("per_page", "100"), ("sort", "updated")],
        )?;
        self.get(url).await
    }

    pub async fn fetch_user_events(&self, username: &str) -> Result<Vec<Value>, GithubError> {
        let url = self.endpoint(&["users", username, "events"], &[("per_page", "100")])?;
        self.get(url).await
    }

    pub async fn fetch_repository(&self, owner: &str, repo: &str) -> Result<Value, GithubError> {
        self.get(self.endpoint(&["repos", owner, repo], &[])?).await
    }

    pub async fn fetch_tree(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<Tree, GithubError> {
        // a branch like `feature/x` keeps its slashes as path separators
        let mut segments = vec!["repos", owner, repo, "git", "trees"];
        segments.extend(branch.split('/'));
        let tree: Tree = self
            .get(self.endpoint(&segments, &[("recursive", "1")])?)
            .await?;
        if tree.truncated {
            warn!("Tree listing for {owner}/{repo}@{branch} was truncated by GitHub");
        }
        Ok(tree)
    }

    pub async fn fetch_contributors(&self, owner: &str, repo: &str) -> Result<Value, GithubError> {
        let url = self.endpoint(&["repos", owner, repo, "contributors"], &[("per_page", "10")])?;
        self.get(url).await
    }

    /// Weekly commit totals for the last year, oldest first.
    ///
    /// GitHub answers 202 with an empty object while it computes the statistics;
    /// that is reported as an empty series.
    pub async fn fetch_commit_activity(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<WeeklyCommits>, GithubError> {
        let url = self.endpoint(&["repos", owner, repo, "stats", "commit_activity"], &[])?;
        let path = url.path().to_string();
        let raw: Value = self.get(url).await?;
        match raw {
            Value::Array(_) => serde_json::from_value(raw).map_err(|e| GithubError::Decode {
                path,
                message: e.to_string(),
            }),
            _ => {
                warn!("Commit statistics for {owner}/{repo} are not ready yet");
                Ok(Vec::new())
            }
        }
    }

    /// Byte counts per language, in the order GitHub lists them.
    pub async fn fetch_languages(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<(String, u64)>, GithubError> {
        let url = self.endpoint(&["repos", owner, repo, "languages"], &[])?;
        let path = url.path().to_string();
        let raw: serde_json::Map<String, Value> = self.get(url).await?;
        raw.into_iter()
            .map(|(language, bytes)| match bytes.as_u64() {
                Some(n) => Ok((language, n)),
                None => Err(GithubError::Decode {
                    path: path.clone(),
                    message: format!("byte count for '{language}' is not an unsigned integer"),
                }),
            })
            .collect()
    }

    pub async fn fetch_issues(&self, owner: &str, repo: &str) -> Result<Vec<Issue>, GithubError> {
        let url = self.endpoint(
            &["repos", owner, repo, "issues"],
            &[("state", "all"), ("per_page", "100")],
        )?;
        self.get(url).await
    }

    /// User, repositories and events, fetched concurrently. The first failure aborts.
    pub async fn fetch_profile_bundle(&self, username: &str) -> Result<ProfileBundle, GithubError> {
        let (user, repos, events) = tokio::try_join!(
            self.fetch_user(username),
            self.fetch_user_repos(username),
            self.fetch_user_events(username),
        )?;
        info!(
            "Fetched profile for {username}: {} repos, {} events",
            repos.len(),
            events.len()
        );
        Ok(ProfileBundle {
            user,
            repos,
            events,
        })
    }

    /// Repository metadata plus contributor, commit, language and issue data,
    /// fetched concurrently. The first failure aborts.
    pub async fn fetch_repo_stats_bundle(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<RepoStatsBundle, GithubError> {
        let (repo_data, contributors, commit_activity, languages, issues) = tokio::try_join!(
            self.fetch_repository(owner, repo),
            self.fetch_contributors(owner, repo),
            self.fetch_commit_activity(owner, repo),
            self.fetch_languages(owner, repo),
            self.fetch_issues(owner, repo),
        )?;
        info!(
            "Fetched stats for {owner}/{repo}: {} weeks, {} languages, {} issues",
            commit_activity.len(),
            languages.len(),
            issues.len()
        );
        Ok(RepoStatsBundle {
            repo: repo_data,
            contributors,
            commit_activity,
            languages,
            issues,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> GithubClient {
        let config = Config::for_tests(&server.uri(), "http://127.0.0.1:9/unused");
        GithubClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_requests_carry_token_and_accept_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat"))
            .and(header("authorization", "token test-github-token"))
            .and(header("accept", ACCEPT_V3))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "login": "octocat",
                "name": "The Octocat",
                "followers": 10
            })))
            .expect(1)
            .mount(&server)
            .await;

        let user = client_for(&server).await.fetch_user("octocat").await.unwrap();
        assert_eq!(user.login, "octocat");
        assert_eq!(user.name.as_deref(), Some("The Octocat"));
        assert_eq!(user.followers, Some(10));
        assert_eq!(user.bio, None);
    }

    #[tokio::test]
    async fn test_non_success_status_surfaces_github_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/ghost"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
            .mount(&server)
            .await;

        let err = client_for(&server).await.fetch_user("ghost").await.unwrap_err();
        match &err {
            GithubError::Status { status, message, .. } => {
                assert_eq!(*status, StatusCode::NOT_FOUND);
                assert_eq!(message, "Not Found");
            }
            other => panic!("expected status error, got {other:?}"),
        }
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_path_input_is_percent_encoded_per_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat%3Fx=%23frag"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "login": "octocat?x=#frag" })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/repos/o/r/git/trees/feature/a%23b"))
            .and(query_param("recursive", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tree": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let user = client.fetch_user("octocat?x=#frag").await.unwrap();
        assert_eq!(user.login, "octocat?x=#frag");
        let tree = client.fetch_tree("o", "r", "feature/a#b").await.unwrap();
        assert!(tree.tree.is_empty());
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = Config::for_tests("not a url", "http://127.0.0.1:9/unused");
        assert!(matches!(
            GithubClient::new(&config),
            Err(GithubError::BaseUrl { .. })
        ));
    }

    #[tokio::test]
    async fn test_profile_bundle_aborts_when_any_fetch_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "login": "octocat" })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/octocat/repos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/octocat/events"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .await
            .fetch_profile_bundle("octocat")
            .await
            .unwrap_err();
        assert!(matches!(err, GithubError::Status { .. }));
    }

    #[tokio::test]
    async fn test_commit_activity_pending_is_empty_series() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/o/r/stats/commit_activity"))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({})))
            .mount(&server)
            .await;

        let series = client_for(&server)
            .await
            .fetch_commit_activity("o", "r")
            .await
            .unwrap();
        assert!(series.is_empty());
    }

    #[tokio::test]
    async fn test_languages_keep_upstream_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/o/r/languages"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"TypeScript": 900, "CSS": 50, "HTML": 50}"#),
            )
            .mount(&server)
            .await;

        let languages = client_for(&server).await.fetch_languages("o", "r").await.unwrap();
        assert_eq!(
            languages,
            vec![
                ("TypeScript".to_string(), 900),
                ("CSS".to_string(), 50),
                ("HTML".to_string(), 50),
            ]
        );
    }

    #[tokio::test]
    async fn test_issues_requested_with_all_states() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/o/r/issues"))
            .and(query_param("state", "all"))
            .and(query_param("per_page", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "state": "open", "number": 1 },
                { "state": "closed", "number": 2 }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let issues = client_for(&server).await.fetch_issues("o", "r").await.unwrap();
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[1].state, "closed");
    }
}
