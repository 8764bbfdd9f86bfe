use anyhow::{Context, Result};

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_LLM_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Application configuration loaded from environment variables.
/// Startup fails if either secret is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: String,
    pub groq_api_key: String,
    pub github_api_url: String,
    pub llm_api_url: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            github_token: require_env("GITHUB_TOKEN")?,
            groq_api_key: require_env("GROQ_API_KEY")?,
            github_api_url: optional_env("GITHUB_API_URL", DEFAULT_GITHUB_API_URL),
            llm_api_url: optional_env("LLM_API_URL", DEFAULT_LLM_API_URL),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5069".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Configuration pointing both upstreams at the given base URLs with fake secrets.
    #[cfg(test)]
    pub fn for_tests(github_api_url: &str, llm_api_url: &str) -> Self {
        Config {
            github_token: "test-github-token".to_string(),
            groq_api_key: "test-groq-key".to_string(),
            github_api_url: github_api_url.trim_end_matches('/').to_string(),
            llm_api_url: llm_api_url.to_string(),
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.trim_end_matches('/').to_string())
        .unwrap_or_else(|| default.to_string())
}
