use anyhow::Context;
use std::env;

pub const DEFAULT_ARBISCAN_API_URL: &str = "https://api.arbiscan.io/api";
pub const DEFAULT_ANTHROPIC_API_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_CLAUDE_MODEL: &str = "claude-3-sonnet-20240229";
pub const DEFAULT_CLAUDE_MAX_TOKENS: u32 = 1024;

#[derive(Clone)]
pub struct Config {
    pub arbiscan_api_url: String,
    pub arbiscan_api_key: String,
    pub anthropic_api_url: String,
    pub claude_api_key: String,
    pub claude_model: String,
    pub claude_max_tokens: u32,
}

impl Config {
    /// Missing API keys are tolerated as empty strings; the upstream
    /// providers decide what an unauthenticated request gets.
    pub fn from_env() -> anyhow::Result<Self> {
        let claude_max_tokens = match env::var("CLAUDE_MAX_TOKENS") {
            Ok(raw) => raw
                .parse::<u32>()
                .context("CLAUDE_MAX_TOKENS must be a positive integer")?,
            Err(_) => DEFAULT_CLAUDE_MAX_TOKENS,
        };

        Ok(Self {
            arbiscan_api_url: env::var("ARBISCAN_API_URL")
                .unwrap_or_else(|_| DEFAULT_ARBISCAN_API_URL.into()),
            arbiscan_api_key: env::var("ARBISCAN_API_KEY").unwrap_or_default(),
            anthropic_api_url: env::var("ANTHROPIC_API_URL")
                .unwrap_or_else(|_| DEFAULT_ANTHROPIC_API_URL.into()),
            claude_api_key: env::var("CLAUDE_API_KEY").unwrap_or_default(),
            claude_model: env::var("CLAUDE_MODEL")
                .unwrap_or_else(|_| DEFAULT_CLAUDE_MODEL.into()),
            claude_max_tokens,
        })
    }

    /// Config pointed at explicit endpoints, with empty credentials and
    /// default model settings. Used by tests to target mock servers.
    pub fn with_endpoints(arbiscan_api_url: String, anthropic_api_url: String) -> Self {
        Self {
            arbiscan_api_url,
            arbiscan_api_key: String::new(),
            anthropic_api_url,
            claude_api_key: String::new(),
            claude_model: DEFAULT_CLAUDE_MODEL.into(),
            claude_max_tokens: DEFAULT_CLAUDE_MAX_TOKENS,
        }
    }
}
