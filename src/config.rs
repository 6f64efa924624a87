//! Configuration for pipewright
//!
//! Loaded from environment variables with defaults, then threaded explicitly
//! into every call; the core never reads ambient process state itself.
//!
//! # Environment Variables
//!
//! - `GITHUB_TOKEN`: default credential when none is passed per call
//! - `PIPEWRIGHT_BRANCH`: target branch - default: "main"
//! - `PIPEWRIGHT_WORKFLOW_PATH`: destination path - default: ".github/workflows/ci.yml"
//! - `PIPEWRIGHT_API_ROOT`: GitHub API root - default: "https://api.github.com"
//! - `PIPEWRIGHT_LOG_LEVEL`: logging level - default: "info"

use std::env;
use thiserror::Error;

pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_WORKFLOW_PATH: &str = ".github/workflows/ci.yml";
const DEFAULT_API_ROOT: &str = "https://api.github.com";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Raised per request when the client is built, not at process start.
    #[error("no GitHub token available. Pass --token or set the GITHUB_TOKEN environment variable")]
    MissingToken,

    #[error("configuration validation failed: {0}")]
    ValidationFailed(String),
}

#[derive(Debug, Clone)]
pub struct PipewrightConfig {
    /// Default credential; an explicit per-call token takes precedence.
    pub token: Option<String>,

    /// Branch all reads and writes target.
    pub branch: String,

    /// Destination path for the committed workflow.
    pub workflow_path: String,

    /// API root, overridable for GitHub Enterprise or test servers.
    pub api_root: String,

    /// Logging level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for PipewrightConfig {
    fn default() -> Self {
        Self {
            token: env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()),
            branch: env::var("PIPEWRIGHT_BRANCH").unwrap_or_else(|_| DEFAULT_BRANCH.to_string()),
            workflow_path: env::var("PIPEWRIGHT_WORKFLOW_PATH")
                .unwrap_or_else(|_| DEFAULT_WORKFLOW_PATH.to_string()),
            api_root: env::var("PIPEWRIGHT_API_ROOT")
                .unwrap_or_else(|_| DEFAULT_API_ROOT.to_string()),
            log_level: env::var("PIPEWRIGHT_LOG_LEVEL")
                .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
                .to_lowercase(),
        }
    }
}

impl PipewrightConfig {
    /// Applies an explicit per-call token, keeping the ambient default when
    /// none is given.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            self.token = Some(token);
        }
        self
    }

    pub fn with_branch(mut self, branch: Option<String>) -> Self {
        if let Some(branch) = branch.filter(|b| !b.is_empty()) {
            self.branch = branch;
        }
        self
    }

    /// The resolved credential, or the per-request configuration error.
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        self.token.as_deref().ok_or(ConfigError::MissingToken)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.branch.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "branch must not be empty".to_string(),
            ));
        }
        if self.workflow_path.is_empty() || self.workflow_path.starts_with('/') {
            return Err(ConfigError::ValidationFailed(format!(
                "workflow path must be a relative repository path, got {:?}",
                self.workflow_path
            )));
        }
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ConfigError::ValidationFailed(format!(
                    "invalid log level: {other}. Valid options: trace, debug, info, warn, error"
                )))
            }
        }
        Ok(())
    }
}
