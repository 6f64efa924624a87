//! pipewright - CI workflow auto-provisioning for GitHub repositories
//!
//! This library inspects a repository through the GitHub contents API, infers
//! its primary language/toolchain from the Dockerfile's base images (falling
//! back to root-level marker files), resolves a matching GitHub Actions
//! workflow, and commits it back idempotently.
//!
//! # Core Concepts
//!
//! - **Detection**: ordered keyword rules over the Dockerfile's `FROM` lines,
//!   with a root-listing fallback; absence of evidence is never an error
//! - **Resolution**: either YAML synthesized from embedded per-language
//!   templates or a pre-authored workflow copied from a reference repository
//! - **Write-back**: create when the destination is absent, SHA-guarded
//!   update when it exists
//!
//! # Example Usage
//!
//! ```ignore
//! use pipewright::{GitHubClient, PipewrightConfig, ProvisionService, WorkflowSource};
//!
//! async fn provision(token: String) -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PipewrightConfig::default().with_token(Some(token));
//!     let client = GitHubClient::new(config.require_token()?.to_string())?;
//!     let service = ProvisionService::new(client, config);
//!
//!     let report = service
//!         .provision("octocat/hello-world", &WorkflowSource::Generated)
//!         .await?;
//!
//!     println!("Detected: {}", report.language_detected);
//!     println!("Outcome: {:?}", report.write_outcome);
//!     Ok(())
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`detect`]: language detection rules and the detector
//! - [`workflow`]: pipeline resolution strategies and embedded templates
//! - [`writeback`]: idempotent create-vs-update commit logic
//! - [`github`]: the hosting-platform collaborator (trait, client, test mock)

pub mod cli;
pub mod config;
pub mod detect;
pub mod github;
pub mod service;
pub mod workflow;
pub mod writeback;

pub use config::{ConfigError, PipewrightConfig, DEFAULT_BRANCH, DEFAULT_WORKFLOW_PATH};
pub use detect::{Detection, DetectionSource, LanguageTag};
pub use github::{GitHubClient, HostError, MockRepoHost, RepoHost};
pub use service::{ProvisionReport, ProvisionService};
pub use workflow::{PipelineDefinition, ResolveError, WorkflowSource};
pub use writeback::WriteOutcome;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_pipewright() {
        assert_eq!(NAME, "pipewright");
    }
}
