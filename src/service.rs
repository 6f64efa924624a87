//! Provisioning service orchestration
//!
//! Runs the detect -> resolve -> commit sequence synchronously to completion
//! with no internal parallelism. Each invocation constructs its own service
//! (and underlying API client); no state crosses calls.

use crate::config::PipewrightConfig;
use crate::detect::{self, Detection, DetectionSource, LanguageTag};
use crate::github::RepoHost;
use crate::workflow::{self, PipelineDefinition, ResolveError, WorkflowSource};
use crate::writeback::{self, WriteOutcome};
use serde::Serialize;
use tracing::info;

/// Structured result of one provisioning call.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisionReport {
    pub language_detected: LanguageTag,
    pub detection_source: DetectionSource,
    pub origin: String,
    pub write_outcome: WriteOutcome,
}

pub struct ProvisionService<H> {
    host: H,
    config: PipewrightConfig,
}

impl<H: RepoHost> ProvisionService<H> {
    pub fn new(host: H, config: PipewrightConfig) -> Self {
        Self { host, config }
    }

    /// Runs detection only, without resolving or writing anything.
    pub async fn detect(&self, repo: &str) -> Detection {
        detect::detect(&self.host, repo, &self.config.branch).await
    }

    /// Detects the language and resolves the pipeline, but does not commit.
    pub async fn preview(
        &self,
        repo: &str,
        source: &WorkflowSource,
    ) -> Result<(Detection, PipelineDefinition), ResolveError> {
        let detection = self.detect(repo).await;
        let pipeline = workflow::resolve(
            &self.host,
            source,
            detection.tag,
            &self.config.workflow_path,
            &self.config.branch,
        )
        .await?;
        Ok((detection, pipeline))
    }

    /// Full sequence: detect, resolve, write back. Write failures are carried
    /// in the report's outcome; only resolution failures are hard errors.
    pub async fn provision(
        &self,
        repo: &str,
        source: &WorkflowSource,
    ) -> Result<ProvisionReport, ResolveError> {
        let (detection, pipeline) = self.preview(repo, source).await?;
        info!(%repo, tag = %detection.tag, source = %detection.source, "provisioning workflow");

        let message = commit_message(detection.tag, source);
        let outcome = writeback::commit(
            &self.host,
            repo,
            &pipeline.destination_path,
            &pipeline.content,
            &message,
            &self.config.branch,
        )
        .await;

        Ok(ProvisionReport {
            language_detected: detection.tag,
            detection_source: detection.source,
            origin: pipeline.origin,
            write_outcome: outcome,
        })
    }
}

/// Commit message naming the resolved tag and, for copies, the template's
/// origin repository.
fn commit_message(tag: LanguageTag, source: &WorkflowSource) -> String {
    match source {
        WorkflowSource::Generated => format!("Auto-generated {tag} CI pipeline"),
        WorkflowSource::Template { reference } => {
            format!("Auto-generated {tag} CI pipeline (template from {reference})")
        }
    }
}
