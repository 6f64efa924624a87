//! Workflow resolution strategies
//!
//! Maps a detected [`LanguageTag`] to a concrete pipeline definition, either
//! by synthesizing YAML from the embedded templates or by copying a
//! pre-authored workflow out of a reference repository. Both strategies are
//! deterministic given the same inputs and perform no writes.

use super::templates;
use crate::detect::LanguageTag;
use crate::github::{HostError, RepoHost};
use thiserror::Error;
use tracing::debug;

/// Conventional workflow directory of a reference repository.
pub const WORKFLOW_DIR: &str = ".github/workflows";

#[derive(Debug, Error)]
pub enum ResolveError {
    /// The reference repository has no template for the detected tag.
    #[error("workflow template {filename} not found in reference repository {reference}")]
    TemplateNotFound { filename: String, reference: String },

    #[error(transparent)]
    Host(#[from] HostError),
}

/// How to obtain the pipeline text for a tag.
#[derive(Debug, Clone)]
pub enum WorkflowSource {
    /// Synthesize YAML from the embedded per-tag templates.
    Generated,
    /// Copy `{tag}-ci.yml` from a reference repository's workflow directory.
    Template { reference: String },
}

/// A resolved pipeline: content, destination, and where it came from.
///
/// Created fresh on each invocation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineDefinition {
    pub content: String,
    pub destination_path: String,
    pub origin: String,
}

/// Resolves a pipeline definition for `tag` using the given strategy.
pub async fn resolve<H: RepoHost>(
    host: &H,
    source: &WorkflowSource,
    tag: LanguageTag,
    destination_path: &str,
    branch: &str,
) -> Result<PipelineDefinition, ResolveError> {
    match source {
        WorkflowSource::Generated => Ok(generate(tag, destination_path)),
        WorkflowSource::Template { reference } => {
            copy_template(host, reference, tag, destination_path, branch).await
        }
    }
}

/// Inline-generation strategy. An unknown tag yields a YAML comment naming
/// it rather than an error.
pub fn generate(tag: LanguageTag, destination_path: &str) -> PipelineDefinition {
    let content = match templates::for_tag(tag) {
        Some(body) => body.to_string(),
        None => format!("# Unknown language: {tag}\n"),
    };

    PipelineDefinition {
        content,
        destination_path: destination_path.to_string(),
        origin: format!("generated for language {tag}"),
    }
}

async fn copy_template<H: RepoHost>(
    host: &H,
    reference: &str,
    tag: LanguageTag,
    destination_path: &str,
    branch: &str,
) -> Result<PipelineDefinition, ResolveError> {
    let filename = tag.template_filename();
    let template_path = format!("{WORKFLOW_DIR}/{filename}");
    debug!(%reference, %template_path, "fetching workflow template");

    match host.get_file(reference, &template_path, branch).await? {
        Some(file) => Ok(PipelineDefinition {
            content: file.content,
            destination_path: destination_path.to_string(),
            origin: format!("copied from {reference}:{template_path}"),
        }),
        None => Err(ResolveError::TemplateNotFound {
            filename,
            reference: reference.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::MockRepoHost;

    const DEST: &str = ".github/workflows/ci.yml";

    #[test]
    fn test_generate_known_tag() {
        let pipeline = generate(LanguageTag::Python, DEST);
        assert!(pipeline.content.contains("pytest"));
        assert_eq!(pipeline.destination_path, DEST);
        assert_eq!(pipeline.origin, "generated for language python");
    }

    #[test]
    fn test_generate_unknown_tag_is_comment() {
        let pipeline = generate(LanguageTag::Unknown, DEST);
        assert_eq!(pipeline.content, "# Unknown language: unknown\n");
    }

    #[test]
    fn test_generate_is_deterministic() {
        let first = generate(LanguageTag::Go, DEST);
        let second = generate(LanguageTag::Go, DEST);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_copy_template_found() {
        let host = MockRepoHost::new();
        host.add_file(
            "org/ci-templates",
            ".github/workflows/node-ci.yml",
            "name: Node.js CI\n",
        );

        let source = WorkflowSource::Template {
            reference: "org/ci-templates".to_string(),
        };
        let pipeline = resolve(&host, &source, LanguageTag::Node, DEST, "main")
            .await
            .unwrap();

        assert_eq!(pipeline.content, "name: Node.js CI\n");
        assert_eq!(
            pipeline.origin,
            "copied from org/ci-templates:.github/workflows/node-ci.yml"
        );
    }

    #[tokio::test]
    async fn test_copy_template_missing_names_file_and_reference() {
        let host = MockRepoHost::new();
        host.add_repo("org/ci-templates");

        let source = WorkflowSource::Template {
            reference: "org/ci-templates".to_string(),
        };
        let err = resolve(&host, &source, LanguageTag::Java, DEST, "main")
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("java-ci.yml"), "message: {message}");
        assert!(message.contains("org/ci-templates"), "message: {message}");
    }
}
