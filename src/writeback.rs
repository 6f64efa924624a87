//! Idempotent write-back of a resolved pipeline
//!
//! Chooses create vs. update by reading the destination first. Updates carry
//! the prior blob's SHA so the host rejects them if the file changed between
//! the read and the write; that rejection is surfaced verbatim, never retried.

use crate::github::RepoHost;
use serde::Serialize;
use tracing::{debug, info};

/// Outcome of one write-back call. Exactly one per call; failures carry the
/// remote message text so callers can surface it in their response payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum WriteOutcome {
    Created { path: String },
    Updated { path: String },
    Failed { path: String, reason: String },
}

impl WriteOutcome {
    pub fn path(&self) -> &str {
        match self {
            WriteOutcome::Created { path }
            | WriteOutcome::Updated { path }
            | WriteOutcome::Failed { path, .. } => path,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, WriteOutcome::Failed { .. })
    }
}

/// Commits `content` to `path` on the configured branch.
///
/// The branch is a configuration value, never auto-detected; targeting a
/// repository whose default branch differs will fail or create a divergent
/// reference.
pub async fn commit<H: RepoHost>(
    host: &H,
    repo: &str,
    path: &str,
    content: &str,
    message: &str,
    branch: &str,
) -> WriteOutcome {
    let existing = match host.get_file(repo, path, branch).await {
        Ok(existing) => existing,
        Err(err) => {
            return WriteOutcome::Failed {
                path: path.to_string(),
                reason: err.to_string(),
            }
        }
    };

    match existing {
        Some(prior) => {
            debug!(%repo, %path, sha = %prior.sha, "updating existing workflow");
            match host
                .update_file(repo, path, message, content, &prior.sha, branch)
                .await
            {
                Ok(()) => {
                    info!(%repo, %path, "workflow updated");
                    WriteOutcome::Updated {
                        path: path.to_string(),
                    }
                }
                Err(err) => WriteOutcome::Failed {
                    path: path.to_string(),
                    reason: err.to_string(),
                },
            }
        }
        None => {
            debug!(%repo, %path, "creating workflow");
            match host.create_file(repo, path, message, content, branch).await {
                Ok(()) => {
                    info!(%repo, %path, "workflow created");
                    WriteOutcome::Created {
                        path: path.to_string(),
                    }
                }
                Err(err) => WriteOutcome::Failed {
                    path: path.to_string(),
                    reason: err.to_string(),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::MockRepoHost;

    const PATH: &str = ".github/workflows/ci.yml";

    #[tokio::test]
    async fn test_commit_creates_when_absent() {
        let host = MockRepoHost::new();
        host.add_repo("octo/app");

        let outcome = commit(&host, "octo/app", PATH, "name: CI\n", "Add CI", "main").await;

        assert_eq!(
            outcome,
            WriteOutcome::Created {
                path: PATH.to_string()
            }
        );
        assert_eq!(host.file_content("octo/app", PATH).unwrap(), "name: CI\n");
    }

    #[tokio::test]
    async fn test_commit_updates_when_present() {
        let host = MockRepoHost::new();
        host.add_file("octo/app", PATH, "name: Old CI\n");

        let outcome = commit(&host, "octo/app", PATH, "name: New CI\n", "Update CI", "main").await;

        assert_eq!(
            outcome,
            WriteOutcome::Updated {
                path: PATH.to_string()
            }
        );
        assert_eq!(
            host.file_content("octo/app", PATH).unwrap(),
            "name: New CI\n"
        );
    }

    #[tokio::test]
    async fn test_commit_surfaces_rejected_write() {
        let host = MockRepoHost::new();
        host.add_repo("octo/app");
        host.fail_writes("branch protection rule violated");

        let outcome = commit(&host, "octo/app", PATH, "name: CI\n", "Add CI", "main").await;

        match outcome {
            WriteOutcome::Failed { path, reason } => {
                assert_eq!(path, PATH);
                assert!(reason.contains("branch protection rule violated"));
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_commit_fails_on_unreadable_destination() {
        let host = MockRepoHost::new();

        // Repository was never registered, so the existence probe errors.
        let outcome = commit(&host, "octo/ghost", PATH, "name: CI\n", "Add CI", "main").await;
        assert!(outcome.is_failure());
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = WriteOutcome::Created {
            path: PATH.to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["result"], "created");
        assert_eq!(json["path"], PATH);
    }
}
