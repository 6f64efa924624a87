//! Repository host abstraction
//!
//! The rest of the crate only talks to a hosting platform through [`RepoHost`].
//! Reads distinguish "absent" (`Ok(None)`) from real failures, so callers
//! branch on values instead of catching errors.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by a repository host.
#[derive(Debug, Error)]
pub enum HostError {
    /// Credential rejected by the remote API (401/403).
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Any other remote API rejection, carrying the remote message verbatim.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Transport-level failure (DNS, TLS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// Response arrived but could not be interpreted.
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

/// A file fetched from a repository: decoded text plus the blob identity
/// required as the precondition for guarded updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub content: String,
    pub sha: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
}

/// One entry of a repository's root listing.
#[derive(Debug, Clone)]
pub struct RootEntry {
    pub name: String,
    pub kind: EntryKind,
}

/// The hosting platform's content API, reduced to the four operations this
/// crate consumes.
#[async_trait]
pub trait RepoHost: Send + Sync {
    /// Fetches a file's decoded content and blob SHA from `reference`.
    ///
    /// Returns `Ok(None)` when no file exists at `path`.
    async fn get_file(
        &self,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<Option<RemoteFile>, HostError>;

    /// Lists the names and kinds of the repository's root entries.
    async fn list_root(&self, repo: &str) -> Result<Vec<RootEntry>, HostError>;

    /// Creates a new file at `path` on `branch`. Fails if the file exists.
    async fn create_file(
        &self,
        repo: &str,
        path: &str,
        message: &str,
        content: &str,
        branch: &str,
    ) -> Result<(), HostError>;

    /// Replaces the file at `path` on `branch`, guarded by `sha`.
    ///
    /// The host rejects the update when `sha` no longer names the current
    /// blob, which is the only concurrency control between racing writers.
    async fn update_file(
        &self,
        repo: &str,
        path: &str,
        message: &str,
        content: &str,
        sha: &str,
        branch: &str,
    ) -> Result<(), HostError>;
}
