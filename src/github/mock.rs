//! In-memory repository host for tests
//!
//! Behaves like the real contents API where it matters: reads of absent files
//! return `Ok(None)`, creates reject existing paths, and updates enforce the
//! blob-SHA precondition, assigning a fresh SHA on every write.

use super::api::{EntryKind, HostError, RemoteFile, RepoHost, RootEntry};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

#[derive(Debug, Clone)]
struct StoredFile {
    content: String,
    sha: String,
}

#[derive(Default)]
pub struct MockRepoHost {
    repos: RwLock<HashMap<String, HashMap<String, StoredFile>>>,
    next_sha: AtomicU64,
    write_failure: RwLock<Option<String>>,
}

impl MockRepoHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an empty repository.
    pub fn add_repo(&self, repo: &str) {
        self.repos
            .write()
            .unwrap()
            .entry(repo.to_string())
            .or_default();
    }

    /// Adds a file, creating the repository if needed. Returns its SHA.
    pub fn add_file(&self, repo: &str, path: &str, content: &str) -> String {
        let sha = self.fresh_sha();
        self.repos
            .write()
            .unwrap()
            .entry(repo.to_string())
            .or_default()
            .insert(
                path.to_string(),
                StoredFile {
                    content: content.to_string(),
                    sha: sha.clone(),
                },
            );
        sha
    }

    /// Current content of a file, if present.
    pub fn file_content(&self, repo: &str, path: &str) -> Option<String> {
        self.repos
            .read()
            .unwrap()
            .get(repo)?
            .get(path)
            .map(|f| f.content.clone())
    }

    /// Current SHA of a file, if present.
    pub fn file_sha(&self, repo: &str, path: &str) -> Option<String> {
        self.repos
            .read()
            .unwrap()
            .get(repo)?
            .get(path)
            .map(|f| f.sha.clone())
    }

    /// Makes every subsequent write fail with the given remote message.
    pub fn fail_writes(&self, message: &str) {
        *self.write_failure.write().unwrap() = Some(message.to_string());
    }

    fn fresh_sha(&self) -> String {
        format!("sha-{:06}", self.next_sha.fetch_add(1, Ordering::SeqCst))
    }

    fn injected_write_failure(&self) -> Option<HostError> {
        self.write_failure
            .read()
            .unwrap()
            .as_ref()
            .map(|message| HostError::Api {
                status: 422,
                message: message.clone(),
            })
    }

    fn unknown_repo(repo: &str) -> HostError {
        HostError::Api {
            status: 404,
            message: format!("repository {repo} not found"),
        }
    }
}

#[async_trait]
impl RepoHost for MockRepoHost {
    async fn get_file(
        &self,
        repo: &str,
        path: &str,
        _reference: &str,
    ) -> Result<Option<RemoteFile>, HostError> {
        let repos = self.repos.read().unwrap();
        let files = repos.get(repo).ok_or_else(|| Self::unknown_repo(repo))?;
        Ok(files.get(path).map(|f| RemoteFile {
            content: f.content.clone(),
            sha: f.sha.clone(),
        }))
    }

    async fn list_root(&self, repo: &str) -> Result<Vec<RootEntry>, HostError> {
        let repos = self.repos.read().unwrap();
        let files = repos.get(repo).ok_or_else(|| Self::unknown_repo(repo))?;

        let mut entries = Vec::new();
        let mut seen_dirs = Vec::new();
        for path in files.keys() {
            match path.split_once('/') {
                None => entries.push(RootEntry {
                    name: path.clone(),
                    kind: EntryKind::File,
                }),
                Some((dir, _)) => {
                    if !seen_dirs.contains(&dir.to_string()) {
                        seen_dirs.push(dir.to_string());
                        entries.push(RootEntry {
                            name: dir.to_string(),
                            kind: EntryKind::Dir,
                        });
                    }
                }
            }
        }
        Ok(entries)
    }

    async fn create_file(
        &self,
        repo: &str,
        path: &str,
        _message: &str,
        content: &str,
        _branch: &str,
    ) -> Result<(), HostError> {
        if let Some(err) = self.injected_write_failure() {
            return Err(err);
        }

        let sha = self.fresh_sha();
        let mut repos = self.repos.write().unwrap();
        let files = repos.get_mut(repo).ok_or_else(|| Self::unknown_repo(repo))?;

        if files.contains_key(path) {
            return Err(HostError::Api {
                status: 422,
                message: format!("\"sha\" wasn't supplied. {path} already exists"),
            });
        }
        files.insert(
            path.to_string(),
            StoredFile {
                content: content.to_string(),
                sha,
            },
        );
        Ok(())
    }

    async fn update_file(
        &self,
        repo: &str,
        path: &str,
        _message: &str,
        content: &str,
        sha: &str,
        _branch: &str,
    ) -> Result<(), HostError> {
        if let Some(err) = self.injected_write_failure() {
            return Err(err);
        }

        let new_sha = self.fresh_sha();
        let mut repos = self.repos.write().unwrap();
        let files = repos.get_mut(repo).ok_or_else(|| Self::unknown_repo(repo))?;

        let current = files.get_mut(path).ok_or(HostError::Api {
            status: 404,
            message: format!("{path} does not exist"),
        })?;
        if current.sha != sha {
            return Err(HostError::Api {
                status: 409,
                message: format!("{path} is at {} but expected {sha}", current.sha),
            });
        }
        current.content = content.to_string();
        current.sha = new_sha;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_file_absent_is_none() {
        let host = MockRepoHost::new();
        host.add_repo("octo/empty");

        let file = host.get_file("octo/empty", "Dockerfile", "main").await.unwrap();
        assert!(file.is_none());
    }

    #[tokio::test]
    async fn test_get_file_unknown_repo_is_error() {
        let host = MockRepoHost::new();
        let result = host.get_file("octo/missing", "Dockerfile", "main").await;
        assert!(matches!(result, Err(HostError::Api { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_create_rejects_existing_path() {
        let host = MockRepoHost::new();
        host.add_file("octo/app", "README.md", "hi");

        let result = host
            .create_file("octo/app", "README.md", "msg", "again", "main")
            .await;
        assert!(matches!(result, Err(HostError::Api { status: 422, .. })));
    }

    #[tokio::test]
    async fn test_update_requires_current_sha() {
        let host = MockRepoHost::new();
        let original = host.add_file("octo/app", "README.md", "v1");

        host.update_file("octo/app", "README.md", "msg", "v2", &original, "main")
            .await
            .unwrap();
        assert_eq!(host.file_content("octo/app", "README.md").unwrap(), "v2");

        // The first SHA is stale after the update.
        let result = host
            .update_file("octo/app", "README.md", "msg", "v3", &original, "main")
            .await;
        assert!(matches!(result, Err(HostError::Api { status: 409, .. })));
    }

    #[tokio::test]
    async fn test_list_root_collapses_directories() {
        let host = MockRepoHost::new();
        host.add_file("octo/app", "pom.xml", "<project/>");
        host.add_file("octo/app", "src/Main.java", "class Main {}");
        host.add_file("octo/app", "src/Util.java", "class Util {}");

        let entries = host.list_root("octo/app").await.unwrap();
        let mut names: Vec<(String, EntryKind)> =
            entries.into_iter().map(|e| (e.name, e.kind)).collect();
        names.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            names,
            vec![
                ("pom.xml".to_string(), EntryKind::File),
                ("src".to_string(), EntryKind::Dir),
            ]
        );
    }
}
