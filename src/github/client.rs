//! GitHub REST v3 contents-API client
//!
//! One client is constructed per invocation, bound to the caller-supplied
//! token. File bodies travel base64-encoded through the contents API; reads
//! decode them and keep the blob SHA for guarded updates.

use super::api::{EntryKind, HostError, RemoteFile, RepoHost, RootEntry};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

const API_ROOT: &str = "https://api.github.com";
const ACCEPT_JSON: &str = "application/vnd.github+json";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub struct GitHubClient {
    http: Client,
    api_root: String,
    token: String,
}

impl GitHubClient {
    pub fn new(token: String) -> Result<Self, HostError> {
        Self::with_api_root(token, API_ROOT.to_string())
    }

    /// Points the client at a different API root (GitHub Enterprise, test
    /// servers).
    pub fn with_api_root(token: String, api_root: String) -> Result<Self, HostError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .user_agent(concat!("pipewright/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HostError::Network(e.to_string()))?;

        Ok(Self {
            http,
            api_root: api_root.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn contents_url(&self, repo: &str, path: &str) -> String {
        format!("{}/repos/{}/contents/{}", self.api_root, repo, path)
    }

    async fn error_from(&self, response: Response) -> HostError {
        let status = response.status();
        let message = match response.json::<ApiErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unrecognized error")
                .to_string(),
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => HostError::Auth(message),
            _ => HostError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}

#[derive(Deserialize)]
struct ContentsBody {
    sha: String,
    content: Option<String>,
    encoding: Option<String>,
}

#[derive(Deserialize)]
struct ListedEntry {
    name: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Serialize)]
struct WriteBody<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

fn decode_content(body: &ContentsBody) -> Result<String, HostError> {
    let raw = body.content.as_deref().unwrap_or_default();
    match body.encoding.as_deref() {
        Some("base64") | None => {
            // GitHub wraps base64 payloads with newlines.
            let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
            let bytes = BASE64
                .decode(compact)
                .map_err(|e| HostError::InvalidResponse(format!("invalid base64 content: {e}")))?;
            String::from_utf8(bytes)
                .map_err(|e| HostError::InvalidResponse(format!("content is not UTF-8: {e}")))
        }
        Some(other) => Err(HostError::InvalidResponse(format!(
            "unsupported content encoding: {other}"
        ))),
    }
}

#[async_trait]
impl RepoHost for GitHubClient {
    async fn get_file(
        &self,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<Option<RemoteFile>, HostError> {
        debug!(%repo, %path, %reference, "GET contents");
        let response = self
            .http
            .get(self.contents_url(repo, path))
            .query(&[("ref", reference)])
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, ACCEPT_JSON)
            .send()
            .await
            .map_err(|e| HostError::Network(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(self.error_from(response).await);
        }

        let body: ContentsBody = response
            .json()
            .await
            .map_err(|e| HostError::InvalidResponse(e.to_string()))?;
        let content = decode_content(&body)?;

        Ok(Some(RemoteFile {
            content,
            sha: body.sha,
        }))
    }

    async fn list_root(&self, repo: &str) -> Result<Vec<RootEntry>, HostError> {
        debug!(%repo, "GET root listing");
        let response = self
            .http
            .get(self.contents_url(repo, ""))
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, ACCEPT_JSON)
            .send()
            .await
            .map_err(|e| HostError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(self.error_from(response).await);
        }

        let entries: Vec<ListedEntry> = response
            .json()
            .await
            .map_err(|e| HostError::InvalidResponse(e.to_string()))?;

        Ok(entries
            .into_iter()
            .map(|e| RootEntry {
                kind: if e.kind == "dir" {
                    EntryKind::Dir
                } else {
                    EntryKind::File
                },
                name: e.name,
            })
            .collect())
    }

    async fn create_file(
        &self,
        repo: &str,
        path: &str,
        message: &str,
        content: &str,
        branch: &str,
    ) -> Result<(), HostError> {
        debug!(%repo, %path, %branch, "PUT contents (create)");
        self.put_contents(repo, path, message, content, branch, None)
            .await
    }

    async fn update_file(
        &self,
        repo: &str,
        path: &str,
        message: &str,
        content: &str,
        sha: &str,
        branch: &str,
    ) -> Result<(), HostError> {
        debug!(%repo, %path, %branch, %sha, "PUT contents (update)");
        self.put_contents(repo, path, message, content, branch, Some(sha))
            .await
    }
}

impl GitHubClient {
    async fn put_contents(
        &self,
        repo: &str,
        path: &str,
        message: &str,
        content: &str,
        branch: &str,
        sha: Option<&str>,
    ) -> Result<(), HostError> {
        let body = WriteBody {
            message,
            content: BASE64.encode(content.as_bytes()),
            branch,
            sha,
        };

        let response = self
            .http
            .put(self.contents_url(repo, path))
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, ACCEPT_JSON)
            .json(&body)
            .send()
            .await
            .map_err(|e| HostError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(self.error_from(response).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contents_url_shape() {
        let client =
            GitHubClient::with_api_root("t".to_string(), "https://api.github.com/".to_string())
                .unwrap();
        assert_eq!(
            client.contents_url("octo/hello", ".github/workflows/ci.yml"),
            "https://api.github.com/repos/octo/hello/contents/.github/workflows/ci.yml"
        );
        assert_eq!(
            client.contents_url("octo/hello", ""),
            "https://api.github.com/repos/octo/hello/contents/"
        );
    }

    #[test]
    fn test_decode_content_strips_newlines() {
        let body = ContentsBody {
            sha: "abc".to_string(),
            content: Some("RlJPTSBweXRo\nb246My45\n".to_string()),
            encoding: Some("base64".to_string()),
        };
        assert_eq!(decode_content(&body).unwrap(), "FROM python:3.9");
    }

    #[test]
    fn test_decode_content_rejects_unknown_encoding() {
        let body = ContentsBody {
            sha: "abc".to_string(),
            content: Some("whatever".to_string()),
            encoding: Some("utf-16".to_string()),
        };
        assert!(matches!(
            decode_content(&body),
            Err(HostError::InvalidResponse(_))
        ));
    }
}
