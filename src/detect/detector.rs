//! Language detection over a remote repository
//!
//! Detection never fails: a missing or unreadable Dockerfile falls through to
//! the root-listing markers, and an unreadable root listing yields
//! [`LanguageTag::Unknown`]. Absence of a build descriptor is an expected,
//! common case, not an error to surface.

use super::rules::{match_base_image_line, match_root_listing};
use super::tag::LanguageTag;
use crate::github::{EntryKind, RepoHost};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

/// Conventional name of the build descriptor file.
pub const BUILD_DESCRIPTOR: &str = "Dockerfile";

/// Which evidence produced a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionSource {
    Dockerfile,
    RootListing,
    None,
}

impl fmt::Display for DetectionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DetectionSource::Dockerfile => "Dockerfile",
            DetectionSource::RootListing => "root listing",
            DetectionSource::None => "none",
        };
        f.write_str(s)
    }
}

/// Result of one detection call.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Detection {
    pub tag: LanguageTag,
    pub source: DetectionSource,
}

/// Detects the repository's language tag.
///
/// Scans the Dockerfile's `FROM` lines first; multi-stage builds resolve to
/// whichever qualifying line comes first in the file. Falls back to root
/// markers, then to `Unknown`.
pub async fn detect<H: RepoHost>(host: &H, repo: &str, branch: &str) -> Detection {
    match host.get_file(repo, BUILD_DESCRIPTOR, branch).await {
        Ok(Some(descriptor)) => {
            if let Some(tag) = scan_descriptor(&descriptor.content) {
                debug!(%repo, %tag, "detected language from Dockerfile");
                return Detection {
                    tag,
                    source: DetectionSource::Dockerfile,
                };
            }
            debug!(%repo, "Dockerfile present but no FROM line matched");
        }
        Ok(None) => debug!(%repo, "no Dockerfile, falling back to root listing"),
        Err(err) => debug!(%repo, %err, "Dockerfile unreadable, falling back to root listing"),
    }

    match host.list_root(repo).await {
        Ok(entries) => {
            let names: Vec<&str> = entries
                .iter()
                .filter(|e| e.kind == EntryKind::File)
                .map(|e| e.name.as_str())
                .collect();
            if let Some(tag) = match_root_listing(&names) {
                debug!(%repo, %tag, "detected language from root listing");
                return Detection {
                    tag,
                    source: DetectionSource::RootListing,
                };
            }
        }
        Err(err) => warn!(%repo, %err, "root listing unavailable"),
    }

    Detection {
        tag: LanguageTag::Unknown,
        source: DetectionSource::None,
    }
}

/// Pure scan of a build descriptor's text against the base-image rules.
pub fn scan_descriptor(content: &str) -> Option<LanguageTag> {
    content.lines().find_map(match_base_image_line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_descriptor_first_match_wins() {
        let dockerfile = "\
FROM node:18-alpine AS assets
RUN npm run build
FROM python:3.9-slim
COPY --from=assets /dist /app/static
";
        assert_eq!(scan_descriptor(dockerfile), Some(LanguageTag::Node));
    }

    #[test]
    fn test_scan_descriptor_skips_unmatched_from_lines() {
        let dockerfile = "\
FROM scratch AS empty
FROM ruby:3.2
";
        assert_eq!(scan_descriptor(dockerfile), Some(LanguageTag::Ruby));
    }

    #[test]
    fn test_scan_descriptor_no_match() {
        assert_eq!(scan_descriptor("FROM debian:bookworm\nRUN make"), None);
        assert_eq!(scan_descriptor(""), None);
    }
}
