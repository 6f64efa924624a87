//! Declarative detection rule tables
//!
//! Both rule sets are ordered: the first rule that matches wins. Keeping them
//! as data makes the priority explicit and testable without any network call.

use super::tag::LanguageTag;
use std::path::Path;

/// Keyword rules applied to lower-cased `FROM` lines of a Dockerfile.
///
/// A line matches a rule when it contains any of the rule's keywords.
pub const BASE_IMAGE_RULES: &[(&[&str], LanguageTag)] = &[
    (&["python"], LanguageTag::Python),
    (&["node"], LanguageTag::Node),
    (&["openjdk", "maven"], LanguageTag::JavaMaven),
    (&["gradle"], LanguageTag::JavaGradle),
    (&["golang", "go"], LanguageTag::Go),
    (&["ruby"], LanguageTag::Ruby),
];

/// Marker for a root-listing entry.
#[derive(Debug, Clone, Copy)]
pub enum Marker {
    /// Exact filename match.
    Named(&'static str),
    /// File extension match (without the dot).
    Extension(&'static str),
}

impl Marker {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Marker::Named(expected) => name == *expected,
            Marker::Extension(ext) => Path::new(name)
                .extension()
                .map(|e| e.eq_ignore_ascii_case(ext))
                .unwrap_or(false),
        }
    }
}

/// Fallback rules applied to the repository's root file listing.
pub const ROOT_MARKER_RULES: &[(Marker, LanguageTag)] = &[
    (Marker::Extension("py"), LanguageTag::Python),
    (Marker::Named("package.json"), LanguageTag::Node),
    (Marker::Named("pom.xml"), LanguageTag::Java),
    (Marker::Extension("java"), LanguageTag::Java),
    (Marker::Extension("go"), LanguageTag::Go),
];

/// Matches a single Dockerfile line against [`BASE_IMAGE_RULES`].
///
/// Only lines whose first token is `FROM` (case-insensitive) are considered;
/// everything else returns `None`.
pub fn match_base_image_line(line: &str) -> Option<LanguageTag> {
    let line = line.trim().to_lowercase();
    let first_token = line.split_whitespace().next()?;
    if first_token != "from" {
        return None;
    }

    for (keywords, tag) in BASE_IMAGE_RULES {
        if keywords.iter().any(|keyword| line.contains(keyword)) {
            return Some(*tag);
        }
    }
    None
}

/// Matches a root file listing against [`ROOT_MARKER_RULES`].
///
/// Rules are evaluated in table order, each against the whole listing, so a
/// repository with both `main.py` and `package.json` resolves to Python.
pub fn match_root_listing<S: AsRef<str>>(names: &[S]) -> Option<LanguageTag> {
    for (marker, tag) in ROOT_MARKER_RULES {
        if names.iter().any(|name| marker.matches(name.as_ref())) {
            return Some(*tag);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_line_python() {
        assert_eq!(
            match_base_image_line("FROM python:3.9-slim"),
            Some(LanguageTag::Python)
        );
    }

    #[test]
    fn test_from_line_case_insensitive() {
        assert_eq!(
            match_base_image_line("  from NODE:18-alpine AS build"),
            Some(LanguageTag::Node)
        );
    }

    #[test]
    fn test_from_line_java_variants() {
        assert_eq!(
            match_base_image_line("FROM openjdk:17-jdk"),
            Some(LanguageTag::JavaMaven)
        );
        assert_eq!(
            match_base_image_line("FROM maven:3.9-eclipse-temurin-17"),
            Some(LanguageTag::JavaMaven)
        );
        assert_eq!(
            match_base_image_line("FROM gradle:8.5-jdk17"),
            Some(LanguageTag::JavaGradle)
        );
    }

    #[test]
    fn test_from_line_priority_order() {
        // "python" outranks the bare "go" substring in e.g. "django".
        assert_eq!(
            match_base_image_line("FROM python:3.11 # django base"),
            Some(LanguageTag::Python)
        );
    }

    #[test]
    fn test_non_from_lines_ignored() {
        assert_eq!(match_base_image_line("RUN pip install -r requirements.txt"), None);
        assert_eq!(match_base_image_line("# FROM python:3.9"), None);
        assert_eq!(match_base_image_line("FROMAGE cheese"), None);
    }

    #[test]
    fn test_from_line_unmatched_image() {
        assert_eq!(match_base_image_line("FROM debian:bookworm-slim"), None);
        assert_eq!(match_base_image_line(""), None);
    }

    #[test]
    fn test_root_listing_markers() {
        assert_eq!(
            match_root_listing(&["main.py", "README.md"]),
            Some(LanguageTag::Python)
        );
        assert_eq!(
            match_root_listing(&["package.json", "index.js"]),
            Some(LanguageTag::Node)
        );
        assert_eq!(
            match_root_listing(&["pom.xml"]),
            Some(LanguageTag::Java)
        );
        assert_eq!(
            match_root_listing(&["Main.java"]),
            Some(LanguageTag::Java)
        );
        assert_eq!(
            match_root_listing(&["main.go", "go.sum"]),
            Some(LanguageTag::Go)
        );
    }

    #[test]
    fn test_root_listing_priority_over_files() {
        // Rule order wins, not listing order.
        assert_eq!(
            match_root_listing(&["package.json", "setup.py"]),
            Some(LanguageTag::Python)
        );
    }

    #[test]
    fn test_root_listing_no_match() {
        assert_eq!(match_root_listing(&["README.md", "LICENSE"]), None);
        assert_eq!(match_root_listing::<&str>(&[]), None);
    }
}
