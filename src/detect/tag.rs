use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete classification of a repository's primary language/toolchain.
///
/// Produced once per detection call and immutable afterwards. `Java` is the
/// generic tag used when only root-listing markers (`pom.xml`, `*.java`) are
/// available; the Maven/Gradle split requires a Dockerfile base image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LanguageTag {
    Python,
    Node,
    JavaMaven,
    JavaGradle,
    Java,
    Go,
    Ruby,
    Unknown,
}

impl LanguageTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageTag::Python => "python",
            LanguageTag::Node => "node",
            LanguageTag::JavaMaven => "java-maven",
            LanguageTag::JavaGradle => "java-gradle",
            LanguageTag::Java => "java",
            LanguageTag::Go => "go",
            LanguageTag::Ruby => "ruby",
            LanguageTag::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, LanguageTag::Unknown)
    }

    /// Canonical workflow filename for the template-copy strategy.
    pub fn template_filename(&self) -> String {
        format!("{}-ci.yml", self.as_str())
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_names() {
        assert_eq!(LanguageTag::Python.as_str(), "python");
        assert_eq!(LanguageTag::JavaMaven.as_str(), "java-maven");
        assert_eq!(LanguageTag::Unknown.as_str(), "unknown");
    }

    #[test]
    fn test_template_filename() {
        assert_eq!(LanguageTag::Java.template_filename(), "java-ci.yml");
        assert_eq!(LanguageTag::Node.template_filename(), "node-ci.yml");
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&LanguageTag::JavaGradle).unwrap();
        assert_eq!(json, "\"java-gradle\"");

        let tag: LanguageTag = serde_json::from_str("\"python\"").unwrap();
        assert_eq!(tag, LanguageTag::Python);
    }

    #[test]
    fn test_is_known() {
        assert!(LanguageTag::Ruby.is_known());
        assert!(!LanguageTag::Unknown.is_known());
    }
}
