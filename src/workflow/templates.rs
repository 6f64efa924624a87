//! Embedded workflow bodies for the inline-generation strategy

use crate::detect::LanguageTag;

const PYTHON_WORKFLOW: &str = r#"name: Python CI
on: [push, pull_request]
jobs:
  build:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v3
      - name: Set up Python
        uses: actions/setup-python@v4
        with:
          python-version: '3.9'
      - name: Install dependencies
        run: |
          python -m pip install --upgrade pip
          pip install -r requirements.txt
      - name: Run tests
        run: pytest
"#;

const NODE_WORKFLOW: &str = r#"name: Node.js CI
on: [push, pull_request]
jobs:
  build:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v3
      - uses: actions/setup-node@v4
        with:
          node-version: '18'
      - run: npm install
      - run: npm test
"#;

const JAVA_MAVEN_WORKFLOW: &str = r#"name: Java Maven CI
on: [push, pull_request]
jobs:
  build:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v3
      - name: Set up JDK
        uses: actions/setup-java@v3
        with:
          distribution: 'temurin'
          java-version: '17'
      - name: Build with Maven
        run: mvn -B package --file pom.xml
"#;

const JAVA_GRADLE_WORKFLOW: &str = r#"name: Java Gradle CI
on: [push, pull_request]
jobs:
  build:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v3
      - name: Set up JDK
        uses: actions/setup-java@v3
        with:
          distribution: 'temurin'
          java-version: '17'
      - name: Build with Gradle
        run: ./gradlew build
"#;

// Generic Java comes only from root-listing markers, where pom.xml is the
// strongest signal, so it builds with Maven.
const JAVA_WORKFLOW: &str = r#"name: Java CI
on: [push, pull_request]
jobs:
  build:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v3
      - name: Set up JDK
        uses: actions/setup-java@v3
        with:
          distribution: 'temurin'
          java-version: '17'
      - name: Build with Maven
        run: mvn -B package --file pom.xml
"#;

const GO_WORKFLOW: &str = r#"name: Go CI
on: [push, pull_request]
jobs:
  build:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v3
      - uses: actions/setup-go@v5
        with:
          go-version: '1.21'
      - run: go build ./...
      - run: go test ./...
"#;

const RUBY_WORKFLOW: &str = r#"name: Ruby CI
on: [push, pull_request]
jobs:
  build:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v3
      - uses: ruby/setup-ruby@v1
        with:
          ruby-version: '3.2'
      - run: bundle install
      - run: bundle exec rake
"#;

/// Embedded workflow body for a tag, `None` for [`LanguageTag::Unknown`].
pub fn for_tag(tag: LanguageTag) -> Option<&'static str> {
    match tag {
        LanguageTag::Python => Some(PYTHON_WORKFLOW),
        LanguageTag::Node => Some(NODE_WORKFLOW),
        LanguageTag::JavaMaven => Some(JAVA_MAVEN_WORKFLOW),
        LanguageTag::JavaGradle => Some(JAVA_GRADLE_WORKFLOW),
        LanguageTag::Java => Some(JAVA_WORKFLOW),
        LanguageTag::Go => Some(GO_WORKFLOW),
        LanguageTag::Ruby => Some(RUBY_WORKFLOW),
        LanguageTag::Unknown => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN_TAGS: &[LanguageTag] = &[
        LanguageTag::Python,
        LanguageTag::Node,
        LanguageTag::JavaMaven,
        LanguageTag::JavaGradle,
        LanguageTag::Java,
        LanguageTag::Go,
        LanguageTag::Ruby,
    ];

    #[test]
    fn test_every_known_tag_has_a_template() {
        for tag in KNOWN_TAGS {
            assert!(for_tag(*tag).is_some(), "missing template for {tag}");
        }
        assert!(for_tag(LanguageTag::Unknown).is_none());
    }

    #[test]
    fn test_templates_are_valid_yaml_workflows() {
        for tag in KNOWN_TAGS {
            let body = for_tag(*tag).unwrap();
            let doc: serde_yaml::Value =
                serde_yaml::from_str(body).unwrap_or_else(|e| panic!("{tag}: invalid YAML: {e}"));
            assert!(doc.get("name").is_some(), "{tag}: missing workflow name");
            assert!(doc.get("jobs").is_some(), "{tag}: missing jobs");
        }
    }

    #[test]
    fn test_python_template_runs_pytest() {
        assert!(for_tag(LanguageTag::Python).unwrap().contains("pytest"));
    }

    #[test]
    fn test_node_template_installs_and_tests() {
        let body = for_tag(LanguageTag::Node).unwrap();
        assert!(body.contains("npm install"));
        assert!(body.contains("npm test"));
    }
}
