use crate::domain::SemanticVersion;
use crate::error::{BumpError, Result};
use regex::Regex;

const PLACEHOLDER: &str = "{version}";

/// Tag naming pattern (e.g., "{version}", "v{version}", "release-{version}")
#[derive(Debug, Clone)]
pub struct TagPattern {
    pattern: String,
    matcher: Regex,
}

impl TagPattern {
    /// Compile a tag pattern. It must contain exactly one `{version}` placeholder.
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();

        if pattern.matches(PLACEHOLDER).count() != 1 {
            return Err(BumpError::config(format!(
                "Tag pattern '{}' must contain exactly one {{version}} placeholder",
                pattern
            )));
        }

        // Escape everything, then swap the escaped placeholder for a capture group
        let escaped = regex::escape(&pattern);
        let regex_pattern = escaped.replace(r"\{version\}", r"(?P<version>\S+)");
        let matcher = Regex::new(&format!("^{}$", regex_pattern))
            .map_err(|e| BumpError::config(format!("Invalid tag pattern '{}': {}", pattern, e)))?;

        Ok(TagPattern { pattern, matcher })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Format a version according to pattern
    /// Example: pattern="v{version}", version=1.2.3 -> "v1.2.3"
    pub fn format(&self, version: &SemanticVersion) -> String {
        self.pattern.replace(PLACEHOLDER, &version.to_string())
    }

    /// Extract the version from a tag name that follows this pattern
    pub fn parse_version(&self, tag: &str) -> Result<SemanticVersion> {
        let captures = self.matcher.captures(tag).ok_or_else(|| {
            BumpError::prior_version(format!(
                "tag '{}' does not match pattern '{}'",
                tag, self.pattern
            ))
        })?;

        SemanticVersion::parse(&captures["version"])
    }
}
