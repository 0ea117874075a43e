use crate::error::{BumpError, Result};
use std::fmt;
use std::str::FromStr;

/// Semantic version representation
///
/// Ordering is lexicographic over `(major, minor, patch)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SemanticVersion {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        SemanticVersion {
            major,
            minor,
            patch,
        }
    }

    /// Parse the canonical `major.minor.patch` form.
    ///
    /// Pre-release and build metadata are rejected, as are leading zeros and
    /// any prefix. Tag prefixes are stripped by [`crate::domain::TagPattern`].
    pub fn parse(text: &str) -> Result<Self> {
        let parsed = semver::Version::parse(text).map_err(|e| {
            BumpError::prior_version(format!("'{}' is not a semantic version: {}", text, e))
        })?;

        if !parsed.pre.is_empty() || !parsed.build.is_empty() {
            return Err(BumpError::prior_version(format!(
                "'{}' carries pre-release or build metadata - expected X.Y.Z",
                text
            )));
        }

        Ok(SemanticVersion::new(parsed.major, parsed.minor, parsed.patch))
    }

    /// Bump version according to bump kind
    ///
    /// Fails when the incremented component would not fit in a `u64`.
    pub fn bump(&self, kind: BumpKind) -> Result<Self> {
        let overflow = || {
            BumpError::prior_version(format!(
                "{} component of '{}' cannot be incremented",
                kind, self
            ))
        };

        Ok(match kind {
            BumpKind::Major => {
                SemanticVersion::new(self.major.checked_add(1).ok_or_else(overflow)?, 0, 0)
            }
            BumpKind::Minor => SemanticVersion::new(
                self.major,
                self.minor.checked_add(1).ok_or_else(overflow)?,
                0,
            ),
            BumpKind::Patch => SemanticVersion::new(
                self.major,
                self.minor,
                self.patch.checked_add(1).ok_or_else(overflow)?,
            ),
        })
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for SemanticVersion {
    type Err = BumpError;

    fn from_str(s: &str) -> Result<Self> {
        SemanticVersion::parse(s)
    }
}

/// Which component of the version to increment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
}

impl BumpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BumpKind::Major => "major",
            BumpKind::Minor => "minor",
            BumpKind::Patch => "patch",
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BumpKind {
    type Err = BumpError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "major" => Ok(BumpKind::Major),
            "minor" => Ok(BumpKind::Minor),
            "patch" => Ok(BumpKind::Patch),
            other => Err(BumpError::invalid_input(format!(
                "unknown bump kind '{}' - expected major, minor or patch",
                other
            ))),
        }
    }
}
