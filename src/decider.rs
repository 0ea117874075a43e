//! The version bump decision procedure.
//!
//! Given a [`RepositoryState`] snapshot, a [`BumpKind`] and optionally a
//! scanned source file, the decider either rejects the bump with the first
//! failing gate or returns the next version. It performs no I/O, so the same
//! inputs always produce the same answer.
//!
//! Gates, in order:
//! 1. the working tree is clean
//! 2. no local commits are waiting to be pushed
//! 3. the latest tag exists and parses as a version
//! 4. HEAD is not already carrying the latest tag
//!
//! After the bump is computed, a supplied source snapshot must declare
//! exactly the new version.

use crate::config::Config;
use crate::domain::{
    BumpKind, DeclarationFormat, RepositoryState, SemanticVersion, SourceSnapshot, TagPattern,
};
use crate::error::{BumpError, Result};

/// Explicit settings for the decider
#[derive(Debug, Clone)]
pub struct DeciderConfig {
    pub tag_pattern: TagPattern,
    pub declaration: DeclarationFormat,
}

impl DeciderConfig {
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(DeciderConfig {
            tag_pattern: config.tag_pattern()?,
            declaration: config.source.declaration_format(),
        })
    }
}

/// Outcome of a successful decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpDecision {
    pub latest_tag: String,
    pub previous: SemanticVersion,
    pub next: SemanticVersion,
    /// Name of the tag to create for `next`
    pub tag_name: String,
}

#[derive(Debug, Clone)]
pub struct VersionBumpDecider {
    config: DeciderConfig,
}

impl VersionBumpDecider {
    pub fn new(config: DeciderConfig) -> Self {
        VersionBumpDecider { config }
    }

    pub fn config(&self) -> &DeciderConfig {
        &self.config
    }

    /// Compute the next version, or the first gate that refuses it
    pub fn decide(
        &self,
        state: &RepositoryState,
        kind: BumpKind,
        source: Option<&SourceSnapshot>,
    ) -> Result<SemanticVersion> {
        self.evaluate(state, kind, source).map(|decision| decision.next)
    }

    /// Same procedure as [`decide`](Self::decide), keeping the prior version and tag name
    pub fn evaluate(
        &self,
        state: &RepositoryState,
        kind: BumpKind,
        source: Option<&SourceSnapshot>,
    ) -> Result<BumpDecision> {
        if !state.is_clean {
            return Err(BumpError::DirtyWorkingTree);
        }

        if !state.is_synced_with_remote {
            return Err(BumpError::UnpushedCommits);
        }

        let latest_tag = state
            .latest_tag
            .as_deref()
            .ok_or_else(|| BumpError::prior_version("repository has no tags"))?;
        let previous = self.config.tag_pattern.parse_version(latest_tag)?;

        if state.head_tag.as_deref() == Some(latest_tag) {
            return Err(BumpError::AlreadyTagged(latest_tag.to_string()));
        }

        let next = previous.bump(kind)?;

        if let Some(snapshot) = source {
            self.check_source(snapshot, &next)?;
        }

        Ok(BumpDecision {
            latest_tag: latest_tag.to_string(),
            previous,
            next,
            tag_name: self.config.tag_pattern.format(&next),
        })
    }

    fn check_source(&self, snapshot: &SourceSnapshot, expected: &SemanticVersion) -> Result<()> {
        let mismatch = |found: String| BumpError::SourceVersionMismatch {
            path: snapshot.path.clone(),
            expected: expected.to_string(),
            found,
        };

        let declaration = snapshot.declaration.ok_or_else(|| {
            mismatch(format!(
                "no '{}' declaration",
                self.config.declaration.variable
            ))
        })?;

        if !declaration.is_well_formed(&self.config.declaration) {
            return Err(mismatch(format!(
                "build flag {} instead of {}",
                declaration.build_flag, self.config.declaration.sentinel
            )));
        }

        if declaration.version() != *expected {
            return Err(mismatch(declaration.version().to_string()));
        }

        Ok(())
    }
}
