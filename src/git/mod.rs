//! Git operations abstraction layer
//!
//! The bump workflow only needs a handful of repository queries and two
//! side effects (create a tag, push it). They are collected in the
//! [Repository] trait so the workflow can run against either:
//!
//! - [repository::Git2Repository]: a real repository opened through `git2`
//! - [mock::MockRepository]: an in-memory stand-in for tests
//!
//! "Absent" answers (no tags, no tag at HEAD) are `Ok(None)`; only real
//! failures are `Err`.

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// How the current branch relates to its remote counterpart
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamStatus {
    /// The branch has a configured upstream
    Tracking { upstream: String, ahead: usize },
    /// No upstream configured; `<remote>/<branch>` was compared instead
    Fallback { upstream: String, ahead: usize },
    /// Nothing on the remote to compare against
    Missing { branch: String },
}

impl UpstreamStatus {
    /// True when the remote already has every local commit
    pub fn is_synced(&self) -> bool {
        match self {
            UpstreamStatus::Tracking { ahead, .. } | UpstreamStatus::Fallback { ahead, .. } => {
                *ahead == 0
            }
            UpstreamStatus::Missing { .. } => false,
        }
    }
}

/// Whether `create_tag` had to create anything
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagCreation {
    Created,
    /// The tag already existed and pointed at HEAD
    AlreadyPresent,
}

/// Repository capabilities used by the bump workflow
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Implementations map
/// remote failures to [crate::error::BumpError::RemoteSyncFailure] and tag
/// creation/push failures to [crate::error::BumpError::TagPushFailure];
/// everything else surfaces as a git error.
pub trait Repository {
    /// Name of the checked-out branch. Fails when HEAD is detached.
    fn current_branch(&self) -> Result<String>;

    /// `true` when there are no staged, unstaged or untracked changes.
    /// Ignored files do not count.
    fn is_working_tree_clean(&self) -> Result<bool>;

    /// Compare the current branch with its upstream on `remote`
    fn upstream_status(&self, remote: &str) -> Result<UpstreamStatus>;

    /// Tag that exactly matches HEAD, if any
    fn tag_at_head(&self) -> Result<Option<String>>;

    /// Nearest tag reachable from HEAD, if any
    fn latest_tag(&self) -> Result<Option<String>>;

    /// Fetch branches and tags from `remote` and fast-forward the current
    /// branch to its upstream when possible
    fn sync_with_remote(&self, remote: &str) -> Result<()>;

    /// Create a lightweight tag at HEAD.
    ///
    /// Reuses an existing tag of the same name if it already points at HEAD;
    /// fails if it points anywhere else.
    fn create_tag(&self, name: &str) -> Result<TagCreation>;

    /// Push `refs/tags/<name>` to `remote`
    fn push_tag(&self, remote: &str, name: &str) -> Result<()>;

    /// Whether tag `name` exists and resolves to the HEAD commit
    fn tag_points_at_head(&self, name: &str) -> Result<bool>;
}
