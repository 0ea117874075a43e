/// Snapshot of the repository facts the bump decision depends on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryState {
    pub is_clean: bool,
    pub is_synced_with_remote: bool,
    pub latest_tag: Option<String>,
    pub head_tag: Option<String>,
}

impl RepositoryState {
    /// A clean, synced repository whose latest tag is `latest_tag` and whose HEAD is untagged
    pub fn releasable(latest_tag: impl Into<String>) -> Self {
        RepositoryState {
            is_clean: true,
            is_synced_with_remote: true,
            latest_tag: Some(latest_tag.into()),
            head_tag: None,
        }
    }
}
