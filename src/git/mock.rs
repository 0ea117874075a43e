use crate::error::{BumpError, Result};
use crate::git::{Repository, TagCreation, UpstreamStatus};
use std::cell::{Cell, RefCell};

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    branch: String,
    clean: bool,
    upstream: UpstreamStatus,
    head_tag: Option<String>,
    latest_tag: Option<String>,
    sync_error: Option<String>,
    push_error: Option<String>,
    /// Tags at HEAD, including ones created through the trait
    head_tags: RefCell<Vec<String>>,
    pushed: RefCell<Vec<(String, String)>>,
    sync_calls: Cell<usize>,
}

impl MockRepository {
    /// A clean `main` branch tracking `origin/main` with no tags
    pub fn new() -> Self {
        MockRepository {
            branch: "main".to_string(),
            clean: true,
            upstream: UpstreamStatus::Tracking {
                upstream: "origin/main".to_string(),
                ahead: 0,
            },
            head_tag: None,
            latest_tag: None,
            sync_error: None,
            push_error: None,
            head_tags: RefCell::new(Vec::new()),
            pushed: RefCell::new(Vec::new()),
            sync_calls: Cell::new(0),
        }
    }

    pub fn with_latest_tag(mut self, tag: impl Into<String>) -> Self {
        self.latest_tag = Some(tag.into());
        self
    }

    /// Tag HEAD itself; the tag also becomes the latest tag
    pub fn with_head_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        self.head_tags.borrow_mut().push(tag.clone());
        self.latest_tag = Some(tag.clone());
        self.head_tag = Some(tag);
        self
    }

    pub fn dirty(mut self) -> Self {
        self.clean = false;
        self
    }

    pub fn with_upstream(mut self, upstream: UpstreamStatus) -> Self {
        self.upstream = upstream;
        self
    }

    pub fn failing_sync(mut self, message: impl Into<String>) -> Self {
        self.sync_error = Some(message.into());
        self
    }

    pub fn failing_push(mut self, message: impl Into<String>) -> Self {
        self.push_error = Some(message.into());
        self
    }

    /// Tags created at HEAD so far
    pub fn created_tags(&self) -> Vec<String> {
        self.head_tags.borrow().clone()
    }

    /// `(remote, tag)` pairs pushed so far
    pub fn pushed_tags(&self) -> Vec<(String, String)> {
        self.pushed.borrow().clone()
    }

    pub fn sync_calls(&self) -> usize {
        self.sync_calls.get()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn current_branch(&self) -> Result<String> {
        Ok(self.branch.clone())
    }

    fn is_working_tree_clean(&self) -> Result<bool> {
        Ok(self.clean)
    }

    fn upstream_status(&self, _remote: &str) -> Result<UpstreamStatus> {
        Ok(self.upstream.clone())
    }

    fn tag_at_head(&self) -> Result<Option<String>> {
        Ok(self.head_tag.clone())
    }

    fn latest_tag(&self) -> Result<Option<String>> {
        Ok(self.latest_tag.clone())
    }

    fn sync_with_remote(&self, remote: &str) -> Result<()> {
        self.sync_calls.set(self.sync_calls.get() + 1);
        match &self.sync_error {
            Some(message) => Err(BumpError::sync(format!("{}: {}", remote, message))),
            None => Ok(()),
        }
    }

    fn create_tag(&self, name: &str) -> Result<TagCreation> {
        if self.head_tags.borrow().iter().any(|tag| tag == name) {
            return Ok(TagCreation::AlreadyPresent);
        }
        if self.latest_tag.as_deref() == Some(name) {
            return Err(BumpError::tag_push(format!(
                "Tag '{}' already exists elsewhere",
                name
            )));
        }

        self.head_tags.borrow_mut().push(name.to_string());
        Ok(TagCreation::Created)
    }

    fn push_tag(&self, remote: &str, name: &str) -> Result<()> {
        if let Some(message) = &self.push_error {
            return Err(BumpError::tag_push(message.clone()));
        }

        self.pushed
            .borrow_mut()
            .push((remote.to_string(), name.to_string()));
        Ok(())
    }

    fn tag_points_at_head(&self, name: &str) -> Result<bool> {
        Ok(self.head_tags.borrow().iter().any(|tag| tag == name))
    }
}
