use crate::error::{BumpError, Result};
use crate::git::{Repository, TagCreation, UpstreamStatus};
use git2::build::CheckoutBuilder;
use git2::{
    Cred, CredentialType, DescribeFormatOptions, DescribeOptions, ErrorCode, Oid,
    RemoteCallbacks, Repository as Git2Repo, StatusOptions,
};
use std::path::Path;

/// Give up after this many credential attempts instead of letting libgit2 retry forever
const MAX_CREDENTIAL_ATTEMPTS: usize = 4;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn head_oid(&self) -> Result<Oid> {
        Ok(self.repo.head()?.peel_to_commit()?.id())
    }

    /// Commit a tag resolves to, or `None` if there is no such tag
    fn tag_target(&self, name: &str) -> Result<Option<Oid>> {
        match self.repo.find_reference(&format!("refs/tags/{}", name)) {
            Ok(reference) => Ok(Some(reference.peel_to_commit()?.id())),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Resolve the remote-tracking ref the current branch is compared with
    ///
    /// Returns the ref name and whether it came from branch configuration.
    fn upstream_ref(&self, remote: &str) -> Result<Option<(String, bool)>> {
        let head = self.repo.head()?;
        let head_name = head
            .name()
            .ok_or_else(|| BumpError::sync("HEAD reference name is not valid UTF-8"))?;
        let branch = self.current_branch()?;

        match self.repo.branch_upstream_name(head_name) {
            Ok(buf) => {
                let name = buf
                    .as_str()
                    .ok_or_else(|| BumpError::sync("upstream name is not valid UTF-8"))?
                    .to_string();
                if self.ref_exists(&name)? {
                    return Ok(Some((name, true)));
                }
                // Configured, but its tracking ref was never fetched
            }
            Err(e) if e.code() == ErrorCode::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let fallback = format!("refs/remotes/{}/{}", remote, branch);
        Ok(self.ref_exists(&fallback)?.then_some((fallback, false)))
    }

    fn ref_exists(&self, name: &str) -> Result<bool> {
        match self.repo.refname_to_id(name) {
            Ok(_) => Ok(true),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn has_tags(&self) -> Result<bool> {
        Ok(!self.repo.tag_names(None)?.is_empty())
    }

    /// Run `git describe --tags` style lookup on HEAD
    fn describe_head(&self, exact: bool) -> Result<Option<String>> {
        if !self.has_tags()? {
            return Ok(None);
        }

        let mut options = DescribeOptions::new();
        options.describe_tags();
        if exact {
            options.max_candidates_tags(0);
        }

        let describe = match self.repo.describe(&options) {
            Ok(describe) => describe,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut format = DescribeFormatOptions::new();
        format.abbreviated_size(0);
        Ok(Some(describe.format(Some(&format))?))
    }

    /// Fast-forward the checked-out branch to `upstream`, if that is possible
    fn fast_forward(&self, upstream: &str) -> Result<()> {
        let upstream_oid = self.repo.refname_to_id(upstream)?;
        let local_oid = self.head_oid()?;

        if local_oid == upstream_oid {
            return Ok(());
        }

        // Local is ahead or has diverged; the unpushed check reports it
        if !self.repo.graph_descendant_of(upstream_oid, local_oid)? {
            return Ok(());
        }

        let mut head = self.repo.head()?;
        head.set_target(upstream_oid, &format!("git-bump: fast-forward to {}", upstream))?;
        self.repo
            .checkout_head(Some(CheckoutBuilder::new().force()))
            .map_err(|e| BumpError::sync(format!("Checkout after fast-forward failed: {}", e)))?;

        Ok(())
    }
}

/// Credential callbacks shared by fetch and push.
///
/// Tries the SSH agent, then the usual key files in `~/.ssh`, then the
/// default credential helper.
fn remote_callbacks<'a>() -> RemoteCallbacks<'a> {
    let mut callbacks = RemoteCallbacks::new();
    let mut attempts = 0;

    callbacks.credentials(move |_url, username_from_url, allowed_types| {
        attempts += 1;
        if attempts > MAX_CREDENTIAL_ATTEMPTS {
            return Err(git2::Error::from_str("authentication failed"));
        }

        let username = username_from_url.unwrap_or("git");

        if allowed_types.contains(CredentialType::SSH_KEY) {
            if attempts == 1 {
                if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }
            }

            if let Some(home) = dirs::home_dir() {
                for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                    let path = home.join(".ssh").join(key);
                    if path.exists() {
                        if let Ok(cred) = Cred::ssh_key(username, None, &path, None) {
                            return Ok(cred);
                        }
                    }
                }
            }
        }

        Cred::default()
    });

    callbacks
}

impl Repository for Git2Repository {
    fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        if !head.is_branch() {
            return Err(BumpError::sync("HEAD is detached - check out a branch first"));
        }

        head.shorthand()
            .map(|name| name.to_string())
            .ok_or_else(|| BumpError::sync("Branch name is not valid UTF-8"))
    }

    fn is_working_tree_clean(&self) -> Result<bool> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .include_ignored(false)
            .recurse_untracked_dirs(false);

        let statuses = self.repo.statuses(Some(&mut options))?;
        Ok(statuses.is_empty())
    }

    fn upstream_status(&self, remote: &str) -> Result<UpstreamStatus> {
        let Some((upstream, configured)) = self.upstream_ref(remote)? else {
            return Ok(UpstreamStatus::Missing {
                branch: self.current_branch()?,
            });
        };

        let upstream_oid = self.repo.refname_to_id(&upstream)?;
        let (ahead, _behind) = self.repo.graph_ahead_behind(self.head_oid()?, upstream_oid)?;
        let upstream = upstream
            .strip_prefix("refs/remotes/")
            .unwrap_or(&upstream)
            .to_string();

        Ok(if configured {
            UpstreamStatus::Tracking { upstream, ahead }
        } else {
            UpstreamStatus::Fallback { upstream, ahead }
        })
    }

    fn tag_at_head(&self) -> Result<Option<String>> {
        self.describe_head(true)
    }

    fn latest_tag(&self) -> Result<Option<String>> {
        self.describe_head(false)
    }

    fn sync_with_remote(&self, remote_name: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote_name)
            .map_err(|_| BumpError::sync(format!("Remote '{}' not found", remote_name)))?;

        let mut fetch_options = git2::FetchOptions::new();
        fetch_options.remote_callbacks(remote_callbacks());

        // All remote branches into their tracking refs, plus every tag
        let refspec_heads = format!("+refs/heads/*:refs/remotes/{}/*", remote_name);
        let refspecs = [refspec_heads.as_str(), "+refs/tags/*:refs/tags/*"];
        remote
            .fetch(&refspecs, Some(&mut fetch_options), None)
            .map_err(|e| {
                BumpError::sync(format!("Failed to fetch from remote '{}': {}", remote_name, e))
            })?;

        if let Some((upstream, _)) = self.upstream_ref(remote_name)? {
            self.fast_forward(&upstream)?;
        }

        Ok(())
    }

    fn create_tag(&self, name: &str) -> Result<TagCreation> {
        let head = self.repo.head()?.peel_to_commit()?;

        match self.tag_target(name)? {
            Some(oid) if oid == head.id() => Ok(TagCreation::AlreadyPresent),
            Some(oid) => Err(BumpError::tag_push(format!(
                "Tag '{}' already exists at {}",
                name, oid
            ))),
            None => {
                self.repo
                    .tag_lightweight(name, head.as_object(), false)
                    .map_err(|e| {
                        BumpError::tag_push(format!("Cannot create tag '{}': {}", name, e))
                    })?;
                Ok(TagCreation::Created)
            }
        }
    }

    fn push_tag(&self, remote_name: &str, name: &str) -> Result<()> {
        let mut remote = self
            .repo
            .find_remote(remote_name)
            .map_err(|_| BumpError::tag_push(format!("No remote named '{}' found", remote_name)))?;

        let mut callbacks = remote_callbacks();
        // Rejections by the server arrive here, not as an Err from push()
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "remote rejected {}: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        let mut push_options = git2::PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/tags/{0}:refs/tags/{0}", name);
        remote
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| match e.class() {
                git2::ErrorClass::Net => {
                    BumpError::tag_push(format!("Network error during push: {}", e))
                }
                _ => BumpError::tag_push(format!("Failed to push tag '{}': {}", name, e)),
            })
    }

    fn tag_points_at_head(&self, name: &str) -> Result<bool> {
        Ok(self.tag_target(name)? == Some(self.head_oid()?))
    }
}
