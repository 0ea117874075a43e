//! Main workflow orchestration logic
//!
//! Keeps the bump workflow out of main.rs so it can run against any
//! [`Repository`] implementation. The workflow has two halves with the
//! confirmation prompt between them:
//!
//! 1. [`prepare_bump`] gathers repository facts, optionally reads the source
//!    file and asks the decider for the next version. Nothing is written.
//! 2. [`apply_bump`] creates the tag, pushes it and verifies the result.

use std::fs;
use std::path::PathBuf;

use crate::boundary::BoundaryWarning;
use crate::decider::{BumpDecision, VersionBumpDecider};
use crate::domain::{scan_declaration, BumpKind, DeclarationFormat, RepositoryState, SourceSnapshot};
use crate::error::{BumpError, Result};
use crate::git::{Repository, TagCreation, UpstreamStatus};

/// Arguments for the bump workflow
///
/// Mirrors the CLI Args in a form that does not depend on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct BumpWorkflowArgs {
    pub kind: BumpKind,

    /// Remote used for fetch, push and the unpushed-commit check
    pub remote: String,

    /// File holding the embedded version declaration, if it should be checked
    pub source_path: Option<PathBuf>,

    /// Fetch and fast-forward before deciding
    pub fetch: bool,
}

/// Everything learned while preparing a bump
#[derive(Debug, Clone, PartialEq)]
pub struct BumpPlan {
    pub state: RepositoryState,
    pub source: Option<SourceSnapshot>,
    pub decision: BumpDecision,
}

/// Result of a successful publish
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The tag that was created or reused
    pub tag: String,

    pub creation: TagCreation,

    /// Whether the tag was pushed to remote
    pub pushed: bool,
}

/// Query the repository for the facts the decider needs.
///
/// Warnings are handed to `report` as they are found.
pub fn capture_state<R: Repository>(
    repo: &R,
    remote: &str,
    report: &mut dyn FnMut(BoundaryWarning),
) -> Result<RepositoryState> {
    let is_clean = repo.is_working_tree_clean()?;

    let upstream = repo.upstream_status(remote)?;
    if let UpstreamStatus::Fallback { upstream, .. } = &upstream {
        report(BoundaryWarning::NoUpstream {
            branch: repo.current_branch()?,
            fallback: upstream.clone(),
        });
    }

    Ok(RepositoryState {
        is_clean,
        is_synced_with_remote: upstream.is_synced(),
        latest_tag: repo.latest_tag()?,
        head_tag: repo.tag_at_head()?,
    })
}

/// Read `path` and look for the version declaration in it
pub fn read_source(
    path: impl Into<PathBuf>,
    format: &DeclarationFormat,
) -> Result<SourceSnapshot> {
    let path = path.into();
    let text = fs::read_to_string(&path).map_err(|e| {
        BumpError::Io(std::io::Error::new(
            e.kind(),
            format!("cannot read {}: {}", path.display(), e),
        ))
    })?;

    Ok(SourceSnapshot::new(path, scan_declaration(&text, format)))
}

/// Gather repository facts and decide the next version.
///
/// Fetch and pull only run on a clean tree; a dirty tree is left untouched
/// and the decider rejects it.
pub fn prepare_bump<R: Repository>(
    repo: &R,
    decider: &VersionBumpDecider,
    args: &BumpWorkflowArgs,
    report: &mut dyn FnMut(BoundaryWarning),
) -> Result<BumpPlan> {
    if !args.fetch {
        report(BoundaryWarning::SyncSkipped {
            reason: "disabled with --no-fetch".to_string(),
        });
    } else if repo.is_working_tree_clean()? {
        repo.sync_with_remote(&args.remote)?;
    } else {
        report(BoundaryWarning::SyncSkipped {
            reason: "working tree has uncommitted changes".to_string(),
        });
    }

    let state = capture_state(repo, &args.remote, report)?;

    let source = match &args.source_path {
        Some(path) => {
            let snapshot = read_source(path, &decider.config().declaration)?;
            for skipped in &snapshot.skipped {
                report(BoundaryWarning::MalformedDeclaration {
                    path: snapshot.path.clone(),
                    line_number: skipped.line_number,
                    line: skipped.line.clone(),
                });
            }
            Some(snapshot)
        }
        None => None,
    };

    let decision = decider.evaluate(&state, args.kind, source.as_ref())?;

    Ok(BumpPlan {
        state,
        source,
        decision,
    })
}

/// Create the planned tag at HEAD, optionally push it, and verify it.
///
/// Re-running after a partial failure is safe: an existing tag at HEAD is
/// reused and pushed again.
pub fn apply_bump<R: Repository>(
    repo: &R,
    plan: &BumpPlan,
    remote: &str,
    push: bool,
) -> Result<WorkflowResult> {
    let tag = plan.decision.tag_name.clone();

    let creation = repo.create_tag(&tag)?;

    if !repo.tag_points_at_head(&tag)? {
        return Err(BumpError::tag_push(format!(
            "tag '{}' does not point at HEAD after creation",
            tag
        )));
    }

    if push {
        repo.push_tag(remote, &tag)?;
    }

    Ok(WorkflowResult {
        tag,
        creation,
        pushed: push,
    })
}
