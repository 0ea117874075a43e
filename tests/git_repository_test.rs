mod common;

use common::{commit_file, push, setup, tag_head};
use git_bump::cli::{apply_bump, prepare_bump, BumpWorkflowArgs};
use git_bump::config::Config;
use git_bump::domain::BumpKind;
use git_bump::git::{Git2Repository, Repository, TagCreation, UpstreamStatus};
use git_bump::{BumpError, DeciderConfig, VersionBumpDecider};
use std::fs;

fn decider() -> VersionBumpDecider {
    VersionBumpDecider::new(DeciderConfig::from_config(&Config::default()).unwrap())
}

fn args(kind: BumpKind) -> BumpWorkflowArgs {
    BumpWorkflowArgs {
        kind,
        remote: "origin".to_string(),
        source_path: None,
        fetch: true,
    }
}

// ============================================================================
// Repository queries
// ============================================================================

#[test]
fn test_fresh_clone_state() {
    let fixture = setup("2.3.1");
    let repo = Git2Repository::open(&fixture.work_path).unwrap();

    assert_eq!(repo.current_branch().unwrap(), "main");
    assert!(repo.is_working_tree_clean().unwrap());
    assert_eq!(
        repo.upstream_status("origin").unwrap(),
        UpstreamStatus::Tracking {
            upstream: "origin/main".to_string(),
            ahead: 0
        }
    );
    assert_eq!(repo.latest_tag().unwrap(), Some("2.3.1".to_string()));
    assert_eq!(repo.tag_at_head().unwrap(), None);
}

#[test]
fn test_untracked_file_makes_tree_dirty() {
    let fixture = setup("2.3.1");
    fs::write(fixture.work_path.join("notes.txt"), "scratch\n").unwrap();

    let repo = Git2Repository::open(&fixture.work_path).unwrap();
    assert!(!repo.is_working_tree_clean().unwrap());
}

#[test]
fn test_modified_file_makes_tree_dirty() {
    let fixture = setup("2.3.1");
    fs::write(fixture.work_path.join("README.md"), "Changed\n").unwrap();

    let repo = Git2Repository::open(&fixture.work_path).unwrap();
    assert!(!repo.is_working_tree_clean().unwrap());
}

#[test]
fn test_local_commit_is_ahead_of_upstream() {
    let fixture = setup("2.3.1");
    commit_file(&fixture.work(), "CHANGELOG.md", "wip\n", "chore: wip");

    let repo = Git2Repository::open(&fixture.work_path).unwrap();
    let status = repo.upstream_status("origin").unwrap();
    assert_eq!(
        status,
        UpstreamStatus::Tracking {
            upstream: "origin/main".to_string(),
            ahead: 1
        }
    );
    assert!(!status.is_synced());
}

#[test]
fn test_unfetched_configured_upstream_falls_back_to_same_named_branch() {
    let fixture = setup("2.3.1");
    let work = fixture.work();
    work.config()
        .unwrap()
        .set_str("branch.main.merge", "refs/heads/not-fetched")
        .unwrap();

    let repo = Git2Repository::from_git2(work);
    assert_eq!(
        repo.upstream_status("origin").unwrap(),
        UpstreamStatus::Fallback {
            upstream: "origin/main".to_string(),
            ahead: 0
        }
    );
}

#[test]
fn test_tag_at_head_exact_match() {
    let fixture = setup("2.3.1");
    tag_head(&fixture.work(), "2.4.0");

    let repo = Git2Repository::open(&fixture.work_path).unwrap();
    assert_eq!(repo.tag_at_head().unwrap(), Some("2.4.0".to_string()));
    assert_eq!(repo.latest_tag().unwrap(), Some("2.4.0".to_string()));
}

#[test]
fn test_repository_without_tags() {
    let root = tempfile::TempDir::new().unwrap();
    let raw = common::init_repo(root.path());
    commit_file(&raw, "README.md", "hello\n", "Initial commit");

    let repo = Git2Repository::from_git2(raw);
    assert_eq!(repo.latest_tag().unwrap(), None);
    assert_eq!(repo.tag_at_head().unwrap(), None);
    assert_eq!(
        repo.upstream_status("origin").unwrap(),
        UpstreamStatus::Missing {
            branch: "main".to_string()
        }
    );
}

#[test]
fn test_detached_head_has_no_branch() {
    let fixture = setup("2.3.1");
    let work = fixture.work();
    let head = work.head().unwrap().peel_to_commit().unwrap().id();
    work.set_head_detached(head).unwrap();

    let repo = Git2Repository::from_git2(work);
    assert!(repo.current_branch().is_err());
    assert!(repo.upstream_status("origin").is_err());
}

// ============================================================================
// Sync and publish
// ============================================================================

#[test]
fn test_sync_fast_forwards_to_new_upstream_commits() {
    let fixture = setup("2.3.1");
    let upstream_head = commit_file(&fixture.seed, "README.md", "Newer\n", "fix: typo");
    push(&fixture.seed, &["refs/heads/main:refs/heads/main"]);

    let repo = Git2Repository::open(&fixture.work_path).unwrap();
    repo.sync_with_remote("origin").unwrap();

    let work = fixture.work();
    assert_eq!(work.head().unwrap().target(), Some(upstream_head));
    assert_eq!(
        fs::read_to_string(fixture.work_path.join("README.md")).unwrap(),
        "Newer\n"
    );
    assert!(repo.is_working_tree_clean().unwrap());
}

#[test]
fn test_sync_fetches_new_tags() {
    let fixture = setup("2.3.1");
    tag_head(&fixture.seed, "2.3.5");
    push(&fixture.seed, &["refs/tags/2.3.5:refs/tags/2.3.5"]);

    let repo = Git2Repository::open(&fixture.work_path).unwrap();
    repo.sync_with_remote("origin").unwrap();

    assert_eq!(repo.tag_at_head().unwrap(), Some("2.3.5".to_string()));
}

#[test]
fn test_sync_with_unknown_remote_fails() {
    let fixture = setup("2.3.1");
    let repo = Git2Repository::open(&fixture.work_path).unwrap();
    let err = repo.sync_with_remote("nowhere").unwrap_err();
    assert!(matches!(err, BumpError::RemoteSyncFailure(_)));
}

#[test]
fn test_create_tag_conflict_elsewhere() {
    let fixture = setup("2.3.1");
    let repo = Git2Repository::open(&fixture.work_path).unwrap();
    let err = repo.create_tag("2.3.1").unwrap_err();
    assert!(matches!(err, BumpError::TagPushFailure(_)));
}

#[test]
fn test_prepare_and_apply_publishes_tag() {
    let fixture = setup("2.3.1");
    let repo = Git2Repository::open(&fixture.work_path).unwrap();

    let plan = prepare_bump(&repo, &decider(), &args(BumpKind::Patch), &mut |_| {}).unwrap();
    assert_eq!(plan.decision.next.to_string(), "2.3.2");

    let result = apply_bump(&repo, &plan, "origin", true).unwrap();
    assert_eq!(result.tag, "2.3.2");
    assert_eq!(result.creation, TagCreation::Created);

    let work_head = fixture.work().head().unwrap().target().unwrap();
    let remote_tag = fixture
        .remote()
        .find_reference("refs/tags/2.3.2")
        .unwrap()
        .peel_to_commit()
        .unwrap()
        .id();
    assert_eq!(remote_tag, work_head);
}

#[test]
fn test_apply_twice_reuses_tag() {
    let fixture = setup("2.3.1");
    let repo = Git2Repository::open(&fixture.work_path).unwrap();

    let plan = prepare_bump(&repo, &decider(), &args(BumpKind::Minor), &mut |_| {}).unwrap();
    apply_bump(&repo, &plan, "origin", true).unwrap();
    let again = apply_bump(&repo, &plan, "origin", true).unwrap();

    assert_eq!(again.creation, TagCreation::AlreadyPresent);
    assert!(repo.tag_points_at_head("2.4.0").unwrap());
}

#[test]
fn test_prepare_rejects_already_tagged_head() {
    let fixture = setup("2.3.1");
    let repo = Git2Repository::open(&fixture.work_path).unwrap();

    let plan = prepare_bump(&repo, &decider(), &args(BumpKind::Patch), &mut |_| {}).unwrap();
    apply_bump(&repo, &plan, "origin", false).unwrap();

    let err = prepare_bump(&repo, &decider(), &args(BumpKind::Patch), &mut |_| {}).unwrap_err();
    assert!(matches!(err, BumpError::AlreadyTagged(tag) if tag == "2.3.2"));
}

#[test]
fn test_prepare_rejects_unpushed_commit() {
    let fixture = setup("2.3.1");
    commit_file(&fixture.work(), "src.txt", "local\n", "feat: local only");

    let repo = Git2Repository::open(&fixture.work_path).unwrap();
    let err = prepare_bump(&repo, &decider(), &args(BumpKind::Patch), &mut |_| {}).unwrap_err();
    assert!(matches!(err, BumpError::UnpushedCommits));
}
