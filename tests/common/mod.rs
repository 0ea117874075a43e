// Shared fixtures: a seed repository, a bare "origin" and a clone of it.
#![allow(dead_code)]

use git2::{Commit, Oid, Repository, RepositoryInitOptions, Signature};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct Fixture {
    pub root: TempDir,
    /// Where new upstream commits are authored
    pub seed: Repository,
    pub remote_path: PathBuf,
    /// Clone of the remote; the repository under test
    pub work_path: PathBuf,
}

impl Fixture {
    pub fn work(&self) -> Repository {
        Repository::open(&self.work_path).expect("Could not open work repo")
    }

    pub fn remote(&self) -> Repository {
        Repository::open_bare(&self.remote_path).expect("Could not open remote repo")
    }

    /// Empty configuration file outside the work tree
    pub fn config_path(&self) -> PathBuf {
        let path = self.root.path().join("gitbump.toml");
        if !path.exists() {
            fs::write(&path, "").expect("Could not write config");
        }
        path
    }
}

fn signature() -> Signature<'static> {
    Signature::now("Test User", "test@example.com").expect("Could not create signature")
}

pub fn init_repo(path: &Path) -> Repository {
    let mut options = RepositoryInitOptions::new();
    options.initial_head("main");
    Repository::init_opts(path, &options).expect("Could not init git repo")
}

/// Write `content` to `name`, stage it and commit on HEAD
pub fn commit_file(repo: &Repository, name: &str, content: &str, message: &str) -> Oid {
    let workdir = repo.workdir().expect("Repository has no workdir");
    fs::write(workdir.join(name), content).expect("Could not write file");

    let mut index = repo.index().expect("Could not get index");
    index
        .add_path(Path::new(name))
        .expect("Could not add file to index");
    index.write().expect("Could not write index");

    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");

    let parents: Vec<Commit> = match repo.head() {
        Ok(head) => vec![head.peel_to_commit().expect("HEAD is not a commit")],
        Err(_) => Vec::new(),
    };
    let parent_refs: Vec<&Commit> = parents.iter().collect();

    let sig = signature();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parent_refs)
        .expect("Could not create commit")
}

pub fn tag_head(repo: &Repository, name: &str) {
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    repo.tag_lightweight(name, head.as_object(), false)
        .expect("Could not create tag");
}

pub fn push(repo: &Repository, refspecs: &[&str]) {
    let mut remote = repo.find_remote("origin").expect("No origin remote");
    remote.push(refspecs, None).expect("Could not push");
}

/// Seed history: `tag` on the first commit, one untagged commit on top.
/// The work clone starts clean and in sync with origin.
pub fn setup(tag: &str) -> Fixture {
    let root = TempDir::new().expect("Could not create temp dir");

    let seed_path = root.path().join("seed");
    let seed = init_repo(&seed_path);
    commit_file(&seed, "README.md", "Initial content\n", "Initial commit");
    tag_head(&seed, tag);
    commit_file(&seed, "README.md", "Updated content\n", "feat: add new feature");

    let remote_path = root.path().join("remote.git");
    let mut options = RepositoryInitOptions::new();
    options.bare(true).initial_head("main");
    Repository::init_opts(&remote_path, &options).expect("Could not init bare repo");

    seed.remote("origin", remote_path.to_str().unwrap())
        .expect("Could not add remote");
    let tag_refspec = format!("refs/tags/{0}:refs/tags/{0}", tag);
    push(&seed, &["refs/heads/main:refs/heads/main", &tag_refspec]);

    let work_path = root.path().join("work");
    Repository::clone(remote_path.to_str().unwrap(), &work_path).expect("Could not clone");

    Fixture {
        root,
        seed,
        remote_path,
        work_path,
    }
}
