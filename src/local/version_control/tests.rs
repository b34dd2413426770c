//! Tests for [`Git2VersionControl`] against real temporary repositories.
//!
//! Each fixture creates a bare "origin" plus an author working copy; fetches
//! and pushes go over the local file transport.

#![expect(
    clippy::panic_in_result_fn,
    reason = "Test assertions are expected to panic on failure"
)]

use std::fs;
use std::path::Path;

use git2::{Oid, Repository, RepositoryInitOptions, Signature};
use rstest::{fixture, rstest};
use tempfile::TempDir;

use super::{Git2VersionControl, VersionControl};
use crate::local::GitOperationError;

type TestError = Box<dyn std::error::Error>;

struct Remotes {
    _dirs: (TempDir, TempDir),
    bare_path: String,
    author: Repository,
}

fn init_with_main(path: &Path, bare: bool) -> Result<Repository, TestError> {
    let mut options = RepositoryInitOptions::new();
    options.initial_head("main").bare(bare);
    Ok(Repository::init_opts(path, &options)?)
}

fn commit_file(
    repo: &Repository,
    file: &str,
    content: &str,
    message: &str,
) -> Result<Oid, TestError> {
    let workdir = repo.workdir().ok_or("repository has no working directory")?;
    fs::write(workdir.join(file), content)?;

    let mut index = repo.index()?;
    index.add_path(Path::new(file))?;
    index.write()?;
    let tree = repo.find_tree(index.write_tree()?)?;
    let signature = Signature::now("Test User", "test@example.com")?;

    let parent = repo
        .head()
        .ok()
        .map(|head| head.peel_to_commit())
        .transpose()?;
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
    Ok(repo.commit(
        Some("HEAD"),
        &signature,
        &signature,
        message,
        &tree,
        &parents,
    )?)
}

#[fixture]
fn remotes() -> Result<Remotes, TestError> {
    let bare_dir = TempDir::new()?;
    let author_dir = TempDir::new()?;
    init_with_main(bare_dir.path(), true)?;
    let bare_path = bare_dir
        .path()
        .to_str()
        .ok_or("temp path is not valid UTF-8")?
        .to_owned();

    let author = init_with_main(author_dir.path(), false)?;
    author.remote("origin", &bare_path)?;
    commit_file(&author, "README.md", "widgets\n", "Initial commit")?;

    Ok(Remotes {
        _dirs: (bare_dir, author_dir),
        bare_path,
        author,
    })
}

fn author_control(remotes: &Remotes) -> Result<Git2VersionControl, TestError> {
    let workdir = remotes
        .author
        .workdir()
        .ok_or("repository has no working directory")?;
    Ok(Git2VersionControl::new(workdir))
}

fn create_branch(repo: &Repository, name: &str) -> Result<(), TestError> {
    let head = repo.head()?.peel_to_commit()?;
    repo.branch(name, &head, false)?;
    repo.set_head(&format!("refs/heads/{name}"))?;
    Ok(())
}

#[rstest]
fn current_branch_names_checked_out_branch(
    remotes: Result<Remotes, TestError>,
) -> Result<(), TestError> {
    let remotes = remotes?;
    let control = author_control(&remotes)?;

    assert_eq!(control.current_branch()?, "main");
    Ok(())
}

#[rstest]
fn current_branch_reports_unborn_branch() -> Result<(), TestError> {
    let dir = TempDir::new()?;
    init_with_main(dir.path(), false)?;
    let control = Git2VersionControl::new(dir.path());

    assert_eq!(control.current_branch(), Err(GitOperationError::NoCommits));
    assert_eq!(control.last_commit_message(), Err(GitOperationError::NoCommits));
    Ok(())
}

#[rstest]
fn current_branch_reports_detached_head(
    remotes: Result<Remotes, TestError>,
) -> Result<(), TestError> {
    let remotes = remotes?;
    let head = remotes.author.head()?.peel_to_commit()?.id();
    remotes.author.set_head_detached(head)?;
    let control = author_control(&remotes)?;

    assert_eq!(control.current_branch(), Err(GitOperationError::DetachedHead));
    Ok(())
}

#[rstest]
fn last_commit_message_is_summary_line(
    remotes: Result<Remotes, TestError>,
) -> Result<(), TestError> {
    let remotes = remotes?;
    commit_file(
        &remotes.author,
        "widget.rs",
        "fn widget() {}\n",
        "Add widget support\n\nLonger body text.",
    )?;
    let control = author_control(&remotes)?;

    assert_eq!(control.last_commit_message()?, "Add widget support");
    Ok(())
}

#[rstest]
fn push_publishes_branch_to_origin(remotes: Result<Remotes, TestError>) -> Result<(), TestError> {
    let remotes = remotes?;
    create_branch(&remotes.author, "feature-x")?;
    let expected = commit_file(&remotes.author, "feature.txt", "x\n", "Feature X")?;
    let control = author_control(&remotes)?;

    control.push("feature-x")?;

    let bare = Repository::open_bare(&remotes.bare_path)?;
    let pushed = bare.find_reference("refs/heads/feature-x")?.target();
    assert_eq!(pushed, Some(expected));
    Ok(())
}

#[rstest]
fn push_rejects_unknown_branch(remotes: Result<Remotes, TestError>) -> Result<(), TestError> {
    let remotes = remotes?;
    let control = author_control(&remotes)?;

    assert_eq!(
        control.push("missing"),
        Err(GitOperationError::BranchNotFound {
            name: "missing".to_owned()
        })
    );
    Ok(())
}

#[rstest]
fn fetch_then_checkout_switches_to_review_branch(
    remotes: Result<Remotes, TestError>,
) -> Result<(), TestError> {
    let remotes = remotes?;
    let author = author_control(&remotes)?;
    author.push("main")?;
    create_branch(&remotes.author, "feature-x")?;
    commit_file(&remotes.author, "feature.txt", "x\n", "Feature X")?;
    author.push("feature-x")?;

    let reviewer_dir = TempDir::new()?;
    Repository::clone(&remotes.bare_path, reviewer_dir.path())?;
    let reviewer = Git2VersionControl::new(reviewer_dir.path());

    reviewer.fetch(&remotes.bare_path, "feature-x", "pr-42")?;
    reviewer.checkout("pr-42")?;

    assert_eq!(reviewer.current_branch()?, "pr-42");
    assert_eq!(reviewer.last_commit_message()?, "Feature X");
    assert!(reviewer_dir.path().join("feature.txt").exists());
    Ok(())
}

#[rstest]
fn fetch_reports_missing_remote_branch(
    remotes: Result<Remotes, TestError>,
) -> Result<(), TestError> {
    let remotes = remotes?;
    let control = author_control(&remotes)?;

    let result = control.fetch(&remotes.bare_path, "does-not-exist", "pr-7");

    assert!(
        matches!(result, Err(GitOperationError::FetchFailed { .. })),
        "expected FetchFailed, got {result:?}"
    );
    Ok(())
}

#[rstest]
fn fetch_ignores_stale_local_branch_when_remote_branch_is_missing(
    remotes: Result<Remotes, TestError>,
) -> Result<(), TestError> {
    let remotes = remotes?;
    let control = author_control(&remotes)?;
    control.push("main")?;
    let head = remotes.author.head()?.peel_to_commit()?;
    remotes.author.branch("pr-7", &head, false)?;

    let result = control.fetch(&remotes.bare_path, "does-not-exist", "pr-7");

    assert!(
        matches!(result, Err(GitOperationError::FetchFailed { .. })),
        "expected FetchFailed, got {result:?}"
    );
    Ok(())
}

#[rstest]
fn fetch_refuses_to_update_checked_out_branch(
    remotes: Result<Remotes, TestError>,
) -> Result<(), TestError> {
    let remotes = remotes?;
    let author = author_control(&remotes)?;
    author.push("main")?;
    create_branch(&remotes.author, "feature-x")?;
    commit_file(&remotes.author, "feature.txt", "x\n", "Feature X")?;
    author.push("feature-x")?;

    let reviewer_dir = TempDir::new()?;
    Repository::clone(&remotes.bare_path, reviewer_dir.path())?;
    let reviewer = Git2VersionControl::new(reviewer_dir.path());
    reviewer.fetch(&remotes.bare_path, "feature-x", "pr-42")?;
    reviewer.checkout("pr-42")?;

    commit_file(&remotes.author, "feature.txt", "y\n", "Feature X follow-up")?;
    author.push("feature-x")?;

    let result = reviewer.fetch(&remotes.bare_path, "feature-x", "pr-42");

    assert!(
        matches!(result, Err(GitOperationError::FetchFailed { .. })),
        "expected FetchFailed, got {result:?}"
    );
    assert_eq!(reviewer.current_branch()?, "pr-42");
    assert_eq!(reviewer.last_commit_message()?, "Feature X");
    assert_eq!(
        fs::read_to_string(reviewer_dir.path().join("feature.txt"))?,
        "x\n"
    );
    Ok(())
}

#[rstest]
fn checkout_reports_unknown_branch(remotes: Result<Remotes, TestError>) -> Result<(), TestError> {
    let remotes = remotes?;
    let control = author_control(&remotes)?;

    assert_eq!(
        control.checkout("pr-404"),
        Err(GitOperationError::BranchNotFound {
            name: "pr-404".to_owned()
        })
    );
    Ok(())
}

#[rstest]
fn default_branch_follows_origin_head(
    remotes: Result<Remotes, TestError>,
) -> Result<(), TestError> {
    let remotes = remotes?;
    let head = remotes.author.head()?.peel_to_commit()?.id();
    remotes
        .author
        .reference("refs/remotes/origin/trunk", head, true, "test setup")?;
    remotes.author.reference_symbolic(
        "refs/remotes/origin/HEAD",
        "refs/remotes/origin/trunk",
        true,
        "test setup",
    )?;
    let control = author_control(&remotes)?;

    assert_eq!(control.default_branch()?, "trunk");
    Ok(())
}

#[rstest]
fn default_branch_queries_remote_without_origin_head(
    remotes: Result<Remotes, TestError>,
) -> Result<(), TestError> {
    let remotes = remotes?;
    let control = author_control(&remotes)?;
    control.push("main")?;

    assert_eq!(control.default_branch()?, "main");
    Ok(())
}

#[rstest]
fn operations_outside_a_repository_report_unavailable() -> Result<(), TestError> {
    let dir = TempDir::new()?;
    let control = Git2VersionControl::new(dir.path());

    assert!(matches!(
        control.current_branch(),
        Err(GitOperationError::RepositoryNotAvailable { .. })
    ));
    Ok(())
}
