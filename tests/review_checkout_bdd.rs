//! Behavioural tests for fetching a pull request into a review branch.

mod support;

use std::fs;
use std::path::{Path, PathBuf};

use git2::{Repository, RepositoryInitOptions, Signature};
use pullwright::presentation::{PresenterEvent, RecordingPresenter};
use pullwright::{Git2VersionControl, PullRequestOrchestrator, VersionControl, WorkflowError};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use serde_json::json;
use support::{SharedRuntime, ensure_runtime_and_server, mount, pulls_path, session_for};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMMENTS_SUFFIX: &str = "/comments";

/// Bare head repository plus a reviewer clone of it.
struct HeadRepository {
    _dirs: Vec<TempDir>,
    bare_path: String,
    reviewer_path: PathBuf,
}

#[derive(ScenarioState, Default)]
struct ReviewState {
    runtime: Slot<SharedRuntime>,
    server: Slot<MockServer>,
    head: Slot<HeadRepository>,
    error: Slot<WorkflowError>,
    events: Slot<Vec<PresenterEvent>>,
}

#[fixture]
fn review_state() -> ReviewState {
    ReviewState::default()
}

fn temp_dir() -> TempDir {
    TempDir::new().unwrap_or_else(|error| panic!("failed to create temp dir: {error}"))
}

fn init_with_main(dir: &Path, bare: bool) -> Repository {
    let mut options = RepositoryInitOptions::new();
    options.initial_head("main").bare(bare);
    Repository::init_opts(dir, &options)
        .unwrap_or_else(|error| panic!("failed to init repository: {error}"))
}

fn commit_file(repo: &Repository, file: &str, message: &str) -> Result<(), git2::Error> {
    let workdir = repo
        .workdir()
        .unwrap_or_else(|| panic!("repository has no working directory"));
    fs::write(workdir.join(file), message)
        .unwrap_or_else(|error| panic!("failed to write {file}: {error}"));

    let mut index = repo.index()?;
    index.add_path(Path::new(file))?;
    index.write()?;
    let tree = repo.find_tree(index.write_tree()?)?;
    let signature = Signature::now("Head Author", "author@example.com")?;
    let parent = repo.head().ok().map(|head| head.peel_to_commit()).transpose()?;
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
    repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
    Ok(())
}

fn reviewer_control(review_state: &ReviewState) -> Git2VersionControl {
    let reviewer_path = review_state
        .head
        .with_ref(|head| head.reviewer_path.clone())
        .unwrap_or_else(|| panic!("head repository not initialised"));
    Git2VersionControl::new(reviewer_path)
}

#[given("a head repository with branch {branch}")]
fn create_head_repository(review_state: &ReviewState, branch: String) {
    let branch_name = branch.trim_matches('"');
    let (bare_dir, author_dir, reviewer_dir) = (temp_dir(), temp_dir(), temp_dir());
    init_with_main(bare_dir.path(), true);
    let bare_path = bare_dir
        .path()
        .to_str()
        .unwrap_or_else(|| panic!("temp path is not valid UTF-8"))
        .to_owned();

    let author = init_with_main(author_dir.path(), false);
    let publish = || -> Result<(), Box<dyn std::error::Error>> {
        author.remote("origin", &bare_path)?;
        commit_file(&author, "README.md", "Initial commit")?;
        let author_git = Git2VersionControl::new(author_dir.path());
        author_git.push("main")?;

        let head = author.head()?.peel_to_commit()?;
        author.branch(branch_name, &head, false)?;
        author.set_head(&format!("refs/heads/{branch_name}"))?;
        commit_file(&author, "feature.txt", "Add the feature")?;
        author_git.push(branch_name)?;

        Repository::clone(&bare_path, reviewer_dir.path())?;
        Ok(())
    };
    publish().unwrap_or_else(|error| panic!("failed to publish head repository: {error}"));

    let reviewer_path = reviewer_dir.path().to_path_buf();
    review_state.head.set(HeadRepository {
        _dirs: vec![bare_dir, author_dir, reviewer_dir],
        bare_path,
        reviewer_path,
    });
}

fn mount_comment_endpoint(review_state: &ReviewState, number: u64) {
    let mock = Mock::given(method("POST"))
        .and(path(format!("/api/v3/repos/acme/widgets/issues/{number}{COMMENTS_SUFFIX}")))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 1 })));
    mount(&review_state.runtime, &review_state.server, mock);
}

#[given("a GitHub API describing pull request {number} from the head repository")]
fn seed_pull_with_head(review_state: &ReviewState, number: u64) {
    let bare_path = review_state
        .head
        .with_ref(|head| head.bare_path.clone())
        .unwrap_or_else(|| panic!("head repository not initialised"));
    let mock = Mock::given(method("GET"))
        .and(path(format!("{}/{number}", pulls_path())))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "number": number,
            "title": "Add the feature",
            "html_url": format!("https://github.com/acme/widgets/pull/{number}"),
            "head": {
                "ref": "feature-x",
                "repo": { "clone_url": bare_path, "ssh_url": null }
            }
        })));
    mount(&review_state.runtime, &review_state.server, mock);
    mount_comment_endpoint(review_state, number);
}

#[given("a GitHub API describing pull request {number} without a head repository")]
fn seed_pull_without_head(review_state: &ReviewState, number: u64) {
    let mock = Mock::given(method("GET"))
        .and(path(format!("{}/{number}", pulls_path())))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "number": number,
            "title": "Orphaned change",
            "head": { "ref": "gone", "repo": null }
        })));
    mount(&review_state.runtime, &review_state.server, mock);
    mount_comment_endpoint(review_state, number);
}

#[when("pull request {number} is fetched for review")]
fn fetch_for_review(review_state: &ReviewState, number: u64) {
    let runtime = ensure_runtime_and_server(&review_state.runtime, &review_state.server);
    let (gateway, session) = session_for(&runtime, &review_state.server);
    let git = reviewer_control(review_state);
    let presenter = RecordingPresenter::new();
    let orchestrator = PullRequestOrchestrator::new(&session, &gateway, &git, &presenter);

    if let Err(error) = runtime.block_on(orchestrator.fetch_pull_request_for_review(number)) {
        review_state.error.set(error);
    }
    review_state.events.set(presenter.events());
}

#[then("the local branch {branch} is checked out")]
fn assert_checked_out(review_state: &ReviewState, branch: String) {
    let current = reviewer_control(review_state)
        .current_branch()
        .unwrap_or_else(|error| panic!("failed to read the current branch: {error}"));
    assert_eq!(current, branch.trim_matches('"'));
}

#[then("the review comment was posted")]
fn assert_comment_posted(review_state: &ReviewState) {
    let runtime = ensure_runtime_and_server(&review_state.runtime, &review_state.server);
    let requests = review_state
        .server
        .with_ref(|server| runtime.block_on(server.received_requests()))
        .flatten()
        .unwrap_or_default();
    let comments = requests
        .iter()
        .filter(|request| request.url.path().ends_with(COMMENTS_SUFFIX))
        .count();

    assert_eq!(comments, 1, "expected a single review comment");
    assert!(review_state.error.with_ref(|_| ()).is_none());
}

#[then("exactly one failure is reported")]
fn assert_single_failure(review_state: &ReviewState) {
    let events = review_state
        .events
        .get()
        .unwrap_or_else(|| panic!("no fetch was run"));
    let failures = events
        .iter()
        .filter(|event| matches!(event, PresenterEvent::Fail(_)))
        .count();
    assert_eq!(failures, 1);

    let error = review_state
        .error
        .get()
        .unwrap_or_else(|| panic!("expected the fetch to fail"));
    assert!(
        matches!(error, WorkflowError::MissingCloneUrl { number: 7 }),
        "unexpected error: {error:?}"
    );
}

#[scenario(path = "tests/features/review_checkout.feature", index = 0)]
fn head_branch_fetched_and_checked_out(review_state: ReviewState) {
    let _ = review_state;
}

#[scenario(path = "tests/features/review_checkout.feature", index = 1)]
fn head_repository_gone(review_state: ReviewState) {
    let _ = review_state;
}
