//! Shared helpers for the behavioural tests.
//!
//! Step functions are synchronous, so scenarios keep a Tokio runtime and a
//! Wiremock server in `rstest-bdd` slots and block on async work.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use pullwright::{OctocrabGateway, PersonalAccessToken, RepositoryLocator, SessionContext};
use rstest_bdd::Slot;
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer};

/// Owner and repository every scenario talks to.
pub const REPOSITORY_SLUG: &str = "acme/widgets";

/// Runtime handle that can live in a `Slot`.
#[derive(Clone)]
pub struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

/// Returns the scenario runtime, creating it and the mock server on first
/// use.
pub fn ensure_runtime_and_server(
    runtime: &Slot<SharedRuntime>,
    server: &Slot<MockServer>,
) -> SharedRuntime {
    if runtime.with_ref(|_| ()).is_none() {
        let created = Runtime::new()
            .unwrap_or_else(|error| panic!("failed to create Tokio runtime: {error}"));
        runtime.set(SharedRuntime(Rc::new(RefCell::new(created))));
    }

    let shared = runtime
        .get()
        .unwrap_or_else(|| panic!("runtime not initialised after set"));

    if server.with_ref(|_| ()).is_none() {
        server.set(shared.block_on(MockServer::start()));
    }

    shared
}

/// Mounts `mock` on the scenario server.
pub fn mount(runtime: &Slot<SharedRuntime>, server: &Slot<MockServer>, mock: Mock) {
    let shared = ensure_runtime_and_server(runtime, server);
    server
        .with_ref(|mock_server| shared.block_on(mock.mount(mock_server)))
        .unwrap_or_else(|| panic!("mock server not initialised"));
}

/// Gateway and session for `alice` pointed at the scenario server.
///
/// The Octocrab client spawns its service buffer on construction, so the
/// gateway is built inside the scenario runtime.
pub fn session_for(
    runtime: &SharedRuntime,
    server: &Slot<MockServer>,
) -> (OctocrabGateway, SessionContext) {
    let server_uri = server
        .with_ref(MockServer::uri)
        .unwrap_or_else(|| panic!("mock server not initialised"));
    let locator = RepositoryLocator::parse(&format!("{server_uri}/{REPOSITORY_SLUG}"))
        .unwrap_or_else(|error| panic!("invalid repository URL: {error}"));
    let token = PersonalAccessToken::new("valid-token")
        .unwrap_or_else(|error| panic!("invalid token: {error}"));
    let gateway = runtime
        .block_on(async { OctocrabGateway::for_token(&token, locator.api_base()) })
        .unwrap_or_else(|error| panic!("failed to build gateway: {error}"));
    (gateway, SessionContext::new("alice", locator))
}

/// Pulls path of [`REPOSITORY_SLUG`] on the mock server.
pub fn pulls_path() -> String {
    format!("/api/v3/repos/{REPOSITORY_SLUG}/pulls")
}
