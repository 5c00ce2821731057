//! Shared test utilities for command testing.
//!
//! Provides a factory wired to a wiremock server, a temporary cache file and
//! working directory, and stubs for the host environment and prompter.

use std::path::PathBuf;
use std::sync::Arc;

use gistmate_core::cache::{CacheStore, GistMap};
use gistmate_core::config::MemoryConfig;
use gistmate_core::environment::StubEnvironment;
use gistmate_core::iostreams::TestOutput;
use gistmate_core::prompter::StubPrompter;
use wiremock::matchers::{basic_auth, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::factory::Factory;

/// Login used by the harness credential.
pub const TEST_USER: &str = "octocat";
/// Secret used by the harness credential.
pub const TEST_SECRET: &str = "hunter2";
/// Web URL base configured by the harness.
pub const TEST_WEB_URL: &str = "https://gist.example.com";

/// A fully-configured test harness with factory, output capture, and mock server.
#[derive(Debug)]
pub struct TestHarness {
    /// The factory configured for testing.
    pub factory: Factory,
    /// Captured stdout/stderr output.
    pub output: TestOutput,
    /// Wiremock mock server for API requests.
    pub server: MockServer,
    /// Stub environment for verifying URLs, clipboard, and editor calls.
    pub env: Arc<StubEnvironment>,
    /// Stub prompter for providing test answers.
    pub prompter: Arc<StubPrompter>,
    /// Holds the cache file and the working directory.
    pub dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a harness with credentials and a working clipboard.
    pub async fn new() -> Self {
        Self::build(true, StubEnvironment::default()).await
    }

    /// Create a harness with no credentials configured.
    pub async fn without_credentials() -> Self {
        Self::build(false, StubEnvironment::default()).await
    }

    /// Create a harness whose clipboard always fails.
    pub async fn without_clipboard() -> Self {
        Self::build(true, StubEnvironment::without_clipboard()).await
    }

    async fn build(with_credentials: bool, env: StubEnvironment) -> Self {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let work_dir = dir.path().join("work");
        std::fs::create_dir_all(&work_dir).unwrap();
        let cache_file = dir.path().join("gists");

        let config = MemoryConfig::new()
            .with("cache_file", &cache_file.display().to_string())
            .with("web_url", TEST_WEB_URL);

        let (mut factory, output) = Factory::test();
        factory.io.set_stdin_tty(true);
        factory.io.set_stdout_tty(true);
        factory.io.set_never_prompt(false);

        let (factory, env) = factory.with_stub_environment(env);
        let (factory, prompter) = factory.with_stub_prompter();
        let factory = factory
            .with_http_client(reqwest::Client::new())
            .with_api_url(format!("{}/", server.uri()))
            .with_work_dir(work_dir)
            .with_config(Box::new(config));
        let factory = if with_credentials {
            factory.with_credentials(TEST_USER, TEST_SECRET)
        } else {
            factory.without_credentials()
        };

        Self {
            factory,
            output,
            server,
            env,
            prompter,
            dir,
        }
    }

    /// Get captured stdout as a string.
    pub fn stdout(&self) -> String {
        self.output.stdout()
    }

    /// Get captured stderr as a string.
    pub fn stderr(&self) -> String {
        self.output.stderr()
    }

    /// The cache store used by the factory.
    pub fn cache(&self) -> CacheStore {
        self.factory.cache_store().unwrap()
    }

    /// Current cache contents.
    pub fn cached(&self) -> GistMap {
        self.cache().load().unwrap()
    }

    /// Seed the cache with one entry.
    pub fn seed_cache(&self, gist_id: &str, filenames: &[&str]) {
        self.cache().put(gist_id, filenames.iter().copied()).unwrap();
    }

    /// The directory fetched files are written to.
    pub fn work_dir(&self) -> PathBuf {
        self.factory.work_dir().unwrap()
    }

    /// Write a local file and return its path as a string argument.
    pub fn write_file(&self, name: &str, content: &str) -> String {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path.display().to_string()
    }

    /// URLs opened through the stub environment.
    pub fn opened_urls(&self) -> Vec<String> {
        lock(&self.env.urls)
    }

    /// Text copied to the stub clipboard.
    pub fn clipboard(&self) -> Vec<String> {
        lock(&self.env.clipboard)
    }

    /// Files opened in the stub editor.
    pub fn edited(&self) -> Vec<PathBuf> {
        lock(&self.env.edited)
    }

    /// Number of requests the mock server has received.
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map_or(0, |requests| requests.len())
    }
}

fn lock<T: Clone>(list: &std::sync::Mutex<Vec<T>>) -> Vec<T> {
    list.lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .clone()
}

// --- Wiremock helpers ---

/// Mount an unauthenticated GET response mock for a specific path.
pub async fn mock_rest_get(
    server: &MockServer,
    url_path: &str,
    status: u16,
    response_body: serde_json::Value,
) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .respond_with(ResponseTemplate::new(status).set_body_json(response_body))
        .mount(server)
        .await;
}

/// Mount a GET mock that requires the harness credential.
pub async fn mock_rest_get_authed(
    server: &MockServer,
    url_path: &str,
    response_body: serde_json::Value,
) {
    Mock::given(method("GET"))
        .and(path(url_path))
        .and(basic_auth(TEST_USER, TEST_SECRET))
        .respond_with(ResponseTemplate::new(200).set_body_json(response_body))
        .mount(server)
        .await;
}

/// Mount a POST mock that requires the harness credential.
pub async fn mock_rest_post(
    server: &MockServer,
    url_path: &str,
    status: u16,
    response_body: serde_json::Value,
) {
    Mock::given(method("POST"))
        .and(path(url_path))
        .and(basic_auth(TEST_USER, TEST_SECRET))
        .respond_with(ResponseTemplate::new(status).set_body_json(response_body))
        .mount(server)
        .await;
}

/// Mount a PATCH mock that requires the harness credential.
pub async fn mock_rest_patch(
    server: &MockServer,
    url_path: &str,
    status: u16,
    response_body: serde_json::Value,
) {
    Mock::given(method("PATCH"))
        .and(path(url_path))
        .and(basic_auth(TEST_USER, TEST_SECRET))
        .respond_with(ResponseTemplate::new(status).set_body_json(response_body))
        .mount(server)
        .await;
}

/// A minimal gist body with the given files and contents.
pub fn gist_json(gist_id: &str, files: &[(&str, &str)]) -> serde_json::Value {
    let files: serde_json::Map<String, serde_json::Value> = files
        .iter()
        .map(|(name, content)| {
            (
                (*name).to_string(),
                serde_json::json!({ "filename": name, "content": content }),
            )
        })
        .collect();
    serde_json::json!({
        "id": gist_id,
        "html_url": format!("https://gist.github.com/{gist_id}"),
        "public": true,
        "owner": { "login": TEST_USER },
        "files": files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_should_create_harness() {
        let h = TestHarness::new().await;
        assert!(h.stdout().is_empty());
        assert!(h.stderr().is_empty());
        assert!(h.cached().is_empty());
        assert!(h.work_dir().is_dir());
    }

    #[tokio::test]
    async fn test_should_seed_cache_in_temp_dir() {
        let h = TestHarness::new().await;
        h.seed_cache("abc123", &["notes.md"]);
        assert!(h.cache().path().starts_with(h.dir.path()));
        assert_eq!(h.cached().find_id_by_filename("notes.md"), Some("abc123"));
    }

    #[tokio::test]
    async fn test_should_route_requests_to_mock_server() {
        let h = TestHarness::new().await;
        mock_rest_get(&h.server, "/gists/abc123", 200, gist_json("abc123", &[])).await;

        let gist = h.factory.api_client().unwrap().fetch("abc123").await.unwrap();
        assert_eq!(gist.id, "abc123");
        assert_eq!(h.request_count().await, 1);
    }
}
