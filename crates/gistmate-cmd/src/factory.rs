//! Factory for shared command dependencies.
//!
//! Provides lazy initialization of configuration, API clients, the host
//! environment, and the prompter. Supports test mode with dependency
//! injection for isolated testing.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use anyhow::Context;
use gistmate_api::client::Client;
use gistmate_api::http::{HttpClientOptions, build_client};
use gistmate_core::cache::CacheStore;
use gistmate_core::cmdutil::NoAuthError;
use gistmate_core::config::{Config, FileConfig};
use gistmate_core::credential::{
    Credential, CredentialField, CredentialResolver, EnvSource, ResolvedCredentials, StaticSource,
};
use gistmate_core::environment::{Environment, StubEnvironment, SystemEnvironment};
use gistmate_core::iostreams::{IOStreams, TestOutput};
use gistmate_core::prompter::{DialoguerPrompter, Prompter, StubPrompter};
use gistmate_git::GitConfigSource;
use tracing::debug;

/// Shared factory providing lazily-initialized dependencies to all commands.
///
/// In production mode, dependencies are created from the real system.
/// In test mode, dependencies can be injected for isolated testing.
pub struct Factory {
    /// Application version.
    pub app_version: String,
    /// I/O streams.
    pub io: IOStreams,
    /// Configuration (lazily loaded).
    config: OnceLock<Mutex<Box<dyn Config>>>,

    // Test overrides
    http_override: Option<reqwest::Client>,
    api_url_override: Option<String>,
    credentials_override: Option<CredentialResolver>,
    work_dir_override: Option<PathBuf>,
    environment_stub: Option<Arc<StubEnvironment>>,
    prompter_stub: Option<Arc<StubPrompter>>,
}

impl std::fmt::Debug for Factory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factory")
            .field("app_version", &self.app_version)
            .finish_non_exhaustive()
    }
}

impl Factory {
    /// Create a new factory with the given version.
    pub fn new(app_version: String) -> Self {
        let mut io = IOStreams::system();

        if std::env::var("GISTMATE_PROMPT_DISABLED").is_ok() {
            io.set_never_prompt(true);
        }

        Self::with_io(app_version, io)
    }

    /// Create a test factory with captured I/O.
    ///
    /// Returns the factory and a `TestOutput` for reading captured
    /// stdout/stderr.
    pub fn test() -> (Self, TestOutput) {
        let (io, output) = IOStreams::test_with_output();
        (Self::with_io("test".to_string(), io), output)
    }

    fn with_io(app_version: String, io: IOStreams) -> Self {
        Self {
            app_version,
            io,
            config: OnceLock::new(),
            http_override: None,
            api_url_override: None,
            credentials_override: None,
            work_dir_override: None,
            environment_stub: None,
            prompter_stub: None,
        }
    }

    /// Set a custom reqwest HTTP client (e.g., backed by wiremock).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_override = Some(client);
        self
    }

    /// Send API requests to this base URL instead of the configured one.
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url_override = Some(url.into());
        self
    }

    /// Use fixed credentials instead of git config and the environment.
    #[must_use]
    pub fn with_credentials(mut self, user: &str, secret: &str) -> Self {
        self.credentials_override = Some(
            CredentialResolver::new().with_source(
                StaticSource::new("test")
                    .with(CredentialField::User, user)
                    .with(CredentialField::Secret, secret),
            ),
        );
        self
    }

    /// Behave as if no credentials are configured anywhere.
    #[must_use]
    pub fn without_credentials(mut self) -> Self {
        self.credentials_override = Some(CredentialResolver::new());
        self
    }

    /// Write fetched files here instead of the current directory.
    #[must_use]
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir_override = Some(dir.into());
        self
    }

    /// Set a config override for testing.
    #[must_use]
    pub fn with_config(self, config: Box<dyn Config>) -> Self {
        let _ = self.config.set(Mutex::new(config));
        self
    }

    /// Set a stub environment and return the shared reference for verification.
    pub fn with_stub_environment(mut self, stub: StubEnvironment) -> (Self, Arc<StubEnvironment>) {
        let stub = Arc::new(stub);
        self.environment_stub = Some(stub.clone());
        (self, stub)
    }

    /// Set a stub prompter and return the shared reference for configuration.
    pub fn with_stub_prompter(mut self) -> (Self, Arc<StubPrompter>) {
        let stub = Arc::new(StubPrompter::default());
        self.prompter_stub = Some(stub.clone());
        (self, stub)
    }

    /// Get the configuration, loading it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if config cannot be loaded.
    pub fn config(&self) -> anyhow::Result<MutexGuard<'_, Box<dyn Config>>> {
        if self.config.get().is_none() {
            let cfg = FileConfig::load()?;
            let boxed: Box<dyn Config> = Box::new(cfg);
            // Ignore set error - another thread may have set it first
            let _ = self.config.set(Mutex::new(boxed));
        }
        let cfg = self
            .config
            .get()
            .ok_or_else(|| anyhow::anyhow!("failed to initialize config"))?;
        Ok(cfg.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Create the host environment.
    ///
    /// In test mode with a stub environment, returns the stub.
    pub fn environment(&self) -> Box<dyn Environment> {
        if let Some(ref stub) = self.environment_stub {
            return Box::new(StubEnvironmentWrapper(stub.clone()));
        }
        match self.config() {
            Ok(cfg) => Box::new(SystemEnvironment::from_config(&**cfg)),
            Err(e) => {
                debug!(error = %e, "using default environment settings");
                Box::new(SystemEnvironment::default())
            }
        }
    }

    /// Create a prompter instance.
    ///
    /// In test mode with a stub prompter, returns the stub.
    pub fn prompter(&self) -> Box<dyn Prompter> {
        if let Some(ref stub) = self.prompter_stub {
            return Box::new(StubPrompterWrapper(stub.clone()));
        }
        Box::new(DialoguerPrompter)
    }

    /// The gist cache selected by configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if config cannot be loaded.
    pub fn cache_store(&self) -> anyhow::Result<CacheStore> {
        Ok(CacheStore::new(self.config()?.cache_file()))
    }

    /// Directory fetched gist files are written to.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory is unavailable.
    pub fn work_dir(&self) -> anyhow::Result<PathBuf> {
        if let Some(ref dir) = self.work_dir_override {
            return Ok(dir.clone());
        }
        std::env::current_dir().context("failed to determine the current directory")
    }

    /// Web page URL of a gist.
    ///
    /// # Errors
    ///
    /// Returns an error if config cannot be loaded.
    pub fn gist_url(&self, gist_id: &str) -> anyhow::Result<String> {
        Ok(format!("{}/{gist_id}", self.config()?.web_url()))
    }

    /// Resolve credentials from git config, then the environment.
    pub async fn resolve_credentials(&self) -> ResolvedCredentials {
        if let Some(ref resolver) = self.credentials_override {
            return resolver.resolve();
        }
        CredentialResolver::new()
            .with_source(GitConfigSource::load_system().await)
            .with_source(EnvSource)
            .resolve()
    }

    /// Resolve a complete credential.
    ///
    /// # Errors
    ///
    /// Returns [`NoAuthError`] if either the user or the secret is missing.
    pub async fn require_credential(&self) -> anyhow::Result<Credential> {
        self.resolve_credentials()
            .await
            .into_credential()
            .ok_or_else(|| NoAuthError.into())
    }

    /// Build an API client without credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be built.
    pub fn api_client(&self) -> anyhow::Result<Client> {
        self.build_api_client(None)
    }

    /// Build an API client carrying the resolved credential.
    ///
    /// # Errors
    ///
    /// Returns [`NoAuthError`] without credentials, or an error if the
    /// client cannot be built.
    pub async fn authed_api_client(&self) -> anyhow::Result<Client> {
        let credential = self.require_credential().await?;
        self.build_api_client(Some(credential))
    }

    fn build_api_client(&self, credential: Option<Credential>) -> anyhow::Result<Client> {
        let http = if let Some(ref client) = self.http_override {
            client.clone()
        } else {
            build_client(&HttpClientOptions {
                app_version: self.app_version.clone(),
            })
            .context("failed to build HTTP client")?
        };

        let base_url = match self.api_url_override {
            Some(ref url) => url.clone(),
            None => self.config()?.api_url(),
        };
        Ok(Client::new(http, &base_url, credential))
    }
}

/// Wrapper to use `Arc<StubEnvironment>` as `Box<dyn Environment>`.
#[derive(Debug)]
struct StubEnvironmentWrapper(Arc<StubEnvironment>);

impl Environment for StubEnvironmentWrapper {
    fn open_url(&self, url: &str) -> anyhow::Result<()> {
        self.0.open_url(url)
    }

    fn copy_to_clipboard(&self, text: &str) -> anyhow::Result<()> {
        self.0.copy_to_clipboard(text)
    }

    fn open_editor(&self, paths: &[PathBuf]) -> anyhow::Result<()> {
        self.0.open_editor(paths)
    }
}

/// Wrapper to use `Arc<StubPrompter>` as `Box<dyn Prompter>`.
#[derive(Debug)]
struct StubPrompterWrapper(Arc<StubPrompter>);

impl Prompter for StubPrompterWrapper {
    fn select(
        &self,
        prompt: &str,
        default: Option<usize>,
        options: &[String],
    ) -> anyhow::Result<usize> {
        self.0.select(prompt, default, options)
    }
}
