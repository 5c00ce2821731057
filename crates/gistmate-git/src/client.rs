//! Git client that wraps the git command-line tool.

use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;
use tracing::instrument;

use crate::errors::GitError;

/// Client for executing git commands.
#[derive(Debug, Clone)]
pub struct GitClient {
    /// Path to the git binary.
    git_path: PathBuf,
    /// Extra environment for every git invocation.
    envs: Vec<(String, String)>,
}

impl GitClient {
    /// Create a new git client using the system git.
    ///
    /// # Errors
    ///
    /// Returns an error if git is not found in PATH.
    pub fn new() -> Result<Self, GitError> {
        let git_path = which::which("git").map_err(|_| GitError::NotFound)?;
        Ok(Self::with_git_path(git_path))
    }

    /// Create a client for a specific git binary.
    pub fn with_git_path(git_path: impl Into<PathBuf>) -> Self {
        Self {
            git_path: git_path.into(),
            envs: Vec::new(),
        }
    }

    /// Set an environment variable for git subprocesses.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Execute a git command and return trimmed stdout.
    #[instrument(skip(self), fields(args = ?args))]
    async fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let mut cmd = Command::new(&self.git_path);
        cmd.args(args);
        cmd.envs(self.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let output = cmd.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let command = args.first().copied().unwrap_or("").to_string();
            return Err(GitError::CommandFailed {
                command,
                message: stderr.trim().to_string(),
                exit_code: output.status.code(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Read a key from the global git config.
    ///
    /// Returns `None` when the key is unset.
    ///
    /// # Errors
    ///
    /// Returns an error if git cannot run or the config is unreadable.
    pub async fn config_get_global(&self, key: &str) -> Result<Option<String>, GitError> {
        match self.run(&["config", "--global", "--get", key]).await {
            Ok(output) => Ok(Some(first_line(&output).to_string())),
            Err(GitError::CommandFailed {
                exit_code: Some(1), ..
            }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// First line of command output.
fn first_line(output: &str) -> &str {
    output.lines().next().unwrap_or("")
}
