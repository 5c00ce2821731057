//! Command outcome types.
//!
//! Commands return these inside `anyhow::Error`; the binary downcasts them to
//! pick an exit code.

/// Error indicating user cancelled an operation.
#[derive(Debug, thiserror::Error)]
#[error("user cancelled")]
pub struct CancelError;

/// Error indicating a flag or argument issue.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct FlagError(pub String);

/// No credentials could be found - triggers exit 4.
#[derive(Debug, thiserror::Error)]
#[error(
    "no GitHub credentials found\n\
     Set them in your global git config:\n  \
     git config --global github.user <login>\n  \
     git config --global github.password <token>\n\
     or export GITHUB_USER and GITHUB_PASSWORD"
)]
pub struct NoAuthError;

/// The file is already tracked by a gist.
#[derive(Debug, thiserror::Error)]
#[error("'{file}' already exists in gist '{gist_id}'; use `gistmate update {file}` instead")]
pub struct AlreadyExistsError {
    /// Local filename.
    pub file: String,
    /// Gist already tracking it.
    pub gist_id: String,
}

/// The file is not tracked by any cached gist.
#[derive(Debug, thiserror::Error)]
#[error("'{0}' is not in the gist cache; run `gistmate get <id>` or `gistmate create {0}` first")]
pub struct UnknownGistError(pub String);

/// Check if an error represents a user cancellation.
pub fn is_user_cancellation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<CancelError>().is_some()
}
