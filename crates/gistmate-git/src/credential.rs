//! Credential source backed by the global git config.
//!
//! Reads `github.user` and `github.password` once, up front, so the
//! synchronous resolver can consult them without spawning git.

use gistmate_core::credential::{CredentialField, CredentialSource};
use tracing::debug;

use crate::client::GitClient;

/// Snapshot of the GitHub keys in the global git config.
#[derive(Default, Clone)]
pub struct GitConfigSource {
    user: Option<String>,
    secret: Option<String>,
}

impl std::fmt::Debug for GitConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitConfigSource")
            .field("user", &self.user)
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl GitConfigSource {
    /// Read both keys with the given client.
    ///
    /// Failures reading a key are logged and treated as unset.
    pub async fn load(client: &GitClient) -> Self {
        Self {
            user: read_key(client, CredentialField::User).await,
            secret: read_key(client, CredentialField::Secret).await,
        }
    }

    /// Read both keys with the system git. Without git the source is empty.
    pub async fn load_system() -> Self {
        match GitClient::new() {
            Ok(client) => Self::load(&client).await,
            Err(e) => {
                debug!(error = %e, "skipping git config credentials");
                Self::default()
            }
        }
    }
}

async fn read_key(client: &GitClient, field: CredentialField) -> Option<String> {
    match client.config_get_global(field.git_config_key()).await {
        Ok(value) => value,
        Err(e) => {
            debug!(key = field.git_config_key(), error = %e, "git config lookup failed");
            None
        }
    }
}

impl CredentialSource for GitConfigSource {
    fn name(&self) -> &str {
        "git config"
    }

    fn lookup(&self, field: CredentialField) -> Option<String> {
        match field {
            CredentialField::User => self.user.clone(),
            CredentialField::Secret => self.secret.clone(),
        }
    }
}
