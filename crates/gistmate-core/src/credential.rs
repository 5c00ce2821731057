//! GitHub credential resolution.
//!
//! A credential is a `(user, secret)` pair used for HTTP Basic auth against
//! the gist API. Each field is looked up independently across an ordered list
//! of [`CredentialSource`]s; the first non-empty value wins.

use std::collections::HashMap;

use secrecy::{ExposeSecret, SecretString};

/// A credential field looked up from the sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CredentialField {
    /// GitHub login.
    User,
    /// Password or personal access token.
    Secret,
}

impl CredentialField {
    /// Git config key holding this field.
    pub fn git_config_key(self) -> &'static str {
        match self {
            Self::User => "github.user",
            Self::Secret => "github.password",
        }
    }

    /// Environment variable holding this field.
    pub fn env_var(self) -> &'static str {
        match self {
            Self::User => "GITHUB_USER",
            Self::Secret => "GITHUB_PASSWORD",
        }
    }
}

/// A place credentials can be read from.
pub trait CredentialSource: Send + Sync + std::fmt::Debug {
    /// Short name used in log output.
    fn name(&self) -> &str;

    /// Look up a field. Empty values are treated as absent by the resolver.
    fn lookup(&self, field: CredentialField) -> Option<String>;
}

/// Reads `GITHUB_USER` and `GITHUB_PASSWORD` from the process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSource;

impl CredentialSource for EnvSource {
    fn name(&self) -> &str {
        "environment"
    }

    fn lookup(&self, field: CredentialField) -> Option<String> {
        std::env::var(field.env_var()).ok()
    }
}

/// Fixed values, for tests and for sources resolved ahead of time.
#[derive(Debug, Default, Clone)]
pub struct StaticSource {
    name: String,
    values: HashMap<CredentialField, String>,
}

impl StaticSource {
    /// Create an empty source with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: HashMap::new(),
        }
    }

    /// Set a field value.
    #[must_use]
    pub fn with(mut self, field: CredentialField, value: impl Into<String>) -> Self {
        self.values.insert(field, value.into());
        self
    }
}

impl CredentialSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookup(&self, field: CredentialField) -> Option<String> {
        self.values.get(&field).cloned()
    }
}

/// A complete credential.
#[derive(Clone)]
pub struct Credential {
    /// GitHub login.
    pub user: String,
    /// Password or token.
    pub secret: SecretString,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("user", &self.user)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Result of a resolution pass. Either field may be missing.
#[derive(Debug, Clone, Default)]
pub struct ResolvedCredentials {
    /// Resolved login, if any.
    pub user: Option<String>,
    /// Resolved secret, if any.
    pub secret: Option<SecretString>,
}

impl ResolvedCredentials {
    /// Whether both fields are present and non-empty.
    pub fn is_complete(&self) -> bool {
        self.user.as_deref().is_some_and(|u| !u.is_empty())
            && self
                .secret
                .as_ref()
                .is_some_and(|s| !s.expose_secret().is_empty())
    }

    /// Convert into a [`Credential`] if both fields are present.
    pub fn into_credential(self) -> Option<Credential> {
        if !self.is_complete() {
            return None;
        }
        Some(Credential {
            user: self.user?,
            secret: self.secret?,
        })
    }
}

/// Ordered chain of credential sources.
#[derive(Debug, Default)]
pub struct CredentialResolver {
    sources: Vec<Box<dyn CredentialSource>>,
}

impl CredentialResolver {
    /// Create a resolver with no sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source. Sources added earlier take precedence.
    #[must_use]
    pub fn with_source(mut self, source: impl CredentialSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Resolve both fields.
    pub fn resolve(&self) -> ResolvedCredentials {
        ResolvedCredentials {
            user: self.lookup(CredentialField::User),
            secret: self.lookup(CredentialField::Secret).map(SecretString::from),
        }
    }

    /// Whether both a user and a secret can be resolved.
    pub fn has_credentials(&self) -> bool {
        self.resolve().is_complete()
    }

    fn lookup(&self, field: CredentialField) -> Option<String> {
        self.sources.iter().find_map(|source| {
            let value = source.lookup(field)?;
            let value = value.trim();
            if value.is_empty() {
                return None;
            }
            tracing::debug!(source = source.name(), ?field, "resolved credential field");
            Some(value.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::test_utils::EnvVarGuard;

    fn git(user: &str, secret: &str) -> StaticSource {
        StaticSource::new("git config")
            .with(CredentialField::User, user)
            .with(CredentialField::Secret, secret)
    }

    fn env(user: &str, secret: &str) -> StaticSource {
        StaticSource::new("env")
            .with(CredentialField::User, user)
            .with(CredentialField::Secret, secret)
    }

    #[test]
    fn test_should_prefer_first_source() {
        let resolver = CredentialResolver::new()
            .with_source(git("gituser", "gitpass"))
            .with_source(env("envuser", "envpass"));
        let creds = resolver.resolve().into_credential().unwrap();
        assert_eq!(creds.user, "gituser");
        assert_eq!(creds.secret.expose_secret(), "gitpass");
    }

    #[test]
    fn test_should_fall_back_per_field() {
        let resolver = CredentialResolver::new()
            .with_source(git("gituser", ""))
            .with_source(env("envuser", "envpass"));
        let creds = resolver.resolve().into_credential().unwrap();
        assert_eq!(creds.user, "gituser");
        assert_eq!(creds.secret.expose_secret(), "envpass");
    }

    #[rstest]
    #[case("", "")]
    #[case("user", "")]
    #[case("", "secret")]
    #[case("   ", "secret")]
    fn test_should_report_missing_credentials(#[case] user: &str, #[case] secret: &str) {
        let resolver = CredentialResolver::new().with_source(git(user, secret));
        assert!(!resolver.has_credentials());
        assert!(resolver.resolve().into_credential().is_none());
    }

    #[test]
    fn test_should_report_credentials_without_sources() {
        let resolver = CredentialResolver::new();
        let resolved = resolver.resolve();
        assert!(resolved.user.is_none());
        assert!(resolved.secret.is_none());
        assert!(!resolver.has_credentials());
    }

    #[test]
    fn test_should_trim_values() {
        let resolver = CredentialResolver::new().with_source(git(" octocat\n", "s3cret\n"));
        let creds = resolver.resolve().into_credential().unwrap();
        assert_eq!(creds.user, "octocat");
        assert_eq!(creds.secret.expose_secret(), "s3cret");
    }

    #[test]
    fn test_should_redact_secret_in_debug() {
        let creds = git("octocat", "hunter2").lookup(CredentialField::Secret).unwrap();
        let credential = Credential {
            user: "octocat".to_string(),
            secret: SecretString::from(creds),
        };
        let debug = format!("{credential:?}");
        assert!(debug.contains("octocat"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_should_read_environment_source() {
        let _guards = [
            EnvVarGuard::set("GITHUB_USER", "envuser"),
            EnvVarGuard::set("GITHUB_PASSWORD", "envpass"),
        ];
        let resolver = CredentialResolver::new().with_source(EnvSource);
        assert!(resolver.has_credentials());
        assert_eq!(resolver.resolve().user.as_deref(), Some("envuser"));
    }

    #[test]
    fn test_should_name_lookup_keys() {
        assert_eq!(CredentialField::User.git_config_key(), "github.user");
        assert_eq!(CredentialField::Secret.git_config_key(), "github.password");
        assert_eq!(CredentialField::User.env_var(), "GITHUB_USER");
        assert_eq!(CredentialField::Secret.env_var(), "GITHUB_PASSWORD");
    }
}
