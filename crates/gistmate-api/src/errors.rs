//! API error types.

/// Error from a gist API call.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The server answered with a status of 300 or above.
    #[error("HTTP {status}: {}", remote_message(.body))]
    Remote {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The operation needs credentials and none were configured.
    #[error(
        "authentication required: set github.user and github.password in your global git config, \
         or export GITHUB_USER and GITHUB_PASSWORD"
    )]
    AuthRequired,

    /// Network/transport error.
    #[error(transparent)]
    Network(#[from] reqwest::Error),

    /// A success response whose body is not the expected JSON.
    #[error("failed to parse API response: {0}")]
    Protocol(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status of a remote error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this is a 404 Not Found error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// GitHub error bodies carry a `message` and, for validation failures, an
/// `errors` list naming the offending fields. Falls back to the raw body.
fn remote_message(body: &str) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        message: String,
        #[serde(default)]
        errors: Vec<serde_json::Value>,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(e) if e.errors.is_empty() => e.message,
        Ok(e) => {
            let details: Vec<String> = e.errors.iter().map(serde_json::Value::to_string).collect();
            format!("{} ({})", e.message, details.join(", "))
        }
        Err(_) => body.trim().to_string(),
    }
}
