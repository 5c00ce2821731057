//! User-related API types.

use serde::Deserialize;

/// The authenticated user, from `GET user`.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    /// Login name.
    pub login: String,
}
