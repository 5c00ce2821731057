//! Gist API client.
//!
//! Each method is one HTTP round trip. There are no retries and listing reads
//! a single page of 100 gists.

use gistmate_core::credential::Credential;
use reqwest::Method;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::ApiError;
use crate::queries::gist::{GistPayload, GistRecord, GistSummary};
use crate::queries::user::User;

/// Page size used by `list_for_user`.
pub const LIST_PAGE_SIZE: u32 = 100;

/// GitHub gist client wrapping reqwest with Basic auth and error mapping.
///
/// The credential secret never appears in `Debug` output.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    credential: Option<Credential>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("user", &self.credential.as_ref().map(|c| c.user.as_str()))
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client for a REST base URL such as `https://api.github.com/`.
    pub fn new(http: reqwest::Client, base_url: &str, credential: Option<Credential>) -> Self {
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        Self {
            http,
            base_url,
            credential,
        }
    }

    /// The REST base URL, with trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a credential is configured.
    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Fetch a gist.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Remote`] for a missing gist, or a transport or
    /// decoding error.
    pub async fn fetch(&self, gist_id: &str) -> Result<GistRecord, ApiError> {
        let text = self.fetch_raw(gist_id).await?;
        decode(&text)
    }

    /// Fetch a gist and return the JSON body as received.
    ///
    /// # Errors
    ///
    /// Returns an error on non-success status, transport failure, or a body
    /// that is not JSON.
    pub async fn fetch_raw(&self, gist_id: &str) -> Result<String, ApiError> {
        let path = format!("gists/{}", urlencoding::encode(gist_id));
        let text = Self::send(self.request(Method::GET, &path)).await?;
        serde_json::from_str::<serde::de::IgnoredAny>(&text)?;
        Ok(text)
    }

    /// Create a single-file gist.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AuthRequired`] without a credential, or the
    /// request's failure.
    pub async fn create(
        &self,
        filename: &str,
        content: &str,
        public: bool,
    ) -> Result<GistRecord, ApiError> {
        let payload = GistPayload::create(filename, content, public);
        let req = self.authed_request(Method::POST, "gists")?.json(&payload);
        decode(&Self::send(req).await?)
    }

    /// Replace the content of one file in a gist.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AuthRequired`] without a credential, or the
    /// request's failure.
    pub async fn update(
        &self,
        gist_id: &str,
        filename: &str,
        content: &str,
    ) -> Result<GistRecord, ApiError> {
        self.edit(gist_id, filename, content).await
    }

    /// Add a new file to an existing gist.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AuthRequired`] without a credential, or the
    /// request's failure.
    pub async fn add_file(
        &self,
        gist_id: &str,
        filename: &str,
        content: &str,
    ) -> Result<GistRecord, ApiError> {
        self.edit(gist_id, filename, content).await
    }

    /// List up to [`LIST_PAGE_SIZE`] gists of a user, in server order.
    ///
    /// # Errors
    ///
    /// Returns an error on non-success status, transport failure, or an
    /// unexpected body.
    pub async fn list_for_user(&self, login: &str) -> Result<Vec<GistSummary>, ApiError> {
        let path = format!(
            "users/{}/gists?per_page={LIST_PAGE_SIZE}",
            urlencoding::encode(login)
        );
        decode(&Self::send(self.request(Method::GET, &path)).await?)
    }

    /// Login of the authenticated user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AuthRequired`] without a credential, or the
    /// request's failure.
    pub async fn current_login(&self) -> Result<String, ApiError> {
        let user: User = decode(&Self::send(self.authed_request(Method::GET, "user")?).await?)?;
        Ok(user.login)
    }

    async fn edit(
        &self,
        gist_id: &str,
        filename: &str,
        content: &str,
    ) -> Result<GistRecord, ApiError> {
        let path = format!("gists/{}", urlencoding::encode(gist_id));
        let payload = GistPayload::edit(filename, content);
        let req = self.authed_request(Method::PATCH, &path)?.json(&payload);
        decode(&Self::send(req).await?)
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path.trim_start_matches('/'));
        debug!(%method, %url, "gist API request");
        self.http.request(method, url)
    }

    fn authed_request(
        &self,
        method: Method,
        path: &str,
    ) -> Result<reqwest::RequestBuilder, ApiError> {
        let credential = self.credential.as_ref().ok_or(ApiError::AuthRequired)?;
        Ok(self
            .request(method, path)
            .basic_auth(&credential.user, Some(credential.secret.expose_secret())))
    }

    async fn send(req: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "gist API response");
        if status.as_u16() >= 300 {
            return Err(ApiError::Remote {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    Ok(serde_json::from_str(text)?)
}
