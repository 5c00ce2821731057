//! HTTP client construction.
//!
//! Sets the default headers every gist API request carries.

use reqwest::header::{self, HeaderMap, HeaderValue};
use tracing::debug;

/// Options for constructing an HTTP client.
#[derive(Debug)]
pub struct HttpClientOptions {
    /// Application version for User-Agent.
    pub app_version: String,
}

/// User-Agent header value for a version.
pub fn user_agent(app_version: &str) -> String {
    format!("gistmate/{app_version}")
}

/// Build a reqwest client with default configuration.
///
/// # Errors
///
/// Returns an error if the client cannot be constructed.
pub fn build_client(opts: &HttpClientOptions) -> Result<reqwest::Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    if let Ok(agent) = HeaderValue::from_str(&user_agent(&opts.app_version)) {
        headers.insert(header::USER_AGENT, agent);
    }
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("application/vnd.github+json"),
    );

    debug!(version = %opts.app_version, "building HTTP client");
    reqwest::Client::builder().default_headers(headers).build()
}
