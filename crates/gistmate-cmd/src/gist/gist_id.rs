//! Gist id extraction from user input.
//!
//! Accepts a bare id, a gist web URL, or any text ending in a numeric id.

use std::sync::LazyLock;

use gistmate_core::cmdutil::FlagError;
use regex::Regex;

static TRAILING_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\D*$").expect("TRAILING_DIGITS is a valid regex"));

/// Extract a gist id from an id, a URL, or free text.
///
/// The last path segment wins when it is alphanumeric. Otherwise the last run
/// of digits in the input is used.
///
/// # Errors
///
/// Returns [`FlagError`] if no id can be found.
pub fn parse_gist_id(input: &str) -> Result<String, FlagError> {
    let input = input.trim();
    let segment = last_segment(input);
    if !segment.is_empty() && segment.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Ok(segment);
    }
    TRAILING_DIGITS
        .captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| FlagError(format!("invalid gist id or URL: {input:?}")))
}

/// Last non-empty path segment. Query and fragment are ignored for URLs.
fn last_segment(input: &str) -> String {
    if let Ok(url) = url::Url::parse(input)
        && url.has_host()
    {
        return url
            .path_segments()
            .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
            .unwrap_or_default()
            .to_string();
    }
    input
        .split('/')
        .rfind(|s| !s.is_empty())
        .unwrap_or_default()
        .to_string()
}
