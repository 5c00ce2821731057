//! GitHub Gist REST client for gistmate.

pub mod client;
pub mod errors;
pub mod http;
pub mod queries;

pub use client::Client;
pub use errors::ApiError;
