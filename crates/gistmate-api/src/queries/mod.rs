//! Request and response types for the gist endpoints.

pub mod gist;
pub mod user;
