//! Git command wrapper and git-config credential source for gistmate.

pub mod client;
pub mod credential;
pub mod errors;

pub use client::GitClient;
pub use credential::GitConfigSource;
