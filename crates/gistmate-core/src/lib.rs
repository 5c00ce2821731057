//! Core types, traits, and utilities for gistmate.
//!
//! - [`cache`] for the local filename to gist id mapping
//! - [`credential`] for resolving GitHub credentials
//! - [`Config`](config::Config) trait for configuration management
//! - [`IOStreams`] for terminal I/O handling
//! - [`Environment`](environment::Environment) for browser, clipboard, and editor
//! - [`Prompter`](prompter::Prompter) trait for interactive prompts

pub mod cache;
pub mod cmdutil;
pub mod config;
pub mod credential;
pub mod environment;
pub mod errors;
pub mod iostreams;
pub mod prompter;
#[cfg(test)]
pub mod test_utils;

pub use cache::{CacheStore, GistMap};
pub use iostreams::IOStreams;
