//! Command implementations for gistmate.
//!
//! [`gist`] holds the gist actions and [`config`] the configuration
//! commands. Both run against a shared [`factory::Factory`].

pub mod config;
pub mod factory;
pub mod gist;

#[cfg(test)]
pub mod test_helpers;
