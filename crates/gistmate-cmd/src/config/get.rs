//! `gistmate config get` command.

use anyhow::Result;
use clap::Args;
use gistmate_core::config::validate_key;
use gistmate_core::ios_println;

use crate::factory::Factory;

/// Print the value of a given configuration key.
#[derive(Debug, Args)]
pub struct GetArgs {
    /// The configuration key to read.
    key: String,
}

impl GetArgs {
    /// Run the config get command.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown.
    pub fn run(&self, factory: &Factory) -> Result<()> {
        validate_key(&self.key)?;
        let value = factory.config()?.get_or_default(&self.key);
        if !value.is_empty() {
            ios_println!(factory.io, "{value}");
        }
        Ok(())
    }
}
