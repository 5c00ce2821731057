//! `gistmate config set` command.

use anyhow::Result;
use clap::Args;

use crate::factory::Factory;

/// Update configuration with a value for the given key.
#[derive(Debug, Args)]
pub struct SetArgs {
    /// The configuration key to set.
    key: String,
    /// The value to set.
    value: String,
}

impl SetArgs {
    /// Run the config set command.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the config cannot be saved.
    pub fn run(&self, factory: &Factory) -> Result<()> {
        let mut cfg = factory.config()?;
        cfg.set(&self.key, &self.value)?;
        cfg.write()
    }
}
