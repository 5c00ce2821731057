//! `gistmate config list` command.

use anyhow::Result;
use clap::Args;
use gistmate_core::config::CONFIG_OPTIONS;
use gistmate_core::ios_println;

use crate::factory::Factory;

/// Print a list of configuration keys and values.
#[derive(Debug, Args)]
pub struct ListArgs {}

impl ListArgs {
    /// Run the config list command.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be loaded.
    pub fn run(&self, factory: &Factory) -> Result<()> {
        let cfg = factory.config()?;
        for option in CONFIG_OPTIONS {
            ios_println!(factory.io, "{}={}", option.key, cfg.get_or_default(option.key));
        }
        Ok(())
    }
}
