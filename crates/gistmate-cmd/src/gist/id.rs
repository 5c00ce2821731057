//! `gistmate id` command.

use anyhow::Result;
use clap::Args;
use gistmate_core::ios_println;

use super::shared::{basename, cached_id};

/// Print the cached gist id of a tracked file.
#[derive(Debug, Args)]
pub struct IdArgs {
    /// Tracked file.
    #[arg(value_name = "FILE")]
    file: String,
}

impl IdArgs {
    /// Run the id command.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is not tracked.
    pub fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let name = basename(&self.file)?;
        let gist_id = cached_id(&factory.cache_store()?, &name)?;
        ios_println!(factory.io, "{gist_id}");
        Ok(())
    }
}
