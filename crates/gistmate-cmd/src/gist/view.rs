//! `gistmate view` command.

use anyhow::Result;
use clap::Args;
use gistmate_core::ios_println;

use super::shared::{basename, cached_id, copy_url};

/// Open a tracked file's gist in the browser and copy its URL.
#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Tracked file.
    #[arg(value_name = "FILE")]
    file: String,
}

impl ViewArgs {
    /// Run the view command.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is not tracked or the browser fails.
    pub fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let name = basename(&self.file)?;
        let gist_id = cached_id(&factory.cache_store()?, &name)?;
        let url = factory.gist_url(&gist_id)?;

        factory.environment().open_url(&url)?;
        ios_println!(factory.io, "{url}");
        copy_url(factory, &url);
        Ok(())
    }
}
