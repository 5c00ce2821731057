//! `gistmate url` command.

use anyhow::Result;
use clap::Args;
use gistmate_core::ios_println;

use super::shared::{basename, cached_id, copy_url};

/// Print the web URL of a tracked file's gist and copy it.
#[derive(Debug, Args)]
pub struct UrlArgs {
    /// Tracked file.
    #[arg(value_name = "FILE")]
    file: String,
}

impl UrlArgs {
    /// Run the url command.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is not tracked.
    pub fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let name = basename(&self.file)?;
        let gist_id = cached_id(&factory.cache_store()?, &name)?;
        let url = factory.gist_url(&gist_id)?;

        ios_println!(factory.io, "{url}");
        copy_url(factory, &url);
        Ok(())
    }
}
