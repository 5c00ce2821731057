//! `gistmate update` command.

use anyhow::{Context, Result};
use clap::Args;
use gistmate_core::ios_println;

use super::shared::{basename, cached_id, copy_url, read_local};

/// Upload a new version of a tracked file.
#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// File to upload.
    #[arg(value_name = "FILE")]
    file: String,
}

impl UpdateArgs {
    /// Run the update command.
    ///
    /// # Errors
    ///
    /// Returns an error without credentials, if the file is not tracked, or
    /// if the gist cannot be updated.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let client = factory.authed_api_client().await?;
        let name = basename(&self.file)?;
        let gist_id = cached_id(&factory.cache_store()?, &name)?;

        let content = read_local(&self.file).await?;
        client
            .update(&gist_id, &name, &content)
            .await
            .with_context(|| format!("failed to update gist '{gist_id}'"))?;

        copy_url(factory, &factory.gist_url(&gist_id)?);
        ios_println!(factory.io, "'{gist_id}' Updated.");
        Ok(())
    }
}
