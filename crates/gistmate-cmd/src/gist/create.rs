//! `gistmate create` command.

use anyhow::{Context, Result};
use clap::Args;
use gistmate_core::ios_println;

use super::shared::{basename, cache_updated, copy_url, ensure_untracked, read_local};

/// Create a gist from a local file.
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// File to upload (or `-` for stdin).
    #[arg(value_name = "FILE")]
    file: String,

    /// Filename to use when reading from stdin.
    #[arg(short, long, default_value = "gistfile.txt")]
    filename: String,

    /// Create a secret gist.
    #[arg(short, long)]
    private: bool,
}

impl CreateArgs {
    /// Run the create command.
    ///
    /// # Errors
    ///
    /// Returns an error without credentials, if the file is already tracked,
    /// or if the gist cannot be created.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let client = factory.authed_api_client().await?;
        let from_stdin = self.file == "-";
        let name = if from_stdin {
            basename(&self.filename)?
        } else {
            basename(&self.file)?
        };

        let store = factory.cache_store()?;
        ensure_untracked(&store, &name)?;

        let content = if from_stdin {
            factory
                .io
                .read_stdin()
                .context("failed to read from stdin")?
        } else {
            read_local(&self.file).await?
        };

        let gist = client
            .create(&name, &content, !self.private)
            .await
            .with_context(|| format!("failed to create gist for {name}"))?;
        cache_updated(store.put(&gist.id, [name.as_str()]), &store, &gist.id)?;

        copy_url(factory, &factory.gist_url(&gist.id)?);
        ios_println!(factory.io, "'{}' Created.", gist.id);
        Ok(())
    }
}
