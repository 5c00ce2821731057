//! `gistmate show` command.

use anyhow::{Context, Result};
use clap::Args;
use gistmate_core::ios_println;

use super::gist_id::parse_gist_id;

/// Print the files of a gist.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Gist ID or URL.
    #[arg(value_name = "ID | URL")]
    gist: String,

    /// Only print this file.
    #[arg(short, long)]
    filename: Option<String>,
}

impl ShowArgs {
    /// Run the show command.
    ///
    /// # Errors
    ///
    /// Returns an error if the gist cannot be fetched or has no such file.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let gist_id = parse_gist_id(&self.gist)?;
        let gist = factory
            .api_client()?
            .fetch(&gist_id)
            .await
            .with_context(|| format!("failed to fetch gist '{gist_id}'"))?;

        let files: Vec<_> = gist
            .files
            .iter()
            .filter(|f| self.filename.as_ref().is_none_or(|name| &f.filename == name))
            .collect();
        if let Some(ref name) = self.filename
            && files.is_empty()
        {
            anyhow::bail!("gist '{gist_id}' has no file named {name}");
        }

        let ios = &factory.io;
        let cs = ios.color_scheme();
        if self.filename.is_none()
            && let Some(description) = gist.description.as_deref().filter(|d| !d.is_empty())
        {
            ios_println!(ios, "{}", cs.bold(description));
            ios_println!(ios);
        }
        for file in files {
            ios_println!(ios, "{}", cs.cyan(&file.filename));
            ios_println!(ios);
            ios_println!(ios, "{}", file.content.trim_end_matches('\n'));
            ios_println!(ios);
        }
        Ok(())
    }
}
