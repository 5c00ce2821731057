//! `gistmate raw` command.

use anyhow::{Context, Result};
use clap::Args;

use super::gist_id::parse_gist_id;

/// Print the JSON document of a gist as returned by the API.
#[derive(Debug, Args)]
pub struct RawArgs {
    /// Gist ID or URL.
    #[arg(value_name = "ID | URL")]
    gist: String,
}

impl RawArgs {
    /// Run the raw command.
    ///
    /// # Errors
    ///
    /// Returns an error if the gist cannot be fetched.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let gist_id = parse_gist_id(&self.gist)?;
        let body = factory
            .api_client()?
            .fetch_raw(&gist_id)
            .await
            .with_context(|| format!("failed to fetch gist '{gist_id}'"))?;

        factory.io.print_out(&body);
        if !body.ends_with('\n') {
            factory.io.println_out("");
        }
        Ok(())
    }
}
