//! `gistmate pick` command.

use anyhow::{Context, Result};
use clap::Args;
use gistmate_api::queries::gist::GistSummary;
use gistmate_core::cmdutil::FlagError;
use gistmate_core::ios_eprintln;

use super::shared::fetch_to_work_dir;

/// Choose one of your gists from a list and download it.
#[derive(Debug, Args)]
pub struct PickArgs {
    /// Open the downloaded files in the editor.
    #[arg(short, long)]
    edit: bool,
}

impl PickArgs {
    /// Run the pick command.
    ///
    /// # Errors
    ///
    /// Returns an error without credentials, when not interactive, or if
    /// the selected gist cannot be downloaded.
    pub async fn run(&self, factory: &crate::factory::Factory) -> Result<()> {
        let client = factory.authed_api_client().await?;
        if !factory.io.can_prompt() {
            return Err(FlagError(
                "`gistmate pick` needs a terminal; use `gistmate list` and `gistmate get <id>`"
                    .to_string(),
            )
            .into());
        }

        let login = client
            .current_login()
            .await
            .context("failed to look up the authenticated user")?;
        let gists = client
            .list_for_user(&login)
            .await
            .with_context(|| format!("failed to list gists for {login}"))?;
        if gists.is_empty() {
            ios_eprintln!(factory.io, "{login} has no gists");
            return Ok(());
        }

        let lines: Vec<String> = gists.iter().map(GistSummary::to_line).collect();
        let index = factory
            .prompter()
            .select("Pick a gist to get", None, &lines)?;
        let gist = gists
            .get(index)
            .ok_or_else(|| anyhow::anyhow!("selection {index} is out of range"))?;

        fetch_to_work_dir(factory, &gist.id, self.edit).await
    }
}
