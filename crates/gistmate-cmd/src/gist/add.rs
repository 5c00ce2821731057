//! `gistmate add` command.

use anyhow::{Context, Result};
use clap::Args;
use gistmate_api::client::Client;
use gistmate_api::queries::gist::GistSummary;
use gistmate_core::cmdutil::FlagError;
use gistmate_core::ios_println;

use super::gist_id::parse_gist_id;
use super::shared::{basename, cache_updated, copy_url, ensure_untracked, read_local};
use crate::factory::Factory;

/// Add a local file to an existing gist.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// File to add.
    #[arg(value_name = "FILE")]
    file: String,

    /// Gist ID or URL to add to; prompts with your gists when omitted.
    #[arg(short, long, value_name = "ID | URL")]
    gist: Option<String>,
}

impl AddArgs {
    /// Run the add command.
    ///
    /// # Errors
    ///
    /// Returns an error without credentials, if the file is already tracked,
    /// or if the file cannot be added.
    pub async fn run(&self, factory: &Factory) -> Result<()> {
        let client = factory.authed_api_client().await?;
        let name = basename(&self.file)?;
        let store = factory.cache_store()?;
        ensure_untracked(&store, &name)?;

        let gist_id = match self.gist {
            Some(ref gist) => parse_gist_id(gist)?,
            None => pick_own_gist(factory, &client).await?,
        };

        let content = read_local(&self.file).await?;
        let gist = client
            .add_file(&gist_id, &name, &content)
            .await
            .with_context(|| format!("failed to add {name} to gist '{gist_id}'"))?;

        let mut cache = store.load()?;
        if cache.contains(&gist_id) {
            cache.append(&gist_id, &name)?;
        } else {
            let mut files = gist.filenames();
            if !files.contains(&name) {
                files.push(name.clone());
            }
            cache.put(&gist_id, files);
        }
        cache_updated(store.save(&cache), &store, &gist_id)?;

        copy_url(factory, &factory.gist_url(&gist_id)?);
        ios_println!(factory.io, "'{gist_id}' Added {name}.");
        Ok(())
    }
}

async fn pick_own_gist(factory: &Factory, client: &Client) -> Result<String> {
    if !factory.io.can_prompt() {
        return Err(
            FlagError("--gist is required when not running interactively".to_string()).into(),
        );
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
        return Err(FlagError(format!("{login} has no gists to add to")).into());
    }

    let lines: Vec<String> = gists.iter().map(GistSummary::to_line).collect();
    let index = factory
        .prompter()
        .select("Add to which gist?", None, &lines)?;
    gists
        .into_iter()
        .nth(index)
        .map(|g| g.id)
        .ok_or_else(|| anyhow::anyhow!("selection {index} is out of range"))
}
