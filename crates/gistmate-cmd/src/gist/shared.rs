//! Helpers shared by the gist commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gistmate_core::cache::CacheStore;
use gistmate_core::cmdutil::{AlreadyExistsError, FlagError, UnknownGistError};
use gistmate_core::errors::CacheError;
use gistmate_core::{ios_eprintln, ios_println};
use tracing::debug;

use crate::factory::Factory;

/// Final path component of a local file argument.
pub(crate) fn basename(path: &str) -> Result<String> {
    Path::new(path)
        .file_name()
        .and_then(std::ffi::OsStr::to_str)
        .map(str::to_string)
        .ok_or_else(|| FlagError(format!("not a file name: {path:?}")).into())
}

/// Read a local file named on the command line.
pub(crate) async fn read_local(path: &str) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read file: {path}"))
}

/// Gist id tracking `filename`, or [`UnknownGistError`].
pub(crate) fn cached_id(store: &CacheStore, filename: &str) -> Result<String> {
    store
        .find_id_by_filename(filename)?
        .ok_or_else(|| UnknownGistError(filename.to_string()).into())
}

/// Fail with [`AlreadyExistsError`] if `filename` is tracked by a gist.
pub(crate) fn ensure_untracked(store: &CacheStore, filename: &str) -> Result<()> {
    match store.find_id_by_filename(filename)? {
        Some(gist_id) => Err(AlreadyExistsError {
            file: filename.to_string(),
            gist_id,
        }
        .into()),
        None => Ok(()),
    }
}

/// Attach the gist id to a cache write that follows a remote change.
pub(crate) fn cache_updated(
    result: Result<(), CacheError>,
    store: &CacheStore,
    gist_id: &str,
) -> Result<()> {
    result.with_context(|| {
        format!(
            "gist '{gist_id}' was saved on GitHub but {} was not updated; add it by hand",
            store.path().display()
        )
    })
}

/// Copy a gist URL to the clipboard, warning on failure.
pub(crate) fn copy_url(factory: &Factory, url: &str) {
    if let Err(e) = factory.environment().copy_to_clipboard(url) {
        debug!(error = %e, "clipboard copy failed");
        let cs = factory.io.color_scheme();
        ios_eprintln!(
            factory.io,
            "{} could not copy {url} to the clipboard: {e:#}",
            cs.warning_icon()
        );
    }
}

/// Fetch a gist, write its files into the working directory, and cache it.
///
/// Nothing is written when the fetch fails.
pub(crate) async fn fetch_to_work_dir(factory: &Factory, gist_id: &str, edit: bool) -> Result<()> {
    let gist = factory
        .api_client()?
        .fetch(gist_id)
        .await
        .with_context(|| format!("failed to fetch gist '{gist_id}'"))?;
    let store = factory.cache_store()?;
    let work_dir = factory.work_dir()?;
    let ios = &factory.io;
    let cs = ios.color_scheme();

    let mut names = Vec::with_capacity(gist.files.len());
    let mut paths: Vec<PathBuf> = Vec::with_capacity(gist.files.len());
    for file in &gist.files {
        let name = basename(&file.filename)?;
        if file.truncated {
            ios_eprintln!(
                ios,
                "{} {name} is truncated; GitHub only returned part of it",
                cs.warning_icon()
            );
        }
        let path = work_dir.join(&name);
        tokio::fs::write(&path, &file.content)
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;
        names.push(name);
        paths.push(path);
    }

    cache_updated(store.put(&gist.id, names.iter().cloned()), &store, &gist.id)?;

    for name in &names {
        ios_println!(ios, "{name}");
    }
    copy_url(factory, &factory.gist_url(&gist.id)?);

    if edit && !paths.is_empty() {
        factory.environment().open_editor(&paths)?;
    }
    Ok(())
}
