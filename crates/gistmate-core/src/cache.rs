//! Local gist cache.
//!
//! Maps gist ids to the local filenames they contain so that commands can be
//! keyed by filename instead of by id. On disk the cache is a YAML block
//! mapping of `gist_id: file1,file2` lines, usually at `~/.gists`.
//!
//! The cache is never reconciled against the server. Stale entries stay until
//! the file is edited by hand.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::errors::CacheError;

/// Default cache file name, relative to the home directory.
pub const CACHE_FILE_NAME: &str = ".gists";

/// Separator between filenames in a persisted entry.
///
/// Filenames that themselves contain a comma cannot be cached.
const FILENAME_SEPARATOR: char = ',';

/// Default cache file location (`~/.gists`).
pub fn default_cache_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CACHE_FILE_NAME)
}

/// A single cached gist: its id and the local filenames belonging to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Server-assigned gist id.
    pub gist_id: String,
    /// Filenames in the order they were recorded.
    pub filenames: Vec<String>,
}

/// Ordered in-memory gist mapping.
///
/// Entries keep their insertion order. Replacing an entry keeps its position,
/// so filename resolution depends only on the write history of the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GistMap {
    entries: Vec<CacheEntry>,
}

impl GistMap {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filenames for a gist, replacing any previous list.
    pub fn put<I, S>(&mut self, gist_id: &str, filenames: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let filenames: Vec<String> = filenames.into_iter().map(Into::into).collect();
        match self.entry_mut(gist_id) {
            Some(entry) => entry.filenames = filenames,
            None => self.entries.push(CacheEntry {
                gist_id: gist_id.to_string(),
                filenames,
            }),
        }
    }

    /// Add a filename to an existing entry.
    ///
    /// Adding a filename that is already listed leaves the entry unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::UnknownGist`] if the gist has no entry.
    pub fn append(&mut self, gist_id: &str, filename: &str) -> Result<(), CacheError> {
        let entry = self
            .entry_mut(gist_id)
            .ok_or_else(|| CacheError::UnknownGist(gist_id.to_string()))?;
        if !entry.filenames.iter().any(|f| f == filename) {
            entry.filenames.push(filename.to_string());
        }
        Ok(())
    }

    /// Find the first gist whose filename list contains `filename` exactly.
    pub fn find_id_by_filename(&self, filename: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.filenames.iter().any(|f| f == filename))
            .map(|e| e.gist_id.as_str())
    }

    /// Filenames recorded for a gist.
    pub fn filenames(&self, gist_id: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.gist_id == gist_id)
            .map(|e| e.filenames.as_slice())
    }

    /// Whether the gist has an entry.
    pub fn contains(&self, gist_id: &str) -> bool {
        self.entries.iter().any(|e| e.gist_id == gist_id)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CacheEntry> {
        self.entries.iter()
    }

    /// Number of cached gists.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no gists are cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_mut(&mut self, gist_id: &str) -> Option<&mut CacheEntry> {
        self.entries.iter_mut().find(|e| e.gist_id == gist_id)
    }

    /// Parse the YAML cache layout.
    ///
    /// Integer scalars are accepted for both ids and values so that
    /// hand-edited files with unquoted numeric ids still load. Integers wider
    /// than 128 bits are rejected.
    fn from_yaml(content: &str) -> Result<Self, String> {
        if content.trim().is_empty() {
            return Ok(Self::new());
        }

        let CacheDocument(pairs) = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
        let mut map = Self::new();
        for (gist_id, joined) in pairs {
            let ScalarText(gist_id) = gist_id.ok_or("gist id must not be empty")?;
            let joined = joined.map(|ScalarText(s)| s).unwrap_or_default();
            map.put(&gist_id, split_filenames(&joined));
        }
        Ok(map)
    }

    fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        let mut mapping = Mapping::new();
        for entry in &self.entries {
            mapping.insert(
                Value::String(entry.gist_id.clone()),
                Value::String(join_filenames(&entry.filenames)),
            );
        }
        serde_yaml::to_string(&mapping)
    }
}

impl<'a> IntoIterator for &'a GistMap {
    type Item = &'a CacheEntry;
    type IntoIter = std::slice::Iter<'a, CacheEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// File-backed gist cache.
///
/// Every mutating call reads the whole file, applies the change, and rewrites
/// it. Concurrent processes are not coordinated: the last writer wins.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    /// Create a store for the given cache file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted mapping.
    ///
    /// A missing or empty file yields an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Corrupt`] if the file cannot be parsed and
    /// [`CacheError::ReadFile`] if it cannot be read.
    pub fn load(&self) -> Result<GistMap, CacheError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "gist cache not found, starting empty");
            return Ok(GistMap::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| CacheError::ReadFile {
            path: self.path.display().to_string(),
            source: e,
        })?;

        GistMap::from_yaml(&content).map_err(|message| CacheError::Corrupt {
            path: self.path.display().to_string(),
            message,
        })
    }

    /// Overwrite the backing file with `map`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::WriteFile`] if the file cannot be written.
    pub fn save(&self, map: &GistMap) -> Result<(), CacheError> {
        let write_err = |source: std::io::Error| CacheError::WriteFile {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let yaml = map.to_yaml().map_err(|e| write_err(std::io::Error::other(e)))?;
        fs::write(&self.path, yaml).map_err(write_err)?;
        debug!(path = %self.path.display(), entries = map.len(), "saved gist cache");
        Ok(())
    }

    /// Set the filenames for a gist and persist the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache cannot be loaded or saved.
    pub fn put<I, S>(&self, gist_id: &str, filenames: I) -> Result<(), CacheError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut map = self.load()?;
        map.put(gist_id, filenames);
        self.save(&map)
    }

    /// Add a filename to an existing entry and persist the result.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::UnknownGist`] if the gist has no entry, or an
    /// error if the cache cannot be loaded or saved.
    pub fn append(&self, gist_id: &str, filename: &str) -> Result<(), CacheError> {
        let mut map = self.load()?;
        map.append(gist_id, filename)?;
        self.save(&map)
    }

    /// Resolve a filename to the first gist id that lists it.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache cannot be loaded.
    pub fn find_id_by_filename(&self, filename: &str) -> Result<Option<String>, CacheError> {
        Ok(self.load()?.find_id_by_filename(filename).map(str::to_string))
    }
}

fn split_filenames(joined: &str) -> Vec<String> {
    joined
        .split(FILENAME_SEPARATOR)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn join_filenames(filenames: &[String]) -> String {
    filenames.join(&FILENAME_SEPARATOR.to_string())
}

/// Top-level cache document: ordered `(id, filenames)` pairs.
struct CacheDocument(Vec<(CacheScalar, CacheScalar)>);

impl<'de> Deserialize<'de> for CacheDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DocumentVisitor;

        impl<'de> Visitor<'de> for DocumentVisitor {
            type Value = CacheDocument;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of gist ids to comma-separated filenames")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(CacheDocument(Vec::new()))
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                self.visit_unit()
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(pair) = access.next_entry::<CacheScalar, CacheScalar>()? {
                    pairs.push(pair);
                }
                Ok(CacheDocument(pairs))
            }
        }

        deserializer.deserialize_any(DocumentVisitor)
    }
}

/// A string or integer scalar kept as its text; `None` for null.
type CacheScalar = Option<ScalarText>;

struct ScalarText(String);

impl<'de> Deserialize<'de> for ScalarText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScalarVisitor;

        impl Visitor<'_> for ScalarVisitor {
            type Value = ScalarText;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string or an integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(ScalarText(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(ScalarText(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(ScalarText(v.to_string()))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(ScalarText(v.to_string()))
            }

            fn visit_i128<E: de::Error>(self, v: i128) -> Result<Self::Value, E> {
                Ok(ScalarText(v.to_string()))
            }

            fn visit_u128<E: de::Error>(self, v: u128) -> Result<Self::Value, E> {
                Ok(ScalarText(v.to_string()))
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}
