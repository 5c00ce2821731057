//! Gist resource types and request payloads.
//!
//! The API returns `files` as a JSON object keyed by filename. These types
//! decode it into a `Vec` so the server's ordering survives.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// A gist as returned by `GET gists/{id}` and the mutation endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct GistRecord {
    /// Server-assigned identifier.
    pub id: String,
    /// Files in server order.
    #[serde(default, deserialize_with = "ordered_files")]
    pub files: Vec<GistFile>,
    /// Owner; anonymous gists have none.
    #[serde(default)]
    pub owner: Option<Owner>,
    /// Whether the gist is public.
    #[serde(default)]
    pub public: bool,
    /// Web page of the gist.
    #[serde(default)]
    pub html_url: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

impl GistRecord {
    /// Filenames in server order.
    pub fn filenames(&self) -> Vec<String> {
        self.files.iter().map(|f| f.filename.clone()).collect()
    }

    /// Owner login, if any.
    pub fn owner_login(&self) -> Option<&str> {
        self.owner.as_ref().map(|o| o.login.as_str())
    }
}

/// One file of a gist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GistFile {
    /// Name as stored on the server.
    pub filename: String,
    /// File content; empty when the endpoint omits it.
    pub content: String,
    /// Set by the server when `content` was cut short.
    pub truncated: bool,
}

/// Gist owner.
#[derive(Debug, Clone, Deserialize)]
pub struct Owner {
    /// Login name.
    pub login: String,
}

/// One entry from `GET users/{login}/gists`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GistSummary {
    /// Gist identifier.
    pub id: String,
    /// Filenames in server order.
    #[serde(default, deserialize_with = "ordered_filenames")]
    pub files: Vec<String>,
}

impl GistSummary {
    /// The `id,file1,file2` line printed by `list`.
    pub fn to_line(&self) -> String {
        std::iter::once(self.id.as_str())
            .chain(self.files.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Body for `POST gists` and `PATCH gists/{id}`.
#[derive(Debug, Serialize)]
pub struct GistPayload<'a> {
    files: BTreeMap<&'a str, FileContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    public: Option<bool>,
}

#[derive(Debug, Serialize)]
struct FileContent<'a> {
    content: &'a str,
}

impl<'a> GistPayload<'a> {
    /// Payload creating a single-file gist.
    pub fn create(filename: &'a str, content: &'a str, public: bool) -> Self {
        Self {
            files: BTreeMap::from([(filename, FileContent { content })]),
            public: Some(public),
        }
    }

    /// Payload replacing or adding one file of an existing gist.
    pub fn edit(filename: &'a str, content: &'a str) -> Self {
        Self {
            files: BTreeMap::from([(filename, FileContent { content })]),
            public: None,
        }
    }
}

#[derive(Deserialize)]
struct FileBody {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    truncated: bool,
}

fn ordered_files<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<GistFile>, D::Error> {
    struct FilesVisitor;

    impl<'de> Visitor<'de> for FilesVisitor {
        type Value = Vec<GistFile>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of filename to file object")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut files = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((filename, body)) = map.next_entry::<String, Option<FileBody>>()? {
                let body = body.unwrap_or(FileBody {
                    content: None,
                    truncated: false,
                });
                files.push(GistFile {
                    filename,
                    content: body.content.unwrap_or_default(),
                    truncated: body.truncated,
                });
            }
            Ok(files)
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(FilesVisitor)
}

fn ordered_filenames<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    struct NamesVisitor;

    impl<'de> Visitor<'de> for NamesVisitor {
        type Value = Vec<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map keyed by filename")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut names = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((name, IgnoredAny)) = map.next_entry::<String, IgnoredAny>()? {
                names.push(name);
            }
            Ok(names)
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(NamesVisitor)
}
