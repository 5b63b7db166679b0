//! Route identifiers derived from content filenames

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{PipelineError, Result};

/// Extension every content file carries
pub const MARKDOWN_EXT: &str = "md";

/// A route identifier: the content filename without its `.md` extension.
///
/// Used both as a filesystem lookup key and as a URL path segment, so it can
/// never contain a path separator or be `.`/`..`. Beyond that it is taken
/// as-is: no case folding and no encoding.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Validate a raw slug
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let unsafe_slug = raw.is_empty()
            || raw == "."
            || raw == ".."
            || raw.contains(['/', '\\', '\0']);
        if unsafe_slug {
            return Err(PipelineError::InvalidSlug(raw));
        }
        Ok(Self(raw))
    }

    /// Derive the slug from a content file path (`posts/my-post.md` -> `my-post`).
    ///
    /// Returns `None` for anything that is not a UTF-8 `*.md` filename.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext != MARKDOWN_EXT {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        Self::new(stem).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filename backing this slug
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.0, MARKDOWN_EXT)
    }

    /// Whether the slug is already in canonical URL form (lowercase ASCII,
    /// words joined by single hyphens).
    pub fn is_canonical(&self) -> bool {
        ::slug::slugify(&self.0) == self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Slug {
    type Error = PipelineError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}
