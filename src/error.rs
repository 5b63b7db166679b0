//! Error types for the content pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while splitting front matter from a content file
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("front matter opened with `{0}` but never closed")]
    Unterminated(&'static str),

    #[error("invalid YAML front matter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON front matter: {0}")]
    Json(#[from] serde_json::Error),

    #[error("front matter must be a mapping of keys to values")]
    NotAMapping,

    /// A YAML key that is itself a sequence or mapping
    #[error("front matter keys must be scalars, found a {0} key")]
    CollectionKey(&'static str),
}

/// Errors raised by route enumeration and content loading
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The content root is missing, unreadable, or not a directory.
    /// Fatal for the whole build.
    #[error("content root {path:?} is unavailable: {source}")]
    ContentRootUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No `<slug>.md` exists for a requested route
    #[error("no content file for route `{slug}` (expected {path:?})")]
    ContentNotFound { slug: String, path: PathBuf },

    #[error("malformed front matter in `{slug}`: {source}")]
    MalformedFrontMatter {
        slug: String,
        #[source]
        source: FrontMatterError,
    },

    /// A slug that is empty or would resolve outside the content root
    #[error("invalid slug `{0}`")]
    InvalidSlug(String),

    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PipelineError {
    /// The route this error belongs to, if it is specific to one route
    pub fn slug(&self) -> Option<&str> {
        match self {
            Self::ContentNotFound { slug, .. }
            | Self::MalformedFrontMatter { slug, .. }
            | Self::InvalidSlug(slug) => Some(slug.as_str()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
