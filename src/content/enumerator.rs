//! Route discovery - one route per markdown file in a content root

use glob::{MatchOptions, Pattern};
use std::fs;
use std::path::Path;

use super::payload::RouteParams;
use super::slug::{Slug, MARKDOWN_EXT};
use crate::error::{PipelineError, Result};

/// List the routes backed by `<root>/*.md`, sorted by slug.
///
/// Only files directly under `root` count; subdirectories and dotfiles are
/// skipped. A missing or unreadable root is an error, an empty one is not.
pub fn enumerate_routes(root: &Path) -> Result<Vec<RouteParams>> {
    ensure_readable_dir(root)?;

    let root_str = root.to_str().ok_or_else(|| PipelineError::ContentRootUnavailable {
        path: root.to_path_buf(),
        source: std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "content root is not valid UTF-8",
        ),
    })?;
    let pattern = format!("{}/*.{}", Pattern::escape(root_str), MARKDOWN_EXT);
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };

    let entries = glob::glob_with(&pattern, options).map_err(|e| {
        PipelineError::ContentRootUnavailable {
            path: root.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()),
        }
    })?;

    let mut routes = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| PipelineError::Io {
            path: e.path().to_path_buf(),
            source: e.into_error(),
        })?;

        if !path.is_file() {
            continue;
        }

        match Slug::from_path(&path) {
            Some(slug) => routes.push(RouteParams { slug }),
            None => tracing::warn!("Skipping {:?}: filename is not a usable slug", path),
        }
    }

    routes.sort();
    tracing::debug!("Found {} routes in {:?}", routes.len(), root);

    Ok(routes)
}

/// Fail with `ContentRootUnavailable` unless `root` is a listable directory
fn ensure_readable_dir(root: &Path) -> Result<()> {
    let unavailable = |source: std::io::Error| PipelineError::ContentRootUnavailable {
        path: root.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(root).map_err(unavailable)?;
    if !metadata.is_dir() {
        return Err(unavailable(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "not a directory",
        )));
    }
    fs::read_dir(root).map_err(unavailable)?;
    Ok(())
}
