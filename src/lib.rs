//! blogpipe: build-time content pipeline for markdown sites
//!
//! Discovers `<slug>.md` files per content category, splits front matter
//! from the body, links `Issue #<n>` references to the issue tracker, and
//! hands `(route, metadata, body)` payloads to the page-rendering layer.

pub mod commands;
pub mod config;
pub mod content;
pub mod error;
pub mod pipeline;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{ContentLoader, IssueLinker};
use pipeline::Pipeline;

/// Name of the site configuration file in the base directory
pub const CONFIG_FILE: &str = "_config.yml";

/// A site on disk: its configuration and resolved directories
#[derive(Debug, Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content directory (one subdirectory per category)
    pub content_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Site {
    /// Open a site from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Build a site from an already loaded configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Self {
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
        }
    }

    /// Content root of a category
    pub fn category_dir(&self, category: &str) -> PathBuf {
        self.content_dir.join(category)
    }

    /// Loader for one category
    pub fn loader(&self, category: &str) -> ContentLoader {
        ContentLoader::new(
            self.category_dir(category),
            category,
            IssueLinker::new(&self.config.issue_tracker_url),
        )
    }

    /// Pipeline for one category
    pub fn pipeline(&self, category: &str) -> Pipeline {
        Pipeline::new(self.loader(category))
    }

    /// Resolve an optional category argument, defaulting to the first configured one
    pub fn resolve_category<'a>(&'a self, category: Option<&'a str>) -> Result<&'a str> {
        match category {
            Some(c) if self.config.categories.iter().any(|known| known == c) => Ok(c),
            Some(c) => anyhow::bail!(
                "Unknown category: {}. Available: {}",
                c,
                self.config.categories.join(", ")
            ),
            None => self
                .config
                .categories
                .first()
                .map(String::as_str)
                .ok_or_else(|| anyhow::anyhow!("No categories configured")),
        }
    }

    /// Build every category
    pub fn build(&self, keep_going: bool) -> Result<()> {
        commands::build::run(self, keep_going)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_site_defaults_without_config() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.content_dir, dir.path().join("content"));
        assert_eq!(site.category_dir("blog"), dir.path().join("content/blog"));
        assert_eq!(site.resolve_category(None).unwrap(), "blog");
        assert!(site.resolve_category(Some("news")).is_err());
    }

    #[test]
    fn test_site_reads_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "content_dir: src/content\ncategories: [news, blog]\nissue_tracker_url: https://t.example/i\n",
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("src/content/news")).unwrap();
        fs::write(dir.path().join("src/content/news/launch.md"), "Issue #1").unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.resolve_category(None).unwrap(), "news");

        let payload = site.loader("news").load("launch").unwrap();
        assert_eq!(payload.route_slug, "news/launch");
        assert_eq!(payload.transformed_body, "[Issue #1](https://t.example/i/1)");
    }
}
