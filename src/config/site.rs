//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::content::DEFAULT_ISSUE_TRACKER_URL;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Directory
    pub content_dir: String,
    pub public_dir: String,

    /// Content categories; each is a subdirectory of `content_dir` and the
    /// first segment of its routes
    pub categories: Vec<String>,

    // Writing
    pub issue_tracker_url: String,
    pub new_post_name: String,
    /// Warn when a filename is not already a canonical slug
    pub strict_slugs: bool,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: "content".to_string(),
            public_dir: "public".to_string(),
            categories: vec!["blog".to_string()],

            issue_tracker_url: DEFAULT_ISSUE_TRACKER_URL.to_string(),
            new_post_name: ":title.md".to_string(),
            strict_slugs: false,

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        if config.categories.is_empty() {
            anyhow::bail!("{:?}: `categories` must list at least one category", path.as_ref());
        }
        Ok(config)
    }

    /// Default configuration as YAML, used when initializing a site
    pub fn default_yaml() -> Result<String> {
        let yaml = serde_yaml::to_string(&SiteConfig::default())?;
        Ok(format!("# blogpipe configuration\n{}", yaml))
    }
}
