//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use super::new::scaffold;
use crate::config::SiteConfig;
use crate::CONFIG_FILE;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("Site already initialized: {:?}", config_path);
    }

    let config = SiteConfig::default();

    // Create directory structure
    fs::create_dir_all(target_dir)?;
    for category in &config.categories {
        fs::create_dir_all(target_dir.join(&config.content_dir).join(category))?;
    }

    fs::write(&config_path, SiteConfig::default_yaml()?)?;

    // Create a sample post
    let now = chrono::Local::now();
    let sample_post = format!(
        "{}Welcome! This post was generated by `blogpipe init`.\n\n\
         Mentions such as Issue #1 are linked to the issue tracker configured in `{}`.\n",
        scaffold("Hello World", &now.format("%Y-%m-%d").to_string())?,
        CONFIG_FILE
    );

    let sample_path = target_dir
        .join(&config.content_dir)
        .join(&config.categories[0])
        .join("hello-world.md");
    fs::write(sample_path, sample_post)?;

    Ok(())
}
