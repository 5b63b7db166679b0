//! Create a new content file

use anyhow::Result;
use serde_json::json;
use std::fs;
use std::path::PathBuf;

use crate::content::{Metadata, Slug};
use crate::Site;

/// Front matter plus an empty body for a new article
pub fn scaffold(title: &str, date: &str) -> Result<String> {
    let mut metadata = Metadata::new();
    metadata.insert("title".to_string(), json!(title));
    metadata.insert("date".to_string(), json!(date));
    metadata.insert(
        "meta".to_string(),
        json!({ "title": title, "description": "" }),
    );

    let yaml = serde_yaml::to_string(&metadata)?;
    Ok(format!("---\n{}---\n\n", yaml))
}

/// Create `<content>/<category>/<name>.md` and return its path
pub fn create_post(
    site: &Site,
    title: &str,
    category: Option<&str>,
    path: Option<&str>,
) -> Result<PathBuf> {
    let now = chrono::Local::now();
    let category = site.resolve_category(category)?;
    let target_dir = site.category_dir(category);
    fs::create_dir_all(&target_dir)?;

    // Generate filename
    let filename = if let Some(p) = path {
        format!("{}.md", p)
    } else {
        let slug = slug::slugify(title);

        site.config
            .new_post_name
            .replace(":title", &slug)
            .replace(":year", &now.format("%Y").to_string())
            .replace(":month", &now.format("%m").to_string())
            .replace(":day", &now.format("%d").to_string())
    };

    let file_path = target_dir.join(&filename);
    let in_category = file_path.parent() == Some(target_dir.as_path());
    if !in_category || Slug::from_path(&file_path).is_none() {
        anyhow::bail!("Not a valid content filename: {}", filename);
    }

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = scaffold(title, &now.format("%Y-%m-%d").to_string())?;
    fs::write(&file_path, content)?;

    tracing::info!("Created {:?}", file_path);

    Ok(file_path)
}

/// Run the new command
pub fn run(site: &Site, title: &str, category: Option<&str>, path: Option<&str>) -> Result<()> {
    let file_path = create_post(site, title, category, path)?;
    println!("Created: {:?}", file_path);
    Ok(())
}
