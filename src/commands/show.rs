//! Print the payload of a single route

use anyhow::Result;

use crate::Site;

/// Load one route and print its payload as JSON
pub fn run(site: &Site, slug: &str, category: Option<&str>) -> Result<()> {
    let category = site.resolve_category(category)?;
    let payload = site.loader(category).load(slug)?;

    for field in payload.article().missing_fields() {
        tracing::warn!("{} has no `{}`", payload.route_slug, field);
    }

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
