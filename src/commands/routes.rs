//! List the route table

use anyhow::Result;

use crate::Site;

/// Print the routes of a category, as text or as the JSON route table
pub fn run(site: &Site, category: Option<&str>, json: bool) -> Result<()> {
    let category = site.resolve_category(category)?;
    let routes = site.loader(category).routes()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&routes)?);
        return Ok(());
    }

    println!("Routes in {} ({}):", category, routes.len());
    for route in routes {
        println!("  /{}/{}", category, route.slug);
    }

    Ok(())
}
