//! Validate content without writing anything

use anyhow::Result;

use crate::Site;

/// Findings of a check run
#[derive(Debug, Default)]
pub struct CheckSummary {
    pub routes: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl CheckSummary {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Run every category through the pipeline and collect problems.
///
/// Errors: unavailable content roots, routes that fail to load, and gaps
/// between the route table and the loaded payloads. Non-canonical slugs are
/// errors in strict mode and warnings otherwise. Missing renderer fields are
/// always warnings.
pub fn check_site(site: &Site, strict: bool) -> CheckSummary {
    let strict = strict || site.config.strict_slugs;
    let mut summary = CheckSummary::default();

    for category in &site.config.categories {
        let report = match site.pipeline(category).run() {
            Ok(report) => report,
            Err(e) => {
                summary.errors.push(e.to_string());
                continue;
            }
        };

        summary.routes += report.routes.len();
        summary
            .errors
            .extend(report.failures.iter().map(|e| e.to_string()));

        let coverage = report.coverage();
        for slug in &coverage.unrouted {
            summary
                .errors
                .push(format!("{}/{} was loaded but never enumerated", category, slug));
        }

        for route in report.routes.iter().filter(|r| !r.slug.is_canonical()) {
            let message = format!(
                "{}/{} is not a canonical slug (expected {})",
                category,
                route.slug,
                slug::slugify(route.slug.as_str())
            );
            if strict {
                summary.errors.push(message);
            } else {
                summary.warnings.push(message);
            }
        }

        for payload in &report.payloads {
            let missing = payload.article().missing_fields();
            if !missing.is_empty() {
                summary.warnings.push(format!(
                    "{} is missing {}",
                    payload.route_slug,
                    missing.join(", ")
                ));
            }
        }
    }

    summary
}

/// Run the check command
pub fn run(site: &Site, strict: bool) -> Result<()> {
    let summary = check_site(site, strict);

    for warning in &summary.warnings {
        println!("  warning: {}", warning);
    }
    for error in &summary.errors {
        println!("  error: {}", error);
    }
    println!(
        "Checked {} routes: {} errors, {} warnings",
        summary.routes,
        summary.errors.len(),
        summary.warnings.len()
    );

    if !summary.is_ok() {
        anyhow::bail!("Check failed with {} errors", summary.errors.len());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const COMPLETE: &str = "---\ntitle: T\ndate: 2021-01-01\nmeta:\n  title: T\n  description: D\n---\nBody";

    fn site_with(files: &[(&str, &str)]) -> (TempDir, Site) {
        let dir = TempDir::new().unwrap();
        let blog = dir.path().join("content/blog");
        fs::create_dir_all(&blog).unwrap();
        for (name, content) in files {
            fs::write(blog.join(name), content).unwrap();
        }
        let site = Site::new(dir.path()).unwrap();
        (dir, site)
    }

    #[test]
    fn test_clean_site() {
        let (_dir, site) = site_with(&[("post.md", COMPLETE)]);
        let summary = check_site(&site, true);
        assert!(summary.is_ok());
        assert_eq!(summary.routes, 1);
        assert!(summary.warnings.is_empty());
    }

    #[test]
    fn test_reports_missing_fields_as_warnings() {
        let (_dir, site) = site_with(&[("bare.md", "no metadata")]);
        let summary = check_site(&site, false);
        assert!(summary.is_ok());
        assert_eq!(summary.warnings.len(), 1);
        assert!(summary.warnings[0].contains("blog/bare is missing title"));
    }

    #[test]
    fn test_strict_slugs() {
        let (_dir, site) = site_with(&[("My Post.md", COMPLETE)]);

        let relaxed = check_site(&site, false);
        assert!(relaxed.is_ok());
        assert_eq!(relaxed.warnings.len(), 1);

        let strict = check_site(&site, true);
        assert!(!strict.is_ok());
        assert!(strict.errors[0].contains("expected my-post"));
    }

    #[test]
    fn test_load_failures_are_errors() {
        let (_dir, site) = site_with(&[("broken.md", "---\ntitle: x\n")]);
        let summary = check_site(&site, false);
        assert_eq!(summary.errors.len(), 1);
        assert!(summary.errors[0].contains("broken"));
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        let summary = check_site(&site, false);
        assert!(!summary.is_ok());
        assert!(run(&site, false).is_err());
    }
}
