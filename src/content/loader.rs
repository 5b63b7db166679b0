//! Content loader - turns a route slug into a render payload

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::enumerator::enumerate_routes;
use super::frontmatter;
use super::payload::{RenderPayload, RouteParams};
use super::slug::Slug;
use super::transform::IssueLinker;
use crate::error::{PipelineError, Result};

/// Loads the content files of one category (e.g. `blog`).
///
/// Holds no mutable state; every call reads the file afresh.
#[derive(Debug, Clone)]
pub struct ContentLoader {
    root: PathBuf,
    category: String,
    linker: IssueLinker,
}

impl ContentLoader {
    /// Create a loader for `<root>`, publishing routes under `<category>/`
    pub fn new(root: impl Into<PathBuf>, category: impl Into<String>, linker: IssueLinker) -> Self {
        Self {
            root: root.into(),
            category: category.into(),
            linker,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Routes this loader can serve
    pub fn routes(&self) -> Result<Vec<RouteParams>> {
        enumerate_routes(&self.root)
    }

    /// Source file backing a slug
    pub fn path_for(&self, slug: &Slug) -> PathBuf {
        self.root.join(slug.file_name())
    }

    /// Load, parse and transform the content for `slug`
    pub fn load(&self, slug: &str) -> Result<RenderPayload> {
        let slug = Slug::new(slug)?;
        let path = self.path_for(&slug);

        let raw = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => PipelineError::ContentNotFound {
                slug: slug.to_string(),
                path: path.clone(),
            },
            _ => PipelineError::Io {
                path: path.clone(),
                source: e,
            },
        })?;

        let parsed =
            frontmatter::parse(&raw).map_err(|source| PipelineError::MalformedFrontMatter {
                slug: slug.to_string(),
                source,
            })?;

        let transformed_body = self.linker.link(parsed.body).into_owned();

        tracing::debug!(
            "Loaded {}/{} ({} metadata fields)",
            self.category,
            slug,
            parsed.metadata.len()
        );

        Ok(RenderPayload {
            route_slug: format!("{}/{}", self.category, slug),
            metadata: parsed.metadata,
            transformed_body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn setup(files: &[(&str, &str)]) -> (TempDir, ContentLoader) {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        let loader = ContentLoader::new(dir.path(), "blog", IssueLinker::default());
        (dir, loader)
    }

    #[test]
    fn test_load_hello_world() {
        let (_dir, loader) = setup(&[(
            "hello-world.md",
            "---\ntitle: \"Hello\"\ndate: \"2021-01-01\"\n---\nSee Issue #7 for details.",
        )]);

        let routes = loader.routes().unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].slug.as_str(), "hello-world");

        let payload = loader.load("hello-world").unwrap();
        assert_eq!(payload.route_slug, "blog/hello-world");
        assert_eq!(
            serde_json::to_value(&payload.metadata).unwrap(),
            json!({ "title": "Hello", "date": "2021-01-01" })
        );
        assert_eq!(
            payload.transformed_body,
            "See [Issue #7](https://github.com/mockoon/mockoon/issues/7) for details."
        );
    }

    #[test]
    fn test_frontmatter_is_not_transformed() {
        let (_dir, loader) = setup(&[(
            "fix.md",
            "---\ntitle: Fix for Issue #3\n---\nIssue #3 is fixed.",
        )]);

        let payload = loader.load("fix").unwrap();
        assert_eq!(payload.metadata["title"], json!("Fix for Issue #3"));
        assert!(payload.transformed_body.starts_with("[Issue #3]("));
    }

    #[test]
    fn test_load_without_frontmatter() {
        let body = "# Plain\n\nNo metadata here.\n";
        let (_dir, loader) = setup(&[("plain.md", body)]);

        let payload = loader.load("plain").unwrap();
        assert!(payload.metadata.is_empty());
        assert_eq!(payload.transformed_body, body);
    }

    #[test]
    fn test_missing_content() {
        let (_dir, loader) = setup(&[]);
        let err = loader.load("ghost").unwrap_err();
        assert!(matches!(err, PipelineError::ContentNotFound { ref slug, .. } if slug == "ghost"));
    }

    #[test]
    fn test_malformed_frontmatter_names_slug() {
        let (_dir, loader) = setup(&[("broken.md", "---\ntitle: [oops\n---\nbody")]);
        let err = loader.load("broken").unwrap_err();
        assert!(matches!(err, PipelineError::MalformedFrontMatter { .. }));
        assert_eq!(err.slug(), Some("broken"));
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_traversal_rejected() {
        let (dir, loader) = setup(&[]);
        fs::write(dir.path().join("secret.md"), "x").unwrap();
        let err = loader.load("../secret").unwrap_err();
        assert!(matches!(err, PipelineError::InvalidSlug(_)));
    }

    #[test]
    fn test_custom_category_and_tracker() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("v2.md"), "Closes issue #12").unwrap();
        let loader = ContentLoader::new(
            dir.path(),
            "releases",
            IssueLinker::new("https://tracker.example.com/issues"),
        );

        let payload = loader.load("v2").unwrap();
        assert_eq!(payload.route_slug, "releases/v2");
        assert_eq!(
            payload.transformed_body,
            "Closes [Issue #12](https://tracker.example.com/issues/12)"
        );
    }

    #[test]
    fn test_every_route_loads() {
        let (_dir, loader) = setup(&[
            ("a.md", "---\ntitle: A\n---\nA"),
            ("b.md", "B without front matter"),
            ("c.md", ";;;\n{\"title\": \"C\"}\n;;;\nC"),
        ]);

        for route in loader.routes().unwrap() {
            loader.load(route.slug.as_str()).unwrap();
        }
    }
}
