//! Records handed from the pipeline to the static-site builder

use serde::{Deserialize, Serialize};

use super::frontmatter::Metadata;
use super::slug::Slug;

/// One entry of the route table: the parameters of a single static page
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RouteParams {
    pub slug: Slug,
}

/// Everything the page-rendering layer needs for one route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPayload {
    /// `<category>/<slug>`
    pub route_slug: String,
    pub metadata: Metadata,
    /// Markdown body after issue links were rewritten
    pub transformed_body: String,
}

/// Head tags for a page
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ArticleMeta {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Typed view of the fields the renderer reads from an article's metadata.
///
/// The pipeline never requires these; the view only exists to report what a
/// page is missing before it reaches the renderer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArticleData {
    pub title: Option<String>,
    pub date: Option<String>,
    pub canonical: Option<String>,
    pub meta: ArticleMeta,
}

impl ArticleData {
    /// Read the expected fields. Fields of the wrong type count as missing.
    pub fn from_metadata(metadata: &Metadata) -> Self {
        let string = |key: &str| {
            metadata
                .get(key)
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };
        let meta = metadata
            .get("meta")
            .and_then(|v| serde_json::from_value::<ArticleMeta>(v.clone()).ok())
            .unwrap_or_default();

        Self {
            title: string("title"),
            date: string("date"),
            canonical: string("canonical"),
            meta,
        }
    }

    /// Names of expected fields that are absent
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.is_none() {
            missing.push("title");
        }
        if self.date.is_none() {
            missing.push("date");
        }
        if self.meta.title.is_none() {
            missing.push("meta.title");
        }
        if self.meta.description.is_none() {
            missing.push("meta.description");
        }
        missing
    }
}

impl RenderPayload {
    pub fn article(&self) -> ArticleData {
        ArticleData::from_metadata(&self.metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_serializes_camel_case() {
        let mut metadata = Metadata::new();
        metadata.insert("title".to_string(), json!("Hello"));
        let payload = RenderPayload {
            route_slug: "blog/hello".to_string(),
            metadata,
            transformed_body: "Body".to_string(),
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "routeSlug": "blog/hello",
                "metadata": { "title": "Hello" },
                "transformedBody": "Body"
            })
        );
    }

    #[test]
    fn test_route_params_shape() {
        let params = RouteParams {
            slug: Slug::new("hello-world").unwrap(),
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({ "slug": "hello-world" })
        );
    }

    #[test]
    fn test_article_data_from_metadata() {
        let metadata: Metadata = serde_json::from_value(json!({
            "title": "Hello",
            "date": "2021-01-01",
            "meta": { "title": "Hello | Blog", "description": "First" },
            "extra": 3
        }))
        .unwrap();

        let article = ArticleData::from_metadata(&metadata);
        assert_eq!(article.title.as_deref(), Some("Hello"));
        assert_eq!(article.canonical, None);
        assert_eq!(article.meta.description.as_deref(), Some("First"));
        assert!(article.missing_fields().is_empty());
    }

    #[test]
    fn test_article_data_reports_missing() {
        let metadata: Metadata = serde_json::from_value(json!({ "title": 42 })).unwrap();
        let article = ArticleData::from_metadata(&metadata);
        assert_eq!(
            article.missing_fields(),
            vec!["title", "date", "meta.title", "meta.description"]
        );
    }
}
