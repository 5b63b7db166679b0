//! Content module - route discovery, front matter, and body rewriting

mod enumerator;
pub mod frontmatter;
mod loader;
mod payload;
mod slug;
mod transform;

pub use enumerator::enumerate_routes;
pub use frontmatter::{Metadata, ParsedContent};
pub use loader::ContentLoader;
pub use payload::{ArticleData, ArticleMeta, RenderPayload, RouteParams};
pub use self::slug::Slug;
pub use transform::{IssueLinker, DEFAULT_ISSUE_TRACKER_URL};
