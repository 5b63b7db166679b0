//! Pipeline module - runs route discovery and loading for a category

mod output;

use std::collections::BTreeSet;

pub use output::write_report;

use crate::content::{ContentLoader, RenderPayload, RouteParams};
use crate::error::{PipelineError, Result};

/// Outcome of running every route of one category
#[derive(Debug)]
pub struct BuildReport {
    pub category: String,
    pub routes: Vec<RouteParams>,
    pub payloads: Vec<RenderPayload>,
    /// Routes that failed to load, in route order
    pub failures: Vec<PipelineError>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.coverage().is_complete()
    }

    pub fn coverage(&self) -> Coverage {
        verify_coverage(&self.category, &self.routes, &self.payloads)
    }
}

/// Difference between the route table and the payloads actually produced
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Coverage {
    /// Enumerated slugs with no payload
    pub unloaded: Vec<String>,
    /// Payload slugs that were never enumerated
    pub unrouted: Vec<String>,
}

impl Coverage {
    pub fn is_complete(&self) -> bool {
        self.unloaded.is_empty() && self.unrouted.is_empty()
    }
}

/// Compare enumerated routes against loaded payloads of `category`
pub fn verify_coverage(
    category: &str,
    routes: &[RouteParams],
    payloads: &[RenderPayload],
) -> Coverage {
    let prefix = format!("{}/", category);
    let routed: BTreeSet<&str> = routes.iter().map(|r| r.slug.as_str()).collect();
    let loaded: BTreeSet<&str> = payloads
        .iter()
        .map(|p| {
            p.route_slug
                .strip_prefix(&prefix)
                .unwrap_or(p.route_slug.as_str())
        })
        .collect();

    Coverage {
        unloaded: routed.difference(&loaded).map(|s| s.to_string()).collect(),
        unrouted: loaded.difference(&routed).map(|s| s.to_string()).collect(),
    }
}

/// Route discovery plus per-route loading for one category
pub struct Pipeline {
    loader: ContentLoader,
}

impl Pipeline {
    pub fn new(loader: ContentLoader) -> Self {
        Self { loader }
    }

    pub fn loader(&self) -> &ContentLoader {
        &self.loader
    }

    /// Enumerate the category and load every route.
    ///
    /// Only an unavailable content root fails the whole run; per-route
    /// errors are collected in the report.
    pub fn run(&self) -> Result<BuildReport> {
        let routes = self.loader.routes()?;

        let mut payloads = Vec::with_capacity(routes.len());
        let mut failures = Vec::new();

        for route in &routes {
            match self.loader.load(route.slug.as_str()) {
                Ok(payload) => payloads.push(payload),
                Err(e) => {
                    tracing::error!("Failed to load {}/{}: {}", self.loader.category(), route.slug, e);
                    failures.push(e);
                }
            }
        }

        tracing::info!(
            "Category {}: {} routes, {} loaded, {} failed",
            self.loader.category(),
            routes.len(),
            payloads.len(),
            failures.len()
        );

        Ok(BuildReport {
            category: self.loader.category().to_string(),
            routes,
            payloads,
            failures,
        })
    }
}
