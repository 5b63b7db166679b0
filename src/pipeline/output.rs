//! Writes route tables and payloads for the page-rendering layer

use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::BuildReport;
use crate::error::{PipelineError, Result};

/// Route table file written at the top of each category directory
pub const ROUTES_FILE: &str = "routes.json";

/// Subdirectory holding one `<slug>.json` per payload
pub const PAGES_DIR: &str = "pages";

/// Write `<public>/<category>/routes.json` and `<public>/<category>/pages/<slug>.json`.
///
/// The category directory is emptied first, so pages that failed this run or
/// whose source was deleted do not survive from an earlier build. The route
/// table lists only routes that produced a payload. Returns the files written.
pub fn write_report(report: &BuildReport, public_dir: &Path) -> Result<Vec<PathBuf>> {
    let category_dir = public_dir.join(&report.category);
    let pages_dir = category_dir.join(PAGES_DIR);

    remove_dir_if_exists(&category_dir)?;
    fs::create_dir_all(&pages_dir).map_err(|source| PipelineError::Io {
        path: pages_dir.clone(),
        source,
    })?;

    let mut written = Vec::with_capacity(report.payloads.len() + 1);
    let prefix = format!("{}/", report.category);

    let routes: Vec<_> = report
        .routes
        .iter()
        .filter(|r| {
            report
                .payloads
                .iter()
                .any(|p| p.route_slug.strip_prefix(&prefix) == Some(r.slug.as_str()))
        })
        .collect();
    let routes_path = category_dir.join(ROUTES_FILE);
    write_json(&routes_path, &routes)?;
    written.push(routes_path);

    for payload in &report.payloads {
        let slug = payload
            .route_slug
            .strip_prefix(&prefix)
            .unwrap_or(&payload.route_slug);
        let path = pages_dir.join(format!("{}.json", slug));
        write_json(&path, payload)?;
        written.push(path);
    }

    tracing::info!(
        "Wrote {} payloads to {:?}",
        report.payloads.len(),
        pages_dir
    );

    Ok(written)
}

fn remove_dir_if_exists(dir: &Path) -> Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {
            tracing::debug!("Cleared {:?}", dir);
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(PipelineError::Io {
            path: dir.to_path_buf(),
            source,
        }),
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })
}
