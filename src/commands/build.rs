//! Build payloads for every category

use anyhow::Result;
use notify::Watcher;
use std::path::Path;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::pipeline::{write_report, BuildReport};
use crate::Site;

/// Enumerate and load every route, then write the payloads.
///
/// A route that fails to load stops the build before anything is written.
/// With `keep_going` the failing pages are left out, the rest is written, and
/// the build still reports failure.
pub fn run(site: &Site, keep_going: bool) -> Result<()> {
    let start = Instant::now();

    let mut reports = Vec::with_capacity(site.config.categories.len());
    for category in &site.config.categories {
        let report = site.pipeline(category).run()?;
        if site.config.strict_slugs {
            warn_non_canonical(&report);
        }
        reports.push(report);
    }

    let failed: usize = reports.iter().map(|r| r.failures.len()).sum();
    if failed > 0 && !keep_going {
        anyhow::bail!(
            "{} route(s) failed to load, nothing written (use --keep-going to write the rest)",
            failed
        );
    }

    let mut written = 0;
    for report in &reports {
        written += write_report(report, &site.public_dir)?.len();
    }

    if failed > 0 {
        anyhow::bail!(
            "{} route(s) failed to load and were left out of the build",
            failed
        );
    }

    let duration = start.elapsed();
    tracing::info!(
        "Wrote {} files in {:.2}s",
        written,
        duration.as_secs_f64()
    );

    Ok(())
}

fn warn_non_canonical(report: &BuildReport) {
    for route in report.routes.iter().filter(|r| !r.slug.is_canonical()) {
        tracing::warn!(
            "{}/{} is not a canonical slug (expected {})",
            report.category,
            route.slug,
            slug::slugify(route.slug.as_str())
        );
    }
}

/// Quiet period after a rebuild before the next one may start
const REBUILD_QUIET: Duration = Duration::from_millis(500);

/// Tracks pending changes between rebuilds.
///
/// Changes that arrive inside the quiet period are remembered and picked up
/// once it has passed, never dropped.
#[derive(Debug)]
struct RebuildSchedule {
    pending: bool,
    reload_config: bool,
    last_rebuild: Instant,
    quiet: Duration,
}

impl RebuildSchedule {
    fn new(now: Instant, quiet: Duration) -> Self {
        Self {
            pending: false,
            reload_config: false,
            last_rebuild: now,
            quiet,
        }
    }

    fn mark_dirty(&mut self, config_changed: bool) {
        self.pending = true;
        self.reload_config |= config_changed;
    }

    fn is_due(&self, now: Instant) -> bool {
        self.pending && now.duration_since(self.last_rebuild) > self.quiet
    }

    /// Clear the pending state; returns whether the config must be reloaded
    fn start_rebuild(&mut self, now: Instant) -> bool {
        self.pending = false;
        self.last_rebuild = now;
        std::mem::take(&mut self.reload_config)
    }
}

/// Watch content and configuration, rebuilding on change
pub fn watch(site: &Site, keep_going: bool) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    // Watch content directory
    watcher.watch(&site.content_dir, notify::RecursiveMode::Recursive)?;

    // Watch config file
    let config_path = site.base_dir.join(crate::CONFIG_FILE);
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching {:?} for changes. Press Ctrl+C to stop.", site.content_dir);

    let mut site = site.clone();
    let mut schedule = RebuildSchedule::new(Instant::now(), REBUILD_QUIET);

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => {
                let config_changed = event.paths.iter().any(|p| p.ends_with(crate::CONFIG_FILE));
                schedule.mark_dirty(config_changed);
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }

        let now = Instant::now();
        if !schedule.is_due(now) {
            continue;
        }

        if schedule.start_rebuild(now) {
            match Site::new(&site.base_dir) {
                Ok(reloaded) => {
                    if reloaded.content_dir != site.content_dir {
                        rewatch_content(&mut watcher, &site.content_dir, &reloaded.content_dir);
                    }
                    site = reloaded;
                }
                Err(e) => tracing::error!("Failed to reload configuration: {}", e),
            }
        }

        tracing::info!("Content changed, rebuilding...");
        if let Err(e) = run(&site, keep_going) {
            tracing::error!("Build failed: {}", e);
        }
    }

    Ok(())
}

/// Move the recursive watch from the old content dir to the new one
fn rewatch_content(watcher: &mut impl Watcher, old: &Path, new: &Path) {
    if let Err(e) = watcher.unwatch(old) {
        tracing::debug!("Failed to unwatch {:?}: {}", old, e);
    }
    match watcher.watch(new, notify::RecursiveMode::Recursive) {
        Ok(()) => tracing::info!("Now watching {:?} for changes", new),
        Err(e) => tracing::error!("Failed to watch {:?}: {}", new, e),
    }
}
