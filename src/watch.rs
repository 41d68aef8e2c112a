//! Rebuild on change while serving.
//!
//! ```text
//! notify events ──▶ Debouncer (300ms) ──▶ handle_changes()
//!                                            │
//!                     config file changed ───┼──▶ reload_config()
//!                     catalog changed ───────┼──▶ reload_catalog()
//!                     assets changed ────────┘
//!                                            │
//!                                            ▼
//!                                      build_site()
//! ```
//!
//! A failed reload keeps the previous snapshot live; the server goes on
//! serving it until the next good change.

use crate::{
    build::build_site,
    catalog::store::{catalog, reload_catalog},
    config::{SiteConfig, cfg, reload_config},
    log,
    logger::{WatchStatus, error_chain},
};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    path::{Path, PathBuf},
    sync::mpsc::{self, RecvTimeoutError},
    time::{Duration, Instant},
};

const DEBOUNCE_MS: u64 = 300;
const REBUILD_COOLDOWN_MS: u64 = 800;

/// Editor swap and backup files.
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bak" | "swp" | "swo" | "tmp") || name.ends_with('~') || name.starts_with('.')
}

// =============================================================================
// Change classification
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileKind {
    Config,
    Catalog,
    Asset,
    Unknown,
}

fn classify(path: &Path, config: &SiteConfig) -> FileKind {
    if path == config.config_path {
        FileKind::Config
    } else if config.build.catalog.as_deref() == Some(path) {
        FileKind::Catalog
    } else if path.starts_with(&config.build.assets) {
        FileKind::Asset
    } else {
        FileKind::Unknown
    }
}

/// What a batch of changed paths calls for.
#[derive(Debug, Default, PartialEq, Eq)]
struct Changes {
    config: bool,
    catalog: bool,
    assets: usize,
}

impl Changes {
    fn collect(paths: &[PathBuf], config: &SiteConfig) -> Self {
        let mut changes = Self::default();
        for path in paths {
            match classify(path, config) {
                FileKind::Config => changes.config = true,
                FileKind::Catalog => changes.catalog = true,
                FileKind::Asset => changes.assets += 1,
                FileKind::Unknown => {}
            }
        }
        changes
    }

    fn is_empty(&self) -> bool {
        !self.config && !self.catalog && self.assets == 0
    }
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches rapid file events with debouncing and rebuild cooldown.
struct Debouncer {
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
    last_rebuild: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            pending: FxHashSet::default(),
            last_event: None,
            last_rebuild: None,
        }
    }

    fn in_cooldown(&self) -> bool {
        self.last_rebuild
            .is_some_and(|t| t.elapsed() < Duration::from_millis(REBUILD_COOLDOWN_MS))
    }

    fn add(&mut self, event: Event) {
        self.pending
            .extend(event.paths.into_iter().filter(|path| !is_temp_file(path)));
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty()
            && self
                .last_event
                .is_some_and(|t| t.elapsed() >= Duration::from_millis(DEBOUNCE_MS))
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        self.pending.drain().collect()
    }

    fn mark_rebuild(&mut self) {
        self.last_rebuild = Some(Instant::now());
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(60)
        } else {
            Duration::from_millis(DEBOUNCE_MS)
        }
    }
}

// =============================================================================
// Event Handler
// =============================================================================

/// Reload what changed and rebuild. Returns true when a rebuild ran.
fn handle_changes(paths: &[PathBuf], status: &mut WatchStatus) -> bool {
    let changes = Changes::collect(paths, &cfg());
    if changes.is_empty() {
        return false;
    }

    let mut catalog_changed = changes.catalog;
    if changes.config {
        match reload_config() {
            Ok(true) => catalog_changed = true,
            Ok(false) if !changes.catalog && changes.assets == 0 => {
                status.unchanged(&cfg().config_path.display().to_string());
                return false;
            }
            Ok(false) => {}
            Err(err) => {
                status.error("config reload failed", &error_chain(&err));
                return false;
            }
        }
    }

    // Config reloads may point `[build] catalog` elsewhere
    let config = cfg();
    if catalog_changed {
        if let Err(err) = reload_catalog(config.build.catalog.as_deref()) {
            status.error("catalog reload failed", &error_chain(&anyhow::Error::from(err)));
            return false;
        }
        log!("catalog"; "{} nodes", catalog().nodes().len());
    }

    match build_site(&config, &catalog()) {
        Ok(report) => {
            status.success(&format!("rebuilt {} pages", report.pages));
            true
        }
        Err(err) => {
            status.error("build failed", &error_chain(&err));
            false
        }
    }
}

// =============================================================================
// Watcher Setup
// =============================================================================

/// Paths to watch: config file, catalog file, assets directory.
fn watch_targets(config: &SiteConfig) -> Vec<(PathBuf, RecursiveMode)> {
    let mut targets = vec![(config.config_path.clone(), RecursiveMode::NonRecursive)];
    if let Some(catalog) = &config.build.catalog {
        targets.push((catalog.clone(), RecursiveMode::NonRecursive));
    }
    targets.push((config.build.assets.clone(), RecursiveMode::Recursive));
    targets.retain(|(path, _)| path.exists());
    targets
}

fn setup_watchers(watcher: &mut impl Watcher, config: &SiteConfig) -> Result<()> {
    let root = config.get_root();
    let mut watched = Vec::new();
    for (path, mode) in watch_targets(config) {
        watcher
            .watch(&path, mode)
            .with_context(|| format!("Failed to watch {}", path.display()))?;
        watched.push(path.strip_prefix(root).unwrap_or(&path).display().to_string());
    }
    log!("watch"; "{}", watched.join(", "));
    Ok(())
}

const fn is_relevant(event: &Event) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
}

/// Watch for changes until the event channel closes.
pub fn watch_for_changes_blocking() -> Result<()> {
    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    setup_watchers(&mut watcher, &cfg())?;

    let mut debouncer = Debouncer::new();
    let mut status = WatchStatus::new();

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) && !debouncer.in_cooldown() => {
                debouncer.add(event);
            }
            Ok(Err(err)) => log!("watch"; "error: {err}"),
            Err(RecvTimeoutError::Timeout) if debouncer.ready() => {
                if handle_changes(&debouncer.take(), &mut status) {
                    debouncer.mark_rebuild();
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.config_path = PathBuf::from("/site/nodesplus.toml");
        config.build.assets = PathBuf::from("/site/assets");
        config.build.catalog = Some(PathBuf::from("/site/catalog/nodes.json"));
        config
    }

    #[test]
    fn test_is_temp_file() {
        assert!(is_temp_file(Path::new("/site/nodesplus.toml~")));
        assert!(is_temp_file(Path::new("/site/assets/.logo.png.swp")));
        assert!(!is_temp_file(Path::new("/site/assets/logo.png")));
    }

    #[test]
    fn test_classify() {
        let config = config();
        assert_eq!(classify(Path::new("/site/nodesplus.toml"), &config), FileKind::Config);
        assert_eq!(classify(Path::new("/site/catalog/nodes.json"), &config), FileKind::Catalog);
        assert_eq!(classify(Path::new("/site/assets/img/a.png"), &config), FileKind::Asset);
        assert_eq!(classify(Path::new("/site/public/index.html"), &config), FileKind::Unknown);
    }

    #[test]
    fn test_changes_collect() {
        let config = config();
        let paths = [
            PathBuf::from("/site/assets/a.png"),
            PathBuf::from("/site/assets/b.png"),
            PathBuf::from("/site/catalog/nodes.json"),
        ];
        let changes = Changes::collect(&paths, &config);
        assert_eq!(changes, Changes { config: false, catalog: true, assets: 2 });
        assert!(Changes::collect(&[PathBuf::from("/elsewhere")], &config).is_empty());
    }

    #[test]
    fn test_watch_targets_skip_missing() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.config_path = dir.path().join("nodesplus.toml");
        config.build.assets = dir.path().join("assets");
        std::fs::write(&config.config_path, "").unwrap();

        let targets = watch_targets(&config);
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].0, config.config_path);
    }

    #[test]
    fn test_debouncer_batches() {
        let mut debouncer = Debouncer::new();
        assert!(!debouncer.ready());
        assert_eq!(debouncer.timeout(), Duration::from_secs(60));

        let event = Event::new(EventKind::Any)
            .add_path(PathBuf::from("/site/assets/a.png"))
            .add_path(PathBuf::from("/site/assets/.a.png.swp"));
        debouncer.add(event);
        assert_eq!(debouncer.timeout(), Duration::from_millis(DEBOUNCE_MS));

        let taken = debouncer.take();
        assert_eq!(taken, vec![PathBuf::from("/site/assets/a.png")]);
        assert!(!debouncer.in_cooldown());
        debouncer.mark_rebuild();
        assert!(debouncer.in_cooldown());
    }
}
