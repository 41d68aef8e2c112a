//! Process-wide config snapshot, replaced atomically in watch mode.
//!
//! Readers call [`cfg`] and keep the returned `Arc` for as long as they
//! need a consistent view. [`reload_config`] swaps in a new snapshot only
//! when the file content actually changed.

use super::SiteConfig;
use crate::utils::hash;
use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use std::{
    fs,
    sync::{
        Arc, LazyLock,
        atomic::{AtomicU64, Ordering},
    },
};

static CONFIG: LazyLock<ArcSwap<SiteConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(SiteConfig::default()));

/// Fingerprint of the config file behind the current snapshot.
static CONFIG_HASH: AtomicU64 = AtomicU64::new(0);

/// Current config snapshot.
#[inline]
pub fn cfg() -> Arc<SiteConfig> {
    CONFIG.load_full()
}

/// Install the config loaded at startup.
pub fn init_config(config: SiteConfig) {
    if let Ok(content) = fs::read(&config.config_path) {
        CONFIG_HASH.store(hash::compute(&content), Ordering::Relaxed);
    }
    CONFIG.store(Arc::new(config));
}

/// Re-read the config file with the CLI overrides of the running command.
///
/// Returns `false` when the content is unchanged. On error the old
/// snapshot stays in place.
pub fn reload_config() -> Result<bool> {
    let current = cfg();
    let cli = current.cli.context("config reloaded before initialisation")?;

    let content = fs::read(&current.config_path)
        .with_context(|| format!("cannot read {}", current.config_path.display()))?;
    let new_hash = hash::compute(&content);
    if new_hash == CONFIG_HASH.load(Ordering::Relaxed) {
        return Ok(false);
    }

    let config = SiteConfig::load(cli)?;
    CONFIG.store(Arc::new(config));
    CONFIG_HASH.store(new_hash, Ordering::Relaxed);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reload_requires_cli() {
        // The default snapshot carries no CLI, so there is nothing to reload from
        let config = SiteConfig::default();
        assert!(config.cli.is_none());
        CONFIG.store(Arc::new(config));
        assert!(reload_config().is_err());
    }
}
