//! `nodesplus init`: a new site with a config, an editable copy of the
//! catalog and an empty assets directory.

use crate::{catalog::Catalog, config::SiteConfig, log};
use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

/// Catalog location written into the new config, relative to the root.
const CATALOG_FILE: &str = "catalog/nodes.json";

const SITE_DIRS: &[&str] = &["assets/images", "catalog"];

/// Create the site at the config root.
///
/// Without a name the target is the current directory, which then has to
/// be empty.
pub fn new_site(config: &SiteConfig, has_name: bool) -> Result<()> {
    let root = config.get_root();
    if !has_name && !is_dir_empty(root)? {
        bail!("Current directory is not empty. Use `nodesplus init <NAME>` to create in a subdirectory.");
    }

    init_site_structure(root)?;
    fs::write(root.join(CATALOG_FILE), Catalog::embedded_source())
        .with_context(|| format!("Failed to write {CATALOG_FILE}"))?;
    init_default_config(&config.config_path)?;
    init_ignored_files(root, config.build.output.strip_prefix(root).unwrap_or(&config.build.output))?;

    log!("init"; "created {}", root.display());
    Ok(())
}

fn is_dir_empty(path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    Ok(fs::read_dir(path)?.next().is_none())
}

fn init_site_structure(root: &Path) -> Result<()> {
    for dir in SITE_DIRS {
        let path = root.join(dir);
        if path.exists() {
            bail!("Path `{}` already exists. Try `nodesplus init <NAME>` instead.", path.display());
        }
        fs::create_dir_all(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    }
    Ok(())
}

/// Default config pointing at the copied catalog.
fn default_config_toml() -> Result<String> {
    let mut config = SiteConfig::default();
    config.build.catalog = Some(CATALOG_FILE.into());
    Ok(toml::to_string_pretty(&config)?)
}

fn init_default_config(path: &Path) -> Result<()> {
    fs::write(path, default_config_toml()?)
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// `.gitignore` with the output directory, unless one exists already.
fn init_ignored_files(root: &Path, output: &Path) -> Result<()> {
    let path = root.join(".gitignore");
    if !path.exists() {
        fs::write(&path, format!("/{}/\n", output.display()))?;
    }
    Ok(())
}
