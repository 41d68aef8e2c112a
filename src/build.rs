//! Static site build.
//!
//! ```text
//! build_site()
//!     │
//!     ├── prepare_output()     clean / create the output directory
//!     │
//!     ├── rayon::join
//!     │     ├── render_pages()   every Page → index.html, in parallel
//!     │     └── copy_assets()    assets/ → output, in parallel
//!     │
//!     └── write_support_files()  css, js, search-index.json, sitemap.xml
//! ```

use crate::{
    catalog::Catalog,
    config::SiteConfig,
    generator::sitemap::build_sitemap,
    log,
    site::{Page, SCRIPT, SCRIPT_FILE, STYLESHEET_FILE, Site, search_index, stylesheet},
    utils::minify::{MinifyType, minify},
};
use anyhow::{Context, Result, anyhow};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, Ordering},
};
use walkdir::WalkDir;

/// What one build wrote.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    pub pages: usize,
    pub assets: usize,
    pub sitemap: bool,
}

/// Build the whole site into `[build] output`.
pub fn build_site(config: &SiteConfig, catalog: &Catalog) -> Result<BuildReport> {
    let output = &config.build.output;
    prepare_output(output, config.build.clean)?;

    let pages = Page::all(catalog);
    let assets = collect_files(&config.build.assets);
    let has_error = AtomicBool::new(false);

    log!("build"; "rendering {} pages", pages.len());
    let (pages_result, assets_result) = rayon::join(
        || render_pages(config, catalog, &pages, &has_error),
        || copy_assets(config, &assets, &has_error),
    );
    pages_result?;
    assets_result?;

    let sitemap = write_support_files(config, catalog, &pages)?;

    let report = BuildReport { pages: pages.len(), assets: assets.len(), sitemap };
    log!("build"; "done: {} pages, {} assets", report.pages, report.assets);
    Ok(report)
}

/// Create the output directory, emptying it first when `clean` is set.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

fn render_pages(config: &SiteConfig, catalog: &Catalog, pages: &[Page], has_error: &AtomicBool) -> Result<()> {
    let site = Site::new(config, catalog);
    pages.par_iter().try_for_each(|page| {
        if has_error.load(Ordering::Relaxed) {
            return Err(anyhow!("Aborted"));
        }
        let path = config.build.output.join(page.output_file());
        write_page(config, &site, page, &path).map_err(|err| {
            if !has_error.swap(true, Ordering::Relaxed) {
                log!("error"; "{}: {:#}", path.display(), err);
            }
            anyhow!("Build failed")
        })
    })
}

fn write_page(config: &SiteConfig, site: &Site<'_>, page: &Page, path: &Path) -> Result<()> {
    let html = site.render(page);
    let html = minify(MinifyType::Html(html.as_bytes()), config);
    write_file(path, &html)
}

fn copy_assets(config: &SiteConfig, files: &[PathBuf], has_error: &AtomicBool) -> Result<()> {
    let assets = &config.build.assets;
    files.par_iter().try_for_each(|source| {
        if has_error.load(Ordering::Relaxed) {
            return Err(anyhow!("Aborted"));
        }
        let relative = source.strip_prefix(assets).unwrap_or(source);
        let dest = config.build.output.join(relative);
        copy_file(source, &dest).map_err(|err| {
            if !has_error.swap(true, Ordering::Relaxed) {
                log!("error"; "{}: {:#}", source.display(), err);
            }
            anyhow!("Build failed")
        })
    })
}

/// Stylesheet, script, search index and sitemap. Returns whether a
/// sitemap was written.
fn write_support_files(config: &SiteConfig, catalog: &Catalog, pages: &[Page]) -> Result<bool> {
    let output = &config.build.output;
    write_file(&output.join(STYLESHEET_FILE), stylesheet(config).as_bytes())?;
    write_file(&output.join(SCRIPT_FILE), SCRIPT.as_bytes())?;

    if config.build.search_index.enable {
        let index = search_index::to_json(catalog)?;
        write_file(&output.join(&config.build.search_index.path), index.as_bytes())?;
    }

    build_sitemap(config, pages)
}

/// Every regular file under `dir`. A missing directory has no files.
pub fn collect_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect()
}

fn write_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, dest)
        .map(|_| ())
        .with_context(|| format!("Failed to copy to {}", dest.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::small_catalog;
    use tempfile::TempDir;

    fn config_in(dir: &Path) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.set_root(dir);
        config.build.output = dir.join("public");
        config.build.assets = dir.join("assets");
        config.build.minify = false;
        config
    }

    #[test]
    fn test_build_writes_every_page() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        let report = build_site(&config, &small_catalog()).unwrap();

        let out = &config.build.output;
        assert_eq!(report.pages, 8);
        assert!(out.join("index.html").is_file());
        assert!(out.join("404.html").is_file());
        assert!(out.join("documentation/index.html").is_file());
        assert!(out.join("documentation/string/index.html").is_file());
        assert!(out.join("documentation/math/is-nearly-equal/index.html").is_file());
        let css = fs::read_to_string(out.join("nodesplus.css")).unwrap();
        assert!(css.contains("@media (max-width: 767px)"));
        assert!(out.join("nodesplus.js").is_file());
        assert!(out.join("search-index.json").is_file());
        // no base url
        assert!(!report.sitemap);
    }

    #[test]
    fn test_build_copies_assets() {
        let dir = TempDir::new().unwrap();
        let config = config_in(dir.path());
        fs::create_dir_all(dir.path().join("assets/images")).unwrap();
        fs::write(dir.path().join("assets/images/variance.png"), b"png").unwrap();

        let report = build_site(&config, &small_catalog()).unwrap();
        assert_eq!(report.assets, 1);
        assert_eq!(
            fs::read(config.build.output.join("images/variance.png")).unwrap(),
            b"png"
        );
    }

    #[test]
    fn test_clean_removes_stale_files() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(dir.path());
        fs::create_dir_all(&config.build.output).unwrap();
        let stale = config.build.output.join("stale.html");
        fs::write(&stale, "old").unwrap();

        build_site(&config, &small_catalog()).unwrap();
        assert!(stale.exists());

        config.build.clean = true;
        build_site(&config, &small_catalog()).unwrap();
        assert!(!stale.exists());
    }

    #[test]
    fn test_build_with_sitemap_and_minify() {
        let dir = TempDir::new().unwrap();
        let mut config = config_in(dir.path());
        config.base.url = Some("https://nodesplus.dev".into());
        config.build.minify = true;

        let report = build_site(&config, &small_catalog()).unwrap();
        assert!(report.sitemap);
        let page = fs::read_to_string(config.build.output.join("documentation/math/index.html")).unwrap();
        assert!(page.contains("Math &amp; Calculations"));
        assert!(!page.contains("\n    "));
    }
}
