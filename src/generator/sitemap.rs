//! sitemap.xml for the home page and every documentation page.
//!
//! Needs `[base] url`: sitemap locations must be absolute.

use crate::{
    config::SiteConfig,
    log,
    site::Page,
    utils::minify::{MinifyType, minify},
};
use anyhow::{Context, Result};
use std::{fs, path::Path};

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Write the sitemap if enabled. Returns whether a file was written.
pub fn build_sitemap(config: &SiteConfig, pages: &[Page]) -> Result<bool> {
    let Some(path) = config.sitemap_path() else {
        return Ok(false);
    };

    let lastmod = chrono::Local::now().format("%Y-%m-%d").to_string();
    let xml = sitemap_xml(config, pages, &lastmod);
    write(&path, &minify(MinifyType::Xml(xml.as_bytes()), config))?;

    log!("sitemap"; "{} urls", pages.iter().filter(|p| p.url_path().is_some()).count());
    Ok(true)
}

fn write(path: &Path, xml: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, xml).with_context(|| format!("Failed to write sitemap to {}", path.display()))
}

fn sitemap_xml(config: &SiteConfig, pages: &[Page], lastmod: &str) -> String {
    let mut xml = String::with_capacity(128 * pages.len());
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str(&format!("<urlset xmlns=\"{SITEMAP_NS}\">\n"));

    let locations = pages
        .iter()
        .filter_map(Page::url_path)
        .filter_map(|path| config.base.absolute_url(&path));
    for loc in locations {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&loc)));
        xml.push_str(&format!("    <lastmod>{lastmod}</lastmod>\n"));
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
