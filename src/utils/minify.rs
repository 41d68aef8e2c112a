//! Output minification, switched by `[build] minify`.

use crate::config::SiteConfig;
use std::borrow::Cow;

/// What is being minified.
pub enum MinifyType<'a> {
    /// A rendered page
    Html(&'a [u8]),
    /// sitemap.xml
    Xml(&'a [u8]),
}

/// Minify `content` when enabled, pass it through untouched otherwise.
pub fn minify<'a>(content: MinifyType<'a>, config: &SiteConfig) -> Cow<'a, [u8]> {
    match content {
        MinifyType::Html(html) if config.build.minify => Cow::Owned(minify_html(html)),
        MinifyType::Xml(xml) if config.build.minify => Cow::Owned(minify_xml(xml)),
        MinifyType::Html(bytes) | MinifyType::Xml(bytes) => Cow::Borrowed(bytes),
    }
}

fn minify_html(html: &[u8]) -> Vec<u8> {
    let mut cfg = minify_html::Cfg::new();
    cfg.keep_closing_tags = true;
    cfg.keep_html_and_head_opening_tags = true;
    cfg.minify_css = true;
    cfg.minify_js = true;
    minify_html::minify(html, &cfg)
}

/// Drop indentation and blank lines. Text nodes never span lines in the
/// sitemap, so this is lossless there.
fn minify_xml(xml: &[u8]) -> Vec<u8> {
    String::from_utf8_lossy(xml)
        .lines()
        .map(str::trim)
        .collect::<String>()
        .into_bytes()
}
