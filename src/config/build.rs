//! `[build]` section: where the catalog comes from and what the build writes.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in nodesplus.toml.
///
/// # Example
/// ```toml
/// [build]
/// output = "public"
/// assets = "assets"
/// catalog = "catalog/nodes.json"   # omit to use the built-in catalog
/// minify = true
///
/// [build.sitemap]
/// enable = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (usually set via CLI `--root`).
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Build output directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Static files copied verbatim (CSS, scripts, images).
    #[serde(default = "defaults::build::assets")]
    #[educe(Default = defaults::build::assets())]
    pub assets: PathBuf,

    /// Node catalog JSON. `None` uses the catalog compiled into the binary.
    #[serde(default = "defaults::build::catalog")]
    #[educe(Default = defaults::build::catalog())]
    pub catalog: Option<PathBuf>,

    /// Minify HTML and XML output.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub minify: bool,

    /// Remove the output directory before building.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = false)]
    pub clean: bool,

    #[serde(default)]
    pub sitemap: SitemapConfig,

    #[serde(default)]
    pub search_index: SearchIndexConfig,
}

/// `[build.sitemap]` section. Needs `[base] url`.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SitemapConfig {
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Output path, relative to the output directory.
    #[serde(default = "defaults::build::sitemap::path")]
    #[educe(Default = defaults::build::sitemap::path())]
    pub path: PathBuf,
}

/// `[build.search_index]` section: JSON index for client-side search.
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SearchIndexConfig {
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub enable: bool,

    /// Output path, relative to the output directory.
    #[serde(default = "defaults::build::search_index::path")]
    #[educe(Default = defaults::build::search_index::path())]
    pub path: PathBuf,
}
