//! `[base]` section: site identity and outbound links.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in nodesplus.toml.
///
/// # Example
/// ```toml
/// [base]
/// title = "NodesPlus"
/// url = "https://nodesplus.dev"
/// store_url = "https://www.fab.com/listings/nodesplus"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Product name, shown in the navbar and page titles.
    #[serde(default = "defaults::base::title")]
    #[educe(Default = defaults::base::title())]
    pub title: String,

    /// Meta description of the home page.
    #[serde(default = "defaults::base::description")]
    #[educe(Default = defaults::base::description())]
    pub description: String,

    /// Publisher named in structured data.
    #[serde(default = "defaults::base::author")]
    #[educe(Default = defaults::base::author())]
    pub author: String,

    /// Public URL of the site. Required for the sitemap and canonical links.
    #[serde(default = "defaults::base::url")]
    #[educe(Default = defaults::base::url())]
    pub url: Option<String>,

    /// `lang` attribute of every page.
    #[serde(default = "defaults::base::language")]
    #[educe(Default = defaults::base::language())]
    pub language: String,

    /// Footer text. Empty means "© {year} {title}".
    #[serde(default)]
    pub copyright: String,

    /// Marketplace listing linked from the navbar and hero.
    #[serde(default = "defaults::base::store_url")]
    #[educe(Default = defaults::base::store_url())]
    pub store_url: String,

    /// Community invite linked from the navbar and home page.
    #[serde(default = "defaults::base::discord_url")]
    #[educe(Default = defaults::base::discord_url())]
    pub discord_url: String,
}

impl BaseConfig {
    /// Absolute URL for a site path, if `url` is set.
    pub fn absolute_url(&self, path: &str) -> Option<String> {
        self.url
            .as_deref()
            .map(|base| format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/')))
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;

    #[test]
    fn test_base_config_full() {
        let config = r#"
            [base]
            title = "NodesPlus"
            description = "Blueprint nodes"
            url = "https://nodesplus.dev"
            language = "en-US"
            copyright = "2025 NodesPlus"
            discord_url = "https://discord.gg/nodesplus"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();

        assert_eq!(config.base.title, "NodesPlus");
        assert_eq!(config.base.url.as_deref(), Some("https://nodesplus.dev"));
        assert_eq!(config.base.language, "en-US");
        assert_eq!(config.base.copyright, "2025 NodesPlus");
        assert_eq!(config.base.discord_url, "https://discord.gg/nodesplus");
    }

    #[test]
    fn test_base_config_defaults() {
        let config: SiteConfig = toml::from_str("[base]").unwrap();

        assert_eq!(config.base.title, "NodesPlus");
        assert_eq!(config.base.language, "en");
        assert_eq!(config.base.url, None);
        assert_eq!(config.base.copyright, "");
        assert!(config.base.store_url.starts_with("https://"));
    }

    #[test]
    fn test_unknown_field_rejection() {
        let config = r#"
            [base]
            unknown_field = "should_fail"
        "#;
        let err = toml::from_str::<SiteConfig>(config).unwrap_err().to_string();
        assert!(err.contains("unknown field"));
    }

    #[test]
    fn test_absolute_url() {
        let mut config = SiteConfig::default();
        assert_eq!(config.base.absolute_url("/documentation"), None);

        config.base.url = Some("https://nodesplus.dev/".into());
        assert_eq!(
            config.base.absolute_url("/documentation/math"),
            Some("https://nodesplus.dev/documentation/math".into())
        );
        assert_eq!(config.base.absolute_url("/"), Some("https://nodesplus.dev/".into()));
    }
}
