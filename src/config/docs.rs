//! `[docs]` section: behavior of the documentation browser.

use super::defaults;
use crate::{browser::BrowserSettings, environment::Theme};
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[docs]` section in nodesplus.toml.
///
/// # Example
/// ```toml
/// [docs]
/// mobile_breakpoint = 768
/// recent_limit = 5
/// theme = "dark"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct DocsConfig {
    /// Viewport width in CSS pixels below which the mobile layout is used.
    #[serde(default = "defaults::docs::mobile_breakpoint")]
    #[educe(Default = defaults::docs::mobile_breakpoint())]
    pub mobile_breakpoint: u32,

    /// Entries in the "recently viewed" list. 0 hides the list.
    #[serde(default = "defaults::docs::recent_limit")]
    #[educe(Default = defaults::docs::recent_limit())]
    pub recent_limit: usize,

    /// Theme pages are rendered with.
    #[serde(default = "defaults::docs::theme")]
    #[educe(Default = defaults::docs::theme())]
    pub theme: Theme,
}

impl DocsConfig {
    pub const fn browser_settings(&self) -> BrowserSettings {
        BrowserSettings {
            mobile_breakpoint: self.mobile_breakpoint,
            recent_limit: self.recent_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::SiteConfig;
    use crate::{browser::BrowserSettings, environment::Theme};

    #[test]
    fn test_docs_config_defaults() {
        let config: SiteConfig = toml::from_str("").unwrap();
        assert_eq!(config.docs.mobile_breakpoint, 768);
        assert_eq!(config.docs.recent_limit, 5);
        assert_eq!(config.docs.theme, Theme::Dark);
        assert_eq!(config.docs.browser_settings(), BrowserSettings::default());
    }

    #[test]
    fn test_docs_config_custom() {
        let config = r#"
            [docs]
            mobile_breakpoint = 1024
            recent_limit = 0
            theme = "light"
        "#;
        let config: SiteConfig = toml::from_str(config).unwrap();
        let settings = config.docs.browser_settings();
        assert_eq!(settings.mobile_breakpoint, 1024);
        assert_eq!(settings.recent_limit, 0);
        assert_eq!(config.docs.theme, Theme::Light);
    }

    #[test]
    fn test_unknown_theme_rejected() {
        assert!(toml::from_str::<SiteConfig>("[docs]\ntheme = \"sepia\"").is_err());
    }
}
