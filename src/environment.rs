//! Page chrome the browser shell can change: the color theme and whether
//! the page body scrolls.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Site color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub const fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Class put on `<body>`.
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Dark => "dark-theme",
            Self::Light => "light-theme",
        }
    }

    /// Value of the `data-theme` attribute on `<html>`.
    pub const fn attribute(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute())
    }
}

/// Side effects on the surrounding page.
pub trait Environment {
    fn set_body_scroll_locked(&mut self, locked: bool);
    fn set_theme_attribute(&mut self, theme: Theme);
}

/// Chrome state of a server-rendered page.
///
/// Whatever the shell sets here ends up as attributes on the rendered
/// `<html>` and `<body>` tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageChrome {
    pub theme: Theme,
    pub scroll_locked: bool,
}

impl PageChrome {
    pub const fn new(theme: Theme) -> Self {
        Self { theme, scroll_locked: false }
    }

    /// Classes for the `<body>` tag.
    pub fn body_class(&self) -> String {
        if self.scroll_locked {
            format!("{} no-scroll", self.theme.class_name())
        } else {
            self.theme.class_name().to_owned()
        }
    }
}

impl Environment for PageChrome {
    fn set_body_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    fn set_theme_attribute(&mut self, theme: Theme) {
        self.theme = theme;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::default(), Theme::Dark);
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
        assert_eq!(Theme::Dark.toggle().toggle(), Theme::Dark);
    }

    #[test]
    fn test_theme_names() {
        assert_eq!(Theme::Light.class_name(), "light-theme");
        assert_eq!(Theme::Dark.attribute(), "dark");
        assert_eq!(Theme::Light.to_string(), "light");
    }

    #[test]
    fn test_theme_deserialize() {
        #[derive(Deserialize)]
        struct Wrapper {
            theme: Theme,
        }
        let parsed: Wrapper = toml::from_str(r#"theme = "light""#).unwrap();
        assert_eq!(parsed.theme, Theme::Light);
        assert!(toml::from_str::<Wrapper>(r#"theme = "blue""#).is_err());
    }

    #[test]
    fn test_page_chrome() {
        let mut chrome = PageChrome::new(Theme::Dark);
        assert_eq!(chrome.body_class(), "dark-theme");

        chrome.set_theme_attribute(Theme::Light);
        chrome.set_body_scroll_locked(true);
        assert_eq!(chrome.theme, Theme::Light);
        assert_eq!(chrome.body_class(), "light-theme no-scroll");
    }
}
