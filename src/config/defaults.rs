//! Default values for configuration fields, used by serde and educe.

use crate::environment::Theme;

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base]
// ============================================================================

pub mod base {
    pub fn title() -> String {
        "NodesPlus".into()
    }

    pub fn description() -> String {
        "Advanced Blueprint nodes for Unreal Engine".into()
    }

    pub fn author() -> String {
        "NodesPlus".into()
    }

    pub fn url() -> Option<String> {
        None
    }

    pub fn language() -> String {
        "en".into()
    }

    pub fn store_url() -> String {
        "https://www.fab.com/".into()
    }

    pub fn discord_url() -> String {
        "https://discord.gg/".into()
    }
}

// ============================================================================
// [build]
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn output() -> PathBuf {
        "public".into()
    }

    pub fn assets() -> PathBuf {
        "assets".into()
    }

    pub fn catalog() -> Option<PathBuf> {
        None
    }

    pub mod sitemap {
        use std::path::PathBuf;

        pub fn path() -> PathBuf {
            "sitemap.xml".into()
        }
    }

    pub mod search_index {
        use std::path::PathBuf;

        pub fn path() -> PathBuf {
            "search-index.json".into()
        }
    }
}

// ============================================================================
// [docs]
// ============================================================================

pub mod docs {
    use super::Theme;
    use crate::browser::{DEFAULT_MOBILE_BREAKPOINT, DEFAULT_RECENT_LIMIT};

    pub fn mobile_breakpoint() -> u32 {
        DEFAULT_MOBILE_BREAKPOINT
    }

    pub fn recent_limit() -> usize {
        DEFAULT_RECENT_LIMIT
    }

    pub fn theme() -> Theme {
        Theme::Dark
    }
}

// ============================================================================
// [serve]
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        5277
    }
}
