//! Site rendering.
//!
//! Pages are plain strings: an embedded layout filled with a body from
//! [`pages`]. Documentation pages are always rendered from a
//! [`BrowserState`], so the static build and the dev server show the same
//! thing for the same state.

pub mod html;
pub mod pages;
pub mod search_index;
pub mod structured;

use crate::{
    browser::{BrowserState, DocsRoute, ViewMode},
    catalog::Catalog,
    config::SiteConfig,
    environment::PageChrome,
};
use html::{escape, fill};

pub const LAYOUT: &str = include_str!("../embed/site/layout.html");
pub const STYLESHEET: &str = include_str!("../embed/site/nodesplus.css");
pub const SCRIPT: &str = include_str!("../embed/site/nodesplus.js");

pub const STYLESHEET_FILE: &str = "nodesplus.css";
pub const SCRIPT_FILE: &str = "nodesplus.js";
pub const NOT_FOUND_FILE: &str = "404.html";

/// The stylesheet with its media query set to `[docs] mobile_breakpoint`.
pub fn stylesheet(config: &SiteConfig) -> String {
    let mobile_max = config.docs.mobile_breakpoint.saturating_sub(1).to_string();
    fill(STYLESHEET, &[("mobile_max", mobile_max.as_str())])
}

/// One output page of the static site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Home,
    Docs(DocsRoute),
    NotFound,
}

impl Page {
    /// Every page of the site: home, the documentation landing, one page per
    /// category and one per node, and the 404 page.
    pub fn all(catalog: &Catalog) -> Vec<Self> {
        let mut pages = vec![Self::Home, Self::Docs(DocsRoute::landing())];
        pages.extend(
            catalog
                .categories()
                .iter()
                .map(|category| Self::Docs(DocsRoute::category(&category.id))),
        );
        pages.extend(
            catalog
                .nodes()
                .iter()
                .map(|node| Self::Docs(DocsRoute::node(&node.category, &node.id))),
        );
        pages.push(Self::NotFound);
        pages
    }

    /// URL path, `None` for pages that are not linked (404).
    pub fn url_path(&self) -> Option<String> {
        match self {
            Self::Home => Some("/".into()),
            Self::Docs(route) => Some(route.to_string()),
            Self::NotFound => None,
        }
    }

    /// File relative to the output directory.
    pub fn output_file(&self) -> String {
        match self {
            Self::Home => "index.html".into(),
            Self::Docs(route) => route.output_file(),
            Self::NotFound => NOT_FOUND_FILE.into(),
        }
    }
}

/// Which navbar link is active.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Home,
    Docs,
    Other,
}

/// Head and body of one page before it goes into the layout.
struct Document {
    title: String,
    description: String,
    path: Option<String>,
    structured_data: Option<serde_json::Value>,
    section: Section,
    chrome: PageChrome,
    content: String,
}

/// Renders pages for one config and catalog.
pub struct Site<'a> {
    config: &'a SiteConfig,
    catalog: &'a Catalog,
    /// `dateModified` of the documentation articles
    modified: String,
    /// Endpoint of a live browsing session the page script reports to
    session: Option<&'a str>,
}

impl<'a> Site<'a> {
    pub fn new(config: &'a SiteConfig, catalog: &'a Catalog) -> Self {
        Self {
            config,
            catalog,
            modified: chrono::Local::now().format("%Y-%m-%d").to_string(),
            session: None,
        }
    }

    /// Render pages that send key presses and clicks to `endpoint`.
    pub fn with_session(mut self, endpoint: &'a str) -> Self {
        self.session = Some(endpoint);
        self
    }

    /// Render a static page with the configured theme.
    pub fn render(&self, page: &Page) -> String {
        let chrome = PageChrome::new(self.config.docs.theme);
        match page {
            Page::Home => self.home(),
            Page::Docs(route) => {
                let state =
                    BrowserState::at_route(route, self.catalog, self.config.docs.browser_settings());
                self.docs(&state, chrome)
            }
            Page::NotFound => self.not_found(None),
        }
    }

    pub fn home(&self) -> String {
        let base = &self.config.base;
        self.layout(Document {
            title: format!("{} | Extended Blueprint Nodes for Unreal Engine", base.title),
            description: base.description.clone(),
            path: Some("/".into()),
            structured_data: Some(structured::software_application(
                self.config,
                self.catalog.nodes().len(),
            )),
            section: Section::Home,
            chrome: PageChrome::new(self.config.docs.theme),
            content: pages::home(self.config, self.catalog),
        })
    }

    /// Documentation page for `state`, with the theme and scroll lock from
    /// `chrome`.
    pub fn docs(&self, state: &BrowserState, chrome: PageChrome) -> String {
        let site = &self.config.base.title;
        let title = state.page_title(self.catalog, site);
        let description = match state.view_mode(self.catalog) {
            ViewMode::Landing => format!("Documentation for every {site} Blueprint node."),
            ViewMode::CategoryDetail(category) => category.description.clone(),
            ViewMode::NodeDetail(node) => node.short_description.clone(),
        };
        let path = state.route().to_string();
        let structured_data =
            structured::tech_article(self.config, &title, &description, &path, &self.modified);

        self.layout(Document {
            title,
            description,
            path: Some(path),
            structured_data: Some(structured_data),
            section: Section::Docs,
            chrome,
            content: pages::docs(self.config, self.catalog, state, chrome.theme),
        })
    }

    /// 404 page, mentioning `path` when known.
    pub fn not_found(&self, path: Option<&str>) -> String {
        self.layout(Document {
            title: format!("Page not found | {}", self.config.base.title),
            description: self.config.base.description.clone(),
            path: None,
            structured_data: None,
            section: Section::Other,
            chrome: PageChrome::new(self.config.docs.theme),
            content: pages::not_found(path),
        })
    }

    fn layout(&self, doc: Document) -> String {
        let base = &self.config.base;
        let canonical = doc
            .path
            .as_deref()
            .and_then(|path| base.absolute_url(path))
            .map(|url| format!(r#"<link rel="canonical" href="{}">"#, escape(&url)))
            .unwrap_or_default();
        let structured_data = doc
            .structured_data
            .as_ref()
            .map(structured::script_tag)
            .unwrap_or_default();
        let active = |section: Section| if doc.section == section { "active" } else { "" };
        let session = self
            .session
            .map(|endpoint| format!(r#" data-session="{}""#, escape(endpoint)))
            .unwrap_or_default();
        // The help dialog is what locks the page scroll
        let help_hidden = if doc.chrome.scroll_locked { "" } else { " hidden" };

        // `content` goes last so placeholders inside catalog text stay as typed
        fill(
            LAYOUT,
            &[
                ("lang", escape(&base.language).as_str()),
                ("theme", doc.chrome.theme.attribute()),
                ("title", escape(&doc.title).as_str()),
                ("description", escape(&doc.description).as_str()),
                ("canonical", canonical.as_str()),
                ("structured_data", structured_data.as_str()),
                ("body_class", doc.chrome.body_class().as_str()),
                ("session", session.as_str()),
                ("help_hidden", help_hidden),
                ("site", escape(&base.title).as_str()),
                ("home_class", active(Section::Home)),
                ("docs_class", active(Section::Docs)),
                ("store_url", escape(&base.store_url).as_str()),
                ("discord_url", escape(&base.discord_url).as_str()),
                ("copyright", escape(&self.config.copyright()).as_str()),
                ("content", doc.content.as_str()),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog::tests::small_catalog, environment::Theme};

    #[test]
    fn test_all_pages() {
        let catalog = small_catalog();
        let pages = Page::all(&catalog);
        // home, landing, 3 categories, 2 nodes, 404
        assert_eq!(pages.len(), 8);
        assert_eq!(pages[0].output_file(), "index.html");
        assert_eq!(pages[1].output_file(), "documentation/index.html");
        assert!(pages.contains(&Page::Docs(DocsRoute::node("math", "is-nearly-equal"))));
        assert_eq!(pages.last().map(Page::output_file).as_deref(), Some("404.html"));
        assert_eq!(Page::NotFound.url_path(), None);
    }

    #[test]
    fn test_layout_filled() {
        let catalog = small_catalog();
        let config = SiteConfig::default();
        let html = Site::new(&config, &catalog).render(&Page::Docs(DocsRoute::category("math")));

        assert!(html.contains("<title>Math &amp; Calculations | NodesPlus Documentation</title>"));
        assert!(html.contains(r#"<meta name="description" content="Math nodes">"#));
        assert!(html.contains(r#"class="active" href="/documentation""#));
        assert!(html.contains(r#""@type":"TechArticle""#));
        // no site url, no canonical link
        assert!(!html.contains(r#"rel="canonical""#));
        assert!(!html.contains("{content}"));
    }

    #[test]
    fn test_canonical_with_url() {
        let catalog = small_catalog();
        let mut config = SiteConfig::default();
        config.base.url = Some("https://nodesplus.dev".into());
        let html = Site::new(&config, &catalog).render(&Page::Home);

        assert!(html.contains(r#"<link rel="canonical" href="https://nodesplus.dev/">"#));
        assert!(html.contains(r#""@type":"SoftwareApplication""#));
    }

    #[test]
    fn test_chrome_reaches_markup() {
        let catalog = small_catalog();
        let config = SiteConfig::default();
        let site = Site::new(&config, &catalog);
        let state = BrowserState::at_route(&DocsRoute::landing(), &catalog, config.docs.browser_settings());

        let chrome = PageChrome { theme: Theme::Light, scroll_locked: true };
        let html = site.docs(&state, chrome);
        assert!(html.contains(r#"data-theme="light""#));
        assert!(html.contains(r#"<body class="light-theme no-scroll">"#));
    }

    #[test]
    fn test_stylesheet_breakpoint() {
        let mut config = SiteConfig::default();
        assert!(stylesheet(&config).contains("@media (max-width: 767px) {"));

        config.docs.mobile_breakpoint = 1024;
        let css = stylesheet(&config);
        assert!(css.contains("@media (max-width: 1023px) {"));
        assert!(!css.contains("{mobile_max}"));
    }

    #[test]
    fn test_node_page_markup_on_mobile() {
        let catalog = small_catalog();
        let config = SiteConfig::default();
        let html = Site::new(&config, &catalog).render(&Page::Docs(DocsRoute::node("debug", "hello-world")));
        assert!(html.contains(r#"<div class="docs-layout sidebar-hidden">"#));

        let html = Site::new(&config, &catalog).render(&Page::Docs(DocsRoute::category("debug")));
        assert!(html.contains(r#"<div class="docs-layout">"#));
    }

    #[test]
    fn test_session_attribute() {
        let catalog = small_catalog();
        let config = SiteConfig::default();
        let state = BrowserState::at_route(&DocsRoute::landing(), &catalog, config.docs.browser_settings());
        let chrome = PageChrome::new(Theme::Dark);

        let html = Site::new(&config, &catalog).docs(&state, chrome);
        assert!(!html.contains("data-session"));
        assert!(html.contains(r#"<div class="shortcuts-help" hidden>"#));

        let html = Site::new(&config, &catalog).with_session("/__session/").docs(&state, chrome);
        assert!(html.contains(r#"<body class="dark-theme" data-session="/__session/">"#));
    }

    #[test]
    fn test_not_found_page() {
        let catalog = small_catalog();
        let config = SiteConfig::default();
        let html = Site::new(&config, &catalog).not_found(Some("/missing"));
        assert!(html.contains("<title>Page not found | NodesPlus</title>"));
        assert!(html.contains("<code>/missing</code>"));
    }
}
