//! Development server.
//!
//! Static files come from the build output. `/documentation` routes are
//! rendered per request through a long-lived [`Session`], so `?q=` search
//! works without client script, unknown ids fall back instead of 404 and
//! the recently viewed list fills up while browsing.
//!
//! The page script reports key presses, clicks, sidebar toggles and
//! viewport resizes to `/__session/...` and gets the resulting state back
//! as JSON:
//!
//! | Endpoint                       | Session call                 |
//! |--------------------------------|------------------------------|
//! | `key?key=/&ctrl=0`             | `key`                        |
//! | `resize?width=400`             | `Resize` event               |
//! | `toggle-sidebar`               | `ToggleSidebar` event        |
//! | `select-category?id=math`      | `select_category`            |
//! | `select-node?id=variance`      | `select_node`                |
//! | `close-details`                | `close_details`              |
//! | `back-to-landing`              | `BackToLanding` event        |
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐
//! │   Main Thread   │     │  Watcher Thread  │
//! │  (HTTP Server)  │     │  (File Monitor)  │
//! └────────┬────────┘     └────────┬─────────┘
//!          │                       │
//!    /documentation/..       swap config and
//!    → Session → Site        catalog snapshots,
//!    other → public/         rebuild public/
//! ```

use crate::{
    analytics::LogAnalytics,
    browser::{BrowserState, DocsRoute, Effect, Effects, Event, Key, Session},
    catalog::{Catalog, store::catalog},
    config::{SiteConfig, cfg},
    environment::PageChrome,
    log,
    logger::log_error,
    site::Site,
    watch::watch_for_changes_blocking,
};
use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use std::{
    fs,
    io::Cursor,
    net::{IpAddr, SocketAddr},
    path::Path,
    sync::Arc,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

const MAX_PORT_RETRIES: u16 = 10;

/// Path prefix of the session endpoints.
const SESSION_PREFIX: &str = "/__session/";

type DocsSession = Session<PageChrome, LogAnalytics>;

/// Documentation session plus the catalog snapshot it was built on.
struct Docs {
    session: DocsSession,
    catalog: Arc<Catalog>,
}

impl Docs {
    fn new(config: &SiteConfig, catalog: Arc<Catalog>) -> Self {
        // Desktop until the page script reports the viewport width
        let state = BrowserState::new(config.docs.browser_settings(), u32::MAX);
        let theme = config.docs.theme;
        let session = Session::new(state, PageChrome::new(theme), LogAnalytics, theme, &config.base.title);
        Self { session, catalog }
    }

    /// Start over when the watcher swapped in a new catalog, so the session
    /// never mixes records from two snapshots.
    fn refresh(&mut self, config: &SiteConfig) {
        let current = catalog();
        if !Arc::ptr_eq(&current, &self.catalog) {
            *self = Self::new(config, current);
        }
    }
}

/// Serve until Ctrl+C.
pub fn serve_site() -> Result<()> {
    let config = cfg();
    let interface: IpAddr = config
        .serve
        .interface
        .parse()
        .with_context(|| format!("invalid interface `{}`", config.serve.interface))?;

    let (server, addr) = try_bind_port(interface, config.serve.port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);

    if config.serve.watch {
        std::thread::spawn(|| {
            if let Err(err) = watch_for_changes_blocking() {
                log_error("watch", &err);
            }
        });
    }

    let mut docs = Docs::new(&config, catalog());
    for request in server.incoming_requests() {
        // Fresh snapshot per request to pick up hot reloads
        let config = cfg();
        docs.refresh(&config);
        if let Err(err) = handle_request(request, &config, &mut docs) {
            log_error("request", &err);
        }
    }

    Ok(())
}

/// Bind `base_port`, moving up one port at a time while it is taken.
fn try_bind_port(interface: IpAddr, base_port: u16, max_retries: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;
    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);
        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(err) => last_error = Some(err),
        }
    }
    Err(anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        max_retries,
        base_port,
        base_port.saturating_add(max_retries.saturating_sub(1)),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

// ============================================================================
// Request Handling
// ============================================================================

/// Resolution order: session endpoint, documentation route, file,
/// directory index, 404.
fn handle_request(request: Request, config: &SiteConfig, docs: &mut Docs) -> Result<()> {
    let url = request.url().to_owned();

    if let Some(rest) = url.strip_prefix(SESSION_PREFIX) {
        return match SessionAction::parse(rest) {
            Some(action) => {
                let report = run_action(docs, action);
                serve_json(request, &serde_json::to_string(&report)?)
            }
            None => serve_not_found(request, config, docs, &url),
        };
    }

    if let Some(route) = DocsRoute::parse(&url) {
        let query = search_param(&url);
        return match render_docs(config, docs, route, &query) {
            DocsResponse::Page(html) => serve_html(request, html, StatusCode(200)),
            DocsResponse::Redirect(location) => serve_redirect(request, &location),
        };
    }

    let path = url.split(['?', '#']).next().unwrap_or_default();
    let path = urlencoding::decode(path).map(|p| p.into_owned()).unwrap_or_default();
    let relative = path.trim_matches('/');
    if relative.split('/').any(|segment| segment == "..") {
        return serve_not_found(request, config, docs, &path);
    }

    let local_path = config.build.output.join(relative);
    if local_path.is_file() {
        return serve_file(request, &local_path);
    }
    let index = local_path.join("index.html");
    if local_path.is_dir() && index.is_file() {
        return serve_file(request, &index);
    }

    serve_not_found(request, config, docs, &path)
}

#[derive(Debug, PartialEq, Eq)]
enum DocsResponse {
    Page(String),
    Redirect(String),
}

/// Bring the session to `route` with search term `query` and render it.
///
/// When the state lands somewhere else (unknown ids, node under the wrong
/// category) the client is sent to the canonical URL instead.
fn render_docs(config: &SiteConfig, docs: &mut Docs, route: DocsRoute, query: &str) -> DocsResponse {
    let catalog = Arc::clone(&docs.catalog);
    let session = &mut docs.session;

    if query != session.state().search_term() {
        if query.is_empty() {
            session.clear_search(&catalog);
        } else {
            session.handle_search(query, &catalog);
        }
    }

    let requested = route.to_string();
    session.open(route, &catalog);
    if session.current_path() != requested {
        return DocsResponse::Redirect(with_query(session.current_path(), query));
    }

    let site = Site::new(config, &catalog).with_session(SESSION_PREFIX);
    DocsResponse::Page(site.docs(session.state(), *session.env()))
}

/// Something the page script reports.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionAction {
    Key(Key),
    Resize(u32),
    ToggleSidebar,
    SelectCategory(String),
    SelectNode(String),
    CloseDetails,
    BackToLanding,
}

impl SessionAction {
    /// Parse the part of the URL after [`SESSION_PREFIX`].
    fn parse(rest: &str) -> Option<Self> {
        let name = rest.split(['?', '#']).next().unwrap_or_default();
        let param = |key: &str| query_param(rest, key);
        match name {
            "key" => parse_key(&param("key")?, param("ctrl").as_deref() == Some("1")).map(Self::Key),
            "resize" => param("width")?.parse().ok().map(Self::Resize),
            "toggle-sidebar" => Some(Self::ToggleSidebar),
            "select-category" => param("id").map(Self::SelectCategory),
            "select-node" => param("id").map(Self::SelectNode),
            "close-details" => Some(Self::CloseDetails),
            "back-to-landing" => Some(Self::BackToLanding),
            _ => None,
        }
    }
}

/// `Escape`, or a single character.
fn parse_key(name: &str, ctrl: bool) -> Option<Key> {
    if name == "Escape" {
        return Some(Key::Escape);
    }
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if ctrl => Some(Key::Ctrl(c)),
        (Some(c), None) => Some(Key::Char(c)),
        _ => None,
    }
}

/// Session state after an action, as the page script needs it.
#[derive(Debug, PartialEq, Eq, Serialize)]
struct SessionReport {
    /// Where the page should be, with the search term
    location: String,
    /// Whether `location` changed, i.e. the page must load it
    navigate: bool,
    sidebar_hidden: bool,
    focus_search: bool,
    theme: &'static str,
    help_open: bool,
}

fn run_action(docs: &mut Docs, action: SessionAction) -> SessionReport {
    let catalog = Arc::clone(&docs.catalog);
    let session = &mut docs.session;
    let before = location(session);

    let effects = match action {
        SessionAction::Key(key) => session.key(key, &catalog),
        SessionAction::Resize(width) => session.dispatch(Event::Resize { width }, &catalog),
        SessionAction::ToggleSidebar => session.dispatch(Event::ToggleSidebar, &catalog),
        SessionAction::SelectCategory(id) => session.select_category(&id, &catalog),
        SessionAction::SelectNode(id) => match catalog.node_by_id(&id) {
            Some(node) => session.select_node(node, &catalog),
            None => Effects::new(),
        },
        SessionAction::CloseDetails => session.close_details(&catalog),
        SessionAction::BackToLanding => session.dispatch(Event::BackToLanding, &catalog),
    };

    let location = location(session);
    SessionReport {
        navigate: location != before,
        location,
        sidebar_hidden: session.state().sidebar_hidden_on_mobile(&catalog),
        focus_search: effects.contains(&Effect::FocusSearch),
        theme: session.theme().attribute(),
        help_open: session.is_help_open(),
    }
}

fn location(session: &DocsSession) -> String {
    with_query(session.current_path(), session.state().search_term())
}

/// Value of the `q` query parameter, decoded. Empty when absent.
fn search_param(url: &str) -> String {
    query_param(url, "q").unwrap_or_default()
}

/// Decoded value of query parameter `key`.
fn query_param(url: &str, key: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix(key)?.strip_prefix('='))
        .map(|value| {
            let value = value.replace('+', " ");
            urlencoding::decode(&value).map(|v| v.into_owned()).unwrap_or(value)
        })
}

fn with_query(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_owned()
    } else {
        format!("{path}?q={}", urlencoding::encode(query))
    }
}

// ============================================================================
// Response Helpers
// ============================================================================

fn header(name: &str, value: &str) -> Result<Header> {
    Header::from_bytes(name, value).map_err(|()| anyhow!("invalid header {name}: {value}"))
}

fn serve_file(request: Request, path: &Path) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let response =
        Response::from_data(content).with_header(header("Content-Type", guess_content_type(path))?);
    request.respond(response)?;
    Ok(())
}

fn serve_html(request: Request, content: String, status: StatusCode) -> Result<()> {
    let response = Response::from_string(content)
        .with_status_code(status)
        .with_header(header("Content-Type", "text/html; charset=utf-8")?);
    request.respond(response)?;
    Ok(())
}

fn serve_json(request: Request, body: &str) -> Result<()> {
    let response = Response::from_string(body)
        .with_header(header("Content-Type", "application/json; charset=utf-8")?)
        .with_header(header("Cache-Control", "no-store")?);
    request.respond(response)?;
    Ok(())
}

fn serve_redirect(request: Request, location: &str) -> Result<()> {
    let response = Response::new(
        StatusCode(302),
        vec![header("Location", location)?],
        Cursor::new(Vec::new()),
        Some(0),
        None,
    );
    request.respond(response)?;
    Ok(())
}

fn serve_not_found(request: Request, config: &SiteConfig, docs: &Docs, path: &str) -> Result<()> {
    let html = Site::new(config, &docs.catalog).not_found(Some(path));
    serve_html(request, html, StatusCode(404))
}

/// MIME type by file extension.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",
        Some("txt") => "text/plain; charset=utf-8",

        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",

        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",

        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::small_catalog;

    fn docs() -> (SiteConfig, Docs) {
        let config = SiteConfig::default();
        let docs = Docs::new(&config, Arc::new(small_catalog()));
        (config, docs)
    }

    fn page(response: DocsResponse) -> String {
        match response {
            DocsResponse::Page(html) => html,
            DocsResponse::Redirect(location) => panic!("unexpected redirect to {location}"),
        }
    }

    #[test]
    fn test_search_param() {
        assert_eq!(search_param("/documentation"), "");
        assert_eq!(search_param("/documentation?q=float"), "float");
        assert_eq!(search_param("/documentation?x=1&q=is+nearly"), "is nearly");
        assert_eq!(search_param("/documentation?q=a%26b#top"), "a&b");
    }

    #[test]
    fn test_with_query() {
        assert_eq!(with_query("/documentation", ""), "/documentation");
        assert_eq!(with_query("/documentation", "a b"), "/documentation?q=a%20b");
    }

    #[test]
    fn test_render_docs_node() {
        let (config, mut docs) = docs();
        let html = page(render_docs(&config, &mut docs, DocsRoute::node("math", "is-nearly-equal"), ""));
        assert!(html.contains("node-details-panel"));
        assert_eq!(docs.session.state().recently_viewed().len(), 1);
    }

    #[test]
    fn test_render_docs_search() {
        let (config, mut docs) = docs();
        let html = page(render_docs(&config, &mut docs, DocsRoute::landing(), "print"));
        assert!(html.contains("Search Results (1)"));

        // dropping the query clears the search
        let html = page(render_docs(&config, &mut docs, DocsRoute::landing(), ""));
        assert!(!html.contains("Search Results"));
        assert_eq!(docs.session.state().search_term(), "");
    }

    #[test]
    fn test_render_docs_redirects_unknown_ids() {
        let (config, mut docs) = docs();
        assert_eq!(
            render_docs(&config, &mut docs, DocsRoute::node("math", "nope"), ""),
            DocsResponse::Redirect("/documentation/math".into())
        );
        assert_eq!(
            render_docs(&config, &mut docs, DocsRoute::node("debug", "is-nearly-equal"), "float"),
            DocsResponse::Redirect("/documentation/math/is-nearly-equal?q=float".into())
        );
    }

    #[test]
    fn test_query_param() {
        assert_eq!(query_param("/x?query=1&q=a", "q").as_deref(), Some("a"));
        assert_eq!(query_param("/x?width=400", "width").as_deref(), Some("400"));
        assert_eq!(query_param("/x", "id"), None);
    }

    #[test]
    fn test_session_action_parse() {
        assert_eq!(SessionAction::parse("key?key=%2F&ctrl=0"), Some(SessionAction::Key(Key::Char('/'))));
        assert_eq!(SessionAction::parse("key?key=t&ctrl=1"), Some(SessionAction::Key(Key::Ctrl('t'))));
        assert_eq!(SessionAction::parse("key?key=Escape"), Some(SessionAction::Key(Key::Escape)));
        assert_eq!(SessionAction::parse("key?key=Enter"), None);
        assert_eq!(SessionAction::parse("resize?width=400"), Some(SessionAction::Resize(400)));
        assert_eq!(SessionAction::parse("resize?width=wide"), None);
        assert_eq!(SessionAction::parse("toggle-sidebar"), Some(SessionAction::ToggleSidebar));
        assert_eq!(
            SessionAction::parse("select-node?id=variance"),
            Some(SessionAction::SelectNode("variance".into()))
        );
        assert_eq!(SessionAction::parse("select-category"), None);
        assert_eq!(SessionAction::parse("reboot"), None);
    }

    #[test]
    fn test_mobile_session_hides_sidebar_for_nodes() {
        let (config, mut docs) = docs();
        let report = run_action(&mut docs, SessionAction::Resize(400));
        assert!(!report.sidebar_hidden);
        assert!(!report.navigate);

        let report = run_action(&mut docs, SessionAction::SelectNode("hello-world".into()));
        assert!(report.navigate);
        assert_eq!(report.location, "/documentation/debug/hello-world");
        assert!(report.sidebar_hidden);

        // the page load that follows shows the same state
        let html = page(render_docs(&config, &mut docs, DocsRoute::node("debug", "hello-world"), ""));
        assert!(html.contains(r#"<div class="docs-layout sidebar-hidden">"#));
        assert!(html.contains(r#"<aside class="docs-sidebar" aria-hidden="true">"#));

        let report = run_action(&mut docs, SessionAction::ToggleSidebar);
        assert!(!report.sidebar_hidden);
        assert!(!report.navigate);

        let report = run_action(&mut docs, SessionAction::SelectCategory("math".into()));
        assert_eq!(report.location, "/documentation/math");
        assert!(!report.sidebar_hidden);
    }

    #[test]
    fn test_session_keys() {
        let (config, mut docs) = docs();
        page(render_docs(&config, &mut docs, DocsRoute::node("debug", "hello-world"), "print"));

        let report = run_action(&mut docs, SessionAction::Key(Key::Char('/')));
        assert!(report.focus_search);
        assert!(!report.navigate);

        let report = run_action(&mut docs, SessionAction::Key(Key::Char('?')));
        assert!(report.help_open);
        let html = page(render_docs(&config, &mut docs, DocsRoute::node("debug", "hello-world"), "print"));
        assert!(html.contains(r#"<div class="shortcuts-help">"#));
        assert!(html.contains("no-scroll"));

        // help first, then the search, then the detail view
        assert!(!run_action(&mut docs, SessionAction::Key(Key::Escape)).help_open);
        let report = run_action(&mut docs, SessionAction::Key(Key::Escape));
        assert_eq!(report.location, "/documentation/debug/hello-world");
        assert!(report.navigate);
        let report = run_action(&mut docs, SessionAction::Key(Key::Escape));
        assert_eq!(report.location, "/documentation/debug");

        let report = run_action(&mut docs, SessionAction::Key(Key::Ctrl('t')));
        assert_eq!(report.theme, "light");
        let report = run_action(&mut docs, SessionAction::Key(Key::Ctrl('h')));
        assert_eq!(report.location, "/documentation");
    }

    #[test]
    fn test_unknown_node_action_changes_nothing() {
        let (_, mut docs) = docs();
        let report = run_action(&mut docs, SessionAction::SelectNode("nope".into()));
        assert!(!report.navigate);
        assert_eq!(report.location, "/documentation");
    }

    #[test]
    fn test_rendered_docs_report_to_session() {
        let (config, mut docs) = docs();
        let html = page(render_docs(&config, &mut docs, DocsRoute::landing(), ""));
        assert!(html.contains(r#"data-session="/__session/""#));
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type(Path::new("nodesplus.css")), "text/css; charset=utf-8");
        assert_eq!(guess_content_type(Path::new("search-index.json")), "application/json; charset=utf-8");
        assert_eq!(guess_content_type(Path::new("blob")), "application/octet-stream");
    }
}
