//! Documentation browser state and its reducer.
//!
//! [`reduce`] is a pure function from the current state and one [`Event`]
//! to the next state plus the [`Effect`]s the shell must carry out (URL
//! writes, analytics). Each event is handled to completion before the next
//! one, so rapid input simply means the last event wins.
//!
//! # View Mode
//!
//! | Priority | Condition                         | View            |
//! |----------|-----------------------------------|-----------------|
//! | 1        | a node is selected                | Node detail     |
//! | 2        | selected category exists          | Category detail |
//! | 3        | otherwise                         | Landing         |

use super::{
    event::{Effect, Effects, Event, Shortcut},
    route::DocsRoute,
};
use crate::{
    analytics::AnalyticsEvent,
    catalog::{Catalog, Category, NodeRecord, is_active_term},
};
use std::sync::Arc;

/// Widths below this many CSS pixels use the mobile layout.
pub const DEFAULT_MOBILE_BREAKPOINT: u32 = 768;

/// How many recently viewed nodes the sidebar keeps.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Layout knobs, normally taken from the `[docs]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrowserSettings {
    pub mobile_breakpoint: u32,
    pub recent_limit: usize,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            mobile_breakpoint: DEFAULT_MOBILE_BREAKPOINT,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

/// What the main panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    Landing,
    CategoryDetail(Arc<Category>),
    NodeDetail(Arc<NodeRecord>),
}

/// Transient selection state of one documentation view.
#[derive(Debug, Clone)]
pub struct BrowserState {
    selected_category: Option<String>,
    selected_node: Option<Arc<NodeRecord>>,
    search_term: String,
    filtered_nodes: Vec<Arc<NodeRecord>>,
    is_mobile: bool,
    sidebar_visible: bool,
    /// Most recent first, without duplicates
    recently_viewed: Vec<Arc<NodeRecord>>,
    settings: BrowserSettings,
}

/// Result of one reducer step.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: BrowserState,
    pub effects: Effects,
}

impl BrowserState {
    /// Fresh state for a viewport `width` pixels wide.
    pub fn new(settings: BrowserSettings, width: u32) -> Self {
        Self {
            selected_category: None,
            selected_node: None,
            search_term: String::new(),
            filtered_nodes: Vec::new(),
            is_mobile: width < settings.mobile_breakpoint,
            sidebar_visible: true,
            recently_viewed: Vec::new(),
            settings,
        }
    }

    /// Desktop state opened at `route`, as the static build renders it.
    pub fn at_route(route: &DocsRoute, catalog: &Catalog, settings: BrowserSettings) -> Self {
        let mut state = Self::new(settings, u32::MAX);
        state.apply(Event::Load(route.clone()), catalog);
        state
    }

    /// Run one event through [`reduce`] and keep the result.
    pub fn apply(&mut self, event: Event, catalog: &Catalog) -> Effects {
        let Transition { state, effects } = reduce(self, event, catalog);
        *self = state;
        effects
    }

    // ------------------------------------------------------------------------
    // Operations used by the page shell
    // ------------------------------------------------------------------------

    pub fn handle_search(&mut self, term: &str, catalog: &Catalog) -> Effects {
        self.apply(Event::Search(term.to_owned()), catalog)
    }

    pub fn clear_search(&mut self, catalog: &Catalog) -> Effects {
        self.apply(Event::ClearSearch, catalog)
    }

    pub fn select_category(&mut self, id: &str, catalog: &Catalog) -> Effects {
        self.apply(Event::SelectCategory(id.to_owned()), catalog)
    }

    pub fn select_node(&mut self, node: Arc<NodeRecord>, catalog: &Catalog) -> Effects {
        self.apply(Event::SelectNode(node), catalog)
    }

    pub fn close_details(&mut self, catalog: &Catalog) -> Effects {
        self.apply(Event::CloseDetails, catalog)
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    pub fn selected_node(&self) -> Option<&Arc<NodeRecord>> {
        self.selected_node.as_ref()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn filtered_nodes(&self) -> &[Arc<NodeRecord>] {
        &self.filtered_nodes
    }

    #[cfg(test)]
    pub const fn is_mobile(&self) -> bool {
        self.is_mobile
    }

    pub const fn is_sidebar_visible(&self) -> bool {
        self.sidebar_visible
    }

    pub fn recently_viewed(&self) -> &[Arc<NodeRecord>] {
        &self.recently_viewed
    }

    /// Whether the sidebar is hidden once the viewport is narrower than the
    /// breakpoint. Desktop states answer for the layout they would switch to.
    pub fn sidebar_hidden_on_mobile(&self, catalog: &Catalog) -> bool {
        if self.is_mobile {
            return !self.sidebar_visible;
        }
        !reduce(self, Event::Resize { width: 0 }, catalog).state.sidebar_visible
    }

    /// Whether the sidebar lists search results instead of categories.
    pub fn is_searching(&self) -> bool {
        !self.search_term.is_empty()
    }

    /// URL path matching the current selection.
    pub fn route(&self) -> DocsRoute {
        match (&self.selected_node, &self.selected_category) {
            (Some(node), _) => DocsRoute::node(&node.category, &node.id),
            (None, Some(category)) => DocsRoute::category(category),
            (None, None) => DocsRoute::landing(),
        }
    }

    /// Derive the main panel view.
    pub fn view_mode(&self, catalog: &Catalog) -> ViewMode {
        if let Some(node) = &self.selected_node {
            return ViewMode::NodeDetail(Arc::clone(node));
        }
        self.selected_category
            .as_deref()
            .and_then(|id| catalog.category(id))
            .map_or(ViewMode::Landing, ViewMode::CategoryDetail)
    }

    /// Document title, e.g. `Variance | NodesPlus Documentation`.
    pub fn page_title(&self, catalog: &Catalog, site: &str) -> String {
        match self.view_mode(catalog) {
            ViewMode::Landing => format!("{site} Documentation"),
            ViewMode::CategoryDetail(category) => format!("{} | {site} Documentation", category.name),
            ViewMode::NodeDetail(node) => format!("{} | {site} Documentation", node.name),
        }
    }

    // ------------------------------------------------------------------------
    // Transition helpers
    // ------------------------------------------------------------------------

    /// Search results while a search is active, else the selected
    /// category's nodes, else nothing.
    fn refresh_filtered(&mut self, catalog: &Catalog) {
        self.filtered_nodes = if is_active_term(&self.search_term) {
            catalog.search(&self.search_term)
        } else {
            self.category_nodes(catalog)
        };
    }

    fn category_nodes(&self, catalog: &Catalog) -> Vec<Arc<NodeRecord>> {
        self.selected_category
            .as_deref()
            .map(|id| catalog.nodes_by_category(id))
            .unwrap_or_default()
    }

    fn remember(&mut self, node: &Arc<NodeRecord>) {
        self.recently_viewed.retain(|seen| seen.id != node.id);
        self.recently_viewed.insert(0, Arc::clone(node));
        self.recently_viewed.truncate(self.settings.recent_limit);
    }

    fn load(&mut self, route: &DocsRoute, catalog: &Catalog, effects: &mut Effects) {
        // Category first, then node, in one step: no category-only state
        // is ever observable in between.
        let category = route.category.as_deref().and_then(|id| catalog.category(id));
        let node = category
            .as_ref()
            .and(route.node.as_deref())
            .and_then(|id| catalog.node_by_id(id));

        self.selected_category = category.map(|c| c.id.clone());
        self.selected_node = None;
        if let Some(node) = node {
            self.selected_category = Some(node.category.clone());
            self.remember(&node);
            self.selected_node = Some(node);
        }
        self.refresh_filtered(catalog);

        if self.is_mobile {
            self.sidebar_visible = self.selected_node.is_none();
        }

        let canonical = self.route();
        if canonical != *route {
            effects.push(Effect::replace(&canonical));
        }
    }

    fn search(&mut self, term: String, catalog: &Catalog, effects: &mut Effects) {
        self.search_term = term;
        self.refresh_filtered(catalog);

        if is_active_term(&self.search_term) {
            effects.push(Effect::Track(AnalyticsEvent::SearchPerformed {
                term: self.search_term.clone(),
                result_count: self.filtered_nodes.len(),
            }));
        }
    }

    fn clear(&mut self, catalog: &Catalog) {
        self.search_term.clear();
        self.refresh_filtered(catalog);
    }

    fn select_category_inner(&mut self, id: String, catalog: &Catalog, effects: &mut Effects) {
        let name = catalog
            .category(&id)
            .map_or_else(|| id.clone(), |c| c.name.clone());

        self.selected_node = None;
        self.filtered_nodes = catalog.nodes_by_category(&id);
        self.selected_category = Some(id.clone());

        if self.is_mobile {
            self.sidebar_visible = true;
        }

        effects.push(Effect::push(&self.route()));
        effects.push(Effect::Track(AnalyticsEvent::CategorySelected { id, name }));
    }

    fn select_node_inner(&mut self, node: Arc<NodeRecord>, catalog: &Catalog, effects: &mut Effects) {
        // The node's own category wins over whatever was selected before
        self.selected_category = Some(node.category.clone());
        self.remember(&node);
        self.selected_node = Some(Arc::clone(&node));
        self.refresh_filtered(catalog);

        if self.is_mobile {
            self.sidebar_visible = false;
        }

        effects.push(Effect::replace(&self.route()));
        effects.push(Effect::Track(AnalyticsEvent::NodeViewed {
            id: node.id.clone(),
            name: node.name.clone(),
            category: node.category.clone(),
        }));
    }

    fn close_details_inner(&mut self, catalog: &Catalog, effects: &mut Effects) {
        self.selected_node = None;
        self.filtered_nodes = self.category_nodes(catalog);

        if self.is_mobile {
            self.sidebar_visible = true;
        }

        effects.push(Effect::push(&self.route()));
    }

    fn back_to_landing(&mut self, catalog: &Catalog, effects: &mut Effects) {
        self.selected_node = None;
        self.selected_category = None;
        self.refresh_filtered(catalog);

        if self.is_mobile {
            self.sidebar_visible = true;
        }

        effects.push(Effect::push(&DocsRoute::landing()));
    }

    fn resize(&mut self, width: u32) {
        let mobile = width < self.settings.mobile_breakpoint;
        match (self.is_mobile, mobile) {
            (false, true) => self.sidebar_visible = self.selected_node.is_none(),
            (true, false) => self.sidebar_visible = true,
            _ => {}
        }
        self.is_mobile = mobile;
    }
}

/// Compute the state after `event`.
///
/// Never fails: unknown ids fall back to the landing or category view.
pub fn reduce(state: &BrowserState, event: Event, catalog: &Catalog) -> Transition {
    let mut next = state.clone();
    let mut effects = Effects::new();
    let sidebar_before = next.sidebar_visible;

    match event {
        Event::Load(route) => next.load(&route, catalog, &mut effects),
        Event::Search(term) => next.search(term, catalog, &mut effects),
        Event::ClearSearch => next.clear(catalog),
        Event::SelectCategory(id) => next.select_category_inner(id, catalog, &mut effects),
        Event::SelectNode(node) => next.select_node_inner(node, catalog, &mut effects),
        Event::CloseDetails => next.close_details_inner(catalog, &mut effects),
        Event::BackToLanding => next.back_to_landing(catalog, &mut effects),
        Event::Resize { width } => next.resize(width),
        Event::ToggleSidebar => {
            if next.is_mobile {
                next.sidebar_visible = !next.sidebar_visible;
            }
        }
        Event::Shortcut(Shortcut::FocusSearch) => effects.push(Effect::FocusSearch),
        Event::Shortcut(Shortcut::Escape) => {
            if next.is_searching() {
                next.clear(catalog);
            } else if next.selected_node.is_some() {
                next.close_details_inner(catalog, &mut effects);
            }
        }
    }

    if next.sidebar_visible != sidebar_before {
        effects.push(Effect::SidebarVisibility(next.sidebar_visible));
    }

    Transition { state: next, effects }
}

// ============================================================================
// Tests
// ============================================================================
