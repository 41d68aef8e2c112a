//! Shell around [`BrowserState`] that carries out its effects.
//!
//! The session owns the history stack and talks to the injected
//! [`Environment`] and [`Analytics`] sink. It also handles the page-wide
//! shortcuts (help dialog, theme, home) before the browser state sees a key.

use super::{
    event::{Effect, Effects, Event, Shortcut},
    route::DocsRoute,
    state::BrowserState,
};
use crate::{
    analytics::{Analytics, AnalyticsEvent},
    catalog::{Catalog, NodeRecord},
    environment::{Environment, Theme},
};
use std::sync::Arc;

/// A key press as seen by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Ctrl(char),
    Escape,
}

pub struct Session<E: Environment, A: Analytics> {
    state: BrowserState,
    env: E,
    analytics: A,
    /// Visited paths, current entry last. Never empty.
    history: Vec<String>,
    theme: Theme,
    help_open: bool,
    /// Whether a page view was counted yet
    viewed: bool,
    site_name: String,
}

impl<E: Environment, A: Analytics> Session<E, A> {
    pub fn new(state: BrowserState, mut env: E, analytics: A, theme: Theme, site_name: &str) -> Self {
        env.set_theme_attribute(theme);
        let history = vec![state.route().to_string()];
        Self {
            state,
            env,
            analytics,
            history,
            theme,
            help_open: false,
            viewed: false,
            site_name: site_name.to_owned(),
        }
    }

    /// Open the documentation view at `route` and count a page view.
    ///
    /// Opening the entry that is already current does nothing, so a page
    /// load following a session navigation is not counted twice.
    pub fn open(&mut self, route: DocsRoute, catalog: &Catalog) -> Effects {
        let path = route.to_string();
        if self.viewed && self.current_path() == path {
            return Effects::new();
        }
        if let Some(current) = self.history.last_mut() {
            *current = path;
        }
        let effects = self.state.apply(Event::Load(route), catalog);
        let (effects, _) = self.apply_effects(effects);
        self.track_page_view(catalog);
        effects
    }

    pub fn handle_search(&mut self, term: &str, catalog: &Catalog) -> Effects {
        let effects = self.state.handle_search(term, catalog);
        self.carry_out(effects, catalog)
    }

    pub fn clear_search(&mut self, catalog: &Catalog) -> Effects {
        let effects = self.state.clear_search(catalog);
        self.carry_out(effects, catalog)
    }

    pub fn select_category(&mut self, id: &str, catalog: &Catalog) -> Effects {
        let effects = self.state.select_category(id, catalog);
        self.carry_out(effects, catalog)
    }

    pub fn select_node(&mut self, node: Arc<NodeRecord>, catalog: &Catalog) -> Effects {
        let effects = self.state.select_node(node, catalog);
        self.carry_out(effects, catalog)
    }

    pub fn close_details(&mut self, catalog: &Catalog) -> Effects {
        let effects = self.state.close_details(catalog);
        self.carry_out(effects, catalog)
    }

    /// Run one event and apply the resulting effects. Every URL change
    /// counts as a page view.
    pub fn dispatch(&mut self, event: Event, catalog: &Catalog) -> Effects {
        let effects = self.state.apply(event, catalog);
        self.carry_out(effects, catalog)
    }

    fn carry_out(&mut self, effects: Effects, catalog: &Catalog) -> Effects {
        let (effects, navigated) = self.apply_effects(effects);
        if navigated {
            self.track_page_view(catalog);
        }
        effects
    }

    fn apply_effects(&mut self, effects: Effects) -> (Effects, bool) {
        let mut navigated = false;

        for effect in &effects {
            match effect {
                Effect::Navigate { path, replace } => {
                    self.navigate(path, *replace);
                    navigated = true;
                }
                Effect::Track(event) => self.analytics.track(event),
                Effect::SidebarVisibility(_) | Effect::FocusSearch => {}
            }
        }
        (effects, navigated)
    }

    /// Handle a key press. Page-wide shortcuts come first.
    pub fn key(&mut self, key: Key, catalog: &Catalog) -> Effects {
        match key {
            Key::Char('?') => {
                self.help_open = !self.help_open;
                self.env.set_body_scroll_locked(self.help_open);
                Effects::new()
            }
            Key::Escape if self.help_open => {
                self.help_open = false;
                self.env.set_body_scroll_locked(false);
                Effects::new()
            }
            Key::Ctrl('t' | 'T') => {
                self.theme = self.theme.toggle();
                self.env.set_theme_attribute(self.theme);
                Effects::new()
            }
            Key::Ctrl('h' | 'H') => self.dispatch(Event::BackToLanding, catalog),
            Key::Char('/') => self.dispatch(Event::Shortcut(Shortcut::FocusSearch), catalog),
            Key::Escape => self.dispatch(Event::Shortcut(Shortcut::Escape), catalog),
            Key::Char(_) | Key::Ctrl(_) => Effects::new(),
        }
    }

    fn navigate(&mut self, path: &str, replace: bool) {
        if replace && let Some(current) = self.history.last_mut() {
            *current = path.to_owned();
        } else if self.history.last().map(String::as_str) != Some(path) {
            self.history.push(path.to_owned());
        }
    }

    fn track_page_view(&mut self, catalog: &Catalog) {
        self.viewed = true;
        let event = AnalyticsEvent::PageView {
            path: self.current_path().to_owned(),
            title: self.state.page_title(catalog, &self.site_name),
        };
        self.analytics.track(&event);
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub const fn state(&self) -> &BrowserState {
        &self.state
    }

    pub const fn env(&self) -> &E {
        &self.env
    }

    #[cfg(test)]
    pub const fn analytics(&self) -> &A {
        &self.analytics
    }

    #[cfg(test)]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn current_path(&self) -> &str {
        self.history.last().map_or("", String::as_str)
    }

    pub const fn theme(&self) -> Theme {
        self.theme
    }

    pub const fn is_help_open(&self) -> bool {
        self.help_open
    }
}
