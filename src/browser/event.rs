//! Inputs to and outputs of the browser state reducer.

use super::route::DocsRoute;
use crate::{analytics::AnalyticsEvent, catalog::NodeRecord};
use smallvec::SmallVec;
use std::sync::Arc;

/// Something the user or the page did.
#[derive(Debug, Clone)]
pub enum Event {
    /// The documentation view was opened at, or navigated back to, a URL.
    Load(DocsRoute),
    /// Search box text changed.
    Search(String),
    /// Search box cleared.
    ClearSearch,
    /// Category clicked in the sidebar or on the landing grid.
    SelectCategory(String),
    /// Node clicked in a list, a search result or a category card.
    SelectNode(Arc<NodeRecord>),
    /// "Back" on the node detail panel.
    CloseDetails,
    /// "Back" on the category panel.
    BackToLanding,
    /// Viewport width changed, in CSS pixels.
    Resize { width: u32 },
    /// Mobile sidebar toggle button.
    ToggleSidebar,
    /// Keyboard shortcut handled by the documentation view.
    Shortcut(Shortcut),
}

/// Keyboard shortcuts the documentation view reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// `/`
    FocusSearch,
    /// `Esc`
    Escape,
}

/// Work for the calling shell after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write the URL without reloading. `replace` overwrites the current
    /// history entry instead of pushing a new one.
    Navigate { path: String, replace: bool },
    /// Sidebar visibility changed.
    SidebarVisibility(bool),
    /// Move keyboard focus to the search box.
    FocusSearch,
    Track(AnalyticsEvent),
}

impl Effect {
    pub(super) fn push(route: &DocsRoute) -> Self {
        Self::Navigate { path: route.to_string(), replace: false }
    }

    pub(super) fn replace(route: &DocsRoute) -> Self {
        Self::Navigate { path: route.to_string(), replace: true }
    }
}

/// A transition rarely produces more than three effects.
pub type Effects = SmallVec<[Effect; 4]>;
