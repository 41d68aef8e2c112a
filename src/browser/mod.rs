//! Documentation browser: which category and node are shown, the search
//! box, and the mobile sidebar.
//!
//! The logic is a reducer over [`BrowserState`]. The static build runs it
//! to render pages; the dev server drives a [`Session`] event by event,
//! which applies the effects.

mod event;
mod route;
mod session;
mod state;

pub use event::{Effect, Effects, Event};
pub use route::DocsRoute;
pub use session::{Key, Session};
pub use state::{BrowserSettings, BrowserState, DEFAULT_MOBILE_BREAKPOINT, DEFAULT_RECENT_LIMIT, ViewMode};
