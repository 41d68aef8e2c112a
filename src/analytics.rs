//! Usage analytics.
//!
//! Events are fire-and-forget: a sink gets each event once, nothing is
//! returned and nothing is retried. The only sink shipped here writes the
//! events to the terminal log.

use crate::log;
use std::fmt;

/// Something worth counting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsEvent {
    PageView { path: String, title: String },
    NodeViewed { id: String, name: String, category: String },
    CategorySelected { id: String, name: String },
    SearchPerformed { term: String, result_count: usize },
}

impl fmt::Display for AnalyticsEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PageView { path, title } => write!(f, "page view: {path} ({title})"),
            Self::NodeViewed { id, name, category } => {
                write!(f, "node view: {id} - {name} ({category})")
            }
            Self::CategorySelected { id, name } => write!(f, "category: {id} ({name})"),
            Self::SearchPerformed { term, result_count } => {
                write!(f, "search: \"{term}\" - {result_count} results")
            }
        }
    }
}

/// Receiver of analytics events.
pub trait Analytics {
    fn track(&mut self, event: &AnalyticsEvent);
}

/// Writes every event through the `log!` macro.
#[derive(Debug, Default)]
pub struct LogAnalytics;

impl Analytics for LogAnalytics {
    fn track(&mut self, event: &AnalyticsEvent) {
        log!("analytics"; "{event}");
    }
}

/// Keeps events in memory.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingAnalytics {
    pub events: Vec<AnalyticsEvent>,
}

#[cfg(test)]
impl Analytics for RecordingAnalytics {
    fn track(&mut self, event: &AnalyticsEvent) {
        self.events.push(event.clone());
    }
}
