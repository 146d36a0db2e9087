use super::filter::Tab;
use crate::components::google_calendar::models::Event;
use std::sync::Arc;

/// Snapshot of one table instance
///
/// Snapshots are never mutated; a fetch or tab switch produces a new one.
#[derive(Debug, Clone)]
pub struct TableState {
    /// Filtered events of the last successful fetch, `None` until then
    pub events: Option<Arc<[Event]>>,
    pub active_tab: Tab,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            events: None,
            active_tab: Tab::All,
        }
    }
}

impl TableState {
    pub fn is_ready(&self) -> bool {
        self.events.is_some()
    }

    /// Replace the stored event set
    pub fn with_events(&self, events: Arc<[Event]>) -> Self {
        Self {
            events: Some(events),
            active_tab: self.active_tab.clone(),
        }
    }

    /// Switch the active tab, sharing the stored event set
    pub fn with_tab(&self, tab: Tab) -> Self {
        Self {
            events: self.events.clone(),
            active_tab: tab,
        }
    }
}
