pub mod filter;
pub mod format;
pub mod render;
pub mod state;

pub use filter::Tab;
pub use format::{DateRangeFormatter, SameDayRule};
pub use render::{RenderedTable, Row};
pub use state::TableState;

use crate::components::google_calendar::{
    CalendarQuery, Event, EventSource, GoogleCalendarClient, GoogleCalendarHandle,
};
use crate::config::Config;
use crate::error::{component_error, config_error, Error, TableResult};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};

/// One table of upcoming events
///
/// The table fetches its events once per activation. Until a fetch
/// succeeds there is nothing to render and tab switching fails with
/// [`Error::NotReady`].
pub struct EventsTable {
    config: Arc<Config>,
    calendar: GoogleCalendarHandle,
    formatter: DateRangeFormatter,
    tabs: Vec<Tab>,
    state: watch::Sender<TableState>,
}

impl EventsTable {
    /// Create a table reading from the given event source
    pub fn new(config: Config, source: Arc<dyn EventSource>) -> TableResult<Self> {
        let same_day = if config.legacy_weekday_same_day {
            SameDayRule::Weekday
        } else {
            SameDayRule::CalendarDate
        };
        let formatter = DateRangeFormatter::new(config.display_timezone()?, same_day);
        let tabs = filter::tabs(&config.categories);
        let (state, _) = watch::channel(TableState::default());

        Ok(Self {
            config: Arc::new(config),
            calendar: GoogleCalendarHandle::new(source),
            formatter,
            tabs,
            state,
        })
    }

    /// Create a table reading from the Google Calendar API
    pub fn from_config(config: Config) -> TableResult<Self> {
        let client = GoogleCalendarClient::from_config(&config)?;
        Self::new(config, Arc::new(client))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The "all" tab followed by the category tabs
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Fetch and filter events, replacing the stored event set
    ///
    /// A failed fetch leaves the stored set as it was.
    pub async fn activate(&self) -> TableResult<Arc<[Event]>> {
        let query = CalendarQuery::new(self.config.calendar_id.as_str(), self.config.api_key.as_str());

        let raw = match self.calendar.fetch_events(query).await {
            Ok(raw) => raw,
            Err(e) => {
                error!("{}", e);
                return Err(e);
            }
        };

        let fetched = raw.len();
        let events: Arc<[Event]> = filter::ingest(raw, &self.config.exclude).into();
        info!("Storing {} of {} fetched events", events.len(), fetched);

        self.state
            .send_modify(|state| *state = state.with_events(Arc::clone(&events)));

        Ok(events)
    }

    /// Wait until a fetch has stored an event set
    pub async fn wait_ready(&self) -> TableResult<Arc<[Event]>> {
        let mut rx = self.state.subscribe();
        let events = rx
            .wait_for(TableState::is_ready)
            .await
            .map_err(|_| component_error("Table state closed"))?
            .events
            .clone();

        events.ok_or_else(|| component_error("Table state lost its events"))
    }

    /// Current state snapshot
    pub fn state(&self) -> TableState {
        self.state.borrow().clone()
    }

    /// Stored event set, if a fetch has succeeded
    pub fn events(&self) -> Option<Arc<[Event]>> {
        self.state.borrow().events.clone()
    }

    pub fn active_tab(&self) -> Tab {
        self.state.borrow().active_tab.clone()
    }

    /// Make `tab` the active tab and render it
    pub fn select_tab(&self, tab: &Tab) -> TableResult<RenderedTable> {
        if !self.tabs.contains(tab) {
            return Err(config_error(&format!("Unknown tab: {}", tab)));
        }
        if !self.state.borrow().is_ready() {
            return Err(Error::NotReady);
        }

        self.state
            .send_modify(|state| *state = state.with_tab(tab.clone()));
        self.render()
    }

    /// Render the active tab
    pub fn render(&self) -> TableResult<RenderedTable> {
        let state = self.state();
        let events = state.events.as_ref().ok_or(Error::NotReady)?;
        self.render_tab(events, &state.active_tab)
    }

    /// Render any tab against an event set without touching the state
    pub fn render_tab(&self, events: &[Event], tab: &Tab) -> TableResult<RenderedTable> {
        let predicate = tab.predicate(self.config.all_keyword.as_deref());
        Ok(render::render_rows(events, predicate, &self.formatter))
    }

    /// Shutdown the fetch actor
    pub async fn shutdown(&self) -> TableResult<()> {
        self.calendar.shutdown().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::google_calendar::{EventStatus, EventTime};
    use crate::error::fetch_error;
    use async_trait::async_trait;

    struct StaticSource(Vec<Event>);

    #[async_trait]
    impl EventSource for StaticSource {
        async fn fetch(&self, _query: &CalendarQuery) -> TableResult<Vec<Event>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl EventSource for FailingSource {
        async fn fetch(&self, query: &CalendarQuery) -> TableResult<Vec<Event>> {
            Err(fetch_error(&query.calendar_id, "connection refused"))
        }
    }

    fn event(summary: &str, status: EventStatus) -> Event {
        Event {
            summary: summary.to_string(),
            status,
            start: EventTime::Date("2024-03-05".to_string()),
            end: EventTime::Date("2024-03-06".to_string()),
        }
    }

    fn config() -> Config {
        let mut config = Config::new("cal", "key");
        config.categories = vec!["Vlčata".to_string(), "Skauti".to_string()];
        config.exclude = vec!["Interní".to_string()];
        config.all_keyword = Some("Všichni".to_string());
        config
    }

    fn table() -> EventsTable {
        let source = StaticSource(vec![
            event("Vlčata - schůzka", EventStatus::Confirmed),
            event("Skauti - výprava", EventStatus::Confirmed),
            event("Skauti - zrušeno", EventStatus::Cancelled),
            event("Interní - rada", EventStatus::Confirmed),
            event("Všichni - Betlémské světlo", EventStatus::Confirmed),
        ]);
        EventsTable::new(config(), Arc::new(source)).unwrap()
    }

    fn summaries(table: &RenderedTable) -> Vec<&str> {
        table.rows().iter().map(|r| r.summary.as_str()).collect()
    }

    #[tokio::test]
    async fn test_activate_stores_filtered_events() {
        let table = table();
        assert!(table.events().is_none());

        let events = table.activate().await.unwrap();
        assert_eq!(events.len(), 3);
        assert!(table.state().is_ready());

        let ready = table.wait_ready().await.unwrap();
        assert!(Arc::ptr_eq(&ready, &events));
    }

    #[tokio::test]
    async fn test_select_tab_before_ready() {
        let table = table();
        let result = table.select_tab(&Tab::Category("Skauti".to_string()));
        assert!(matches!(result, Err(Error::NotReady)));
        assert!(matches!(table.render(), Err(Error::NotReady)));
    }

    #[tokio::test]
    async fn test_select_tabs() {
        let table = table();
        table.activate().await.unwrap();

        let all = table.render().unwrap();
        assert_eq!(
            summaries(&all),
            vec!["Vlčata - schůzka", "Skauti - výprava", "Všichni - Betlémské světlo"]
        );

        let scouts = table.select_tab(&Tab::Category("Skauti".to_string())).unwrap();
        assert_eq!(summaries(&scouts), vec!["Skauti - výprava", "Všichni - Betlémské světlo"]);
        assert_eq!(table.active_tab(), Tab::Category("Skauti".to_string()));

        let back = table.select_tab(&Tab::All).unwrap();
        assert_eq!(back, all);
    }

    #[tokio::test]
    async fn test_unknown_tab() {
        let table = table();
        table.activate().await.unwrap();

        let result = table.select_tab(&Tab::Category("Roveři".to_string()));
        assert!(matches!(result, Err(Error::Config(_))));
        assert_eq!(table.active_tab(), Tab::All);
    }

    #[tokio::test]
    async fn test_switching_tabs_keeps_event_set() {
        let table = table();
        let events = table.activate().await.unwrap();
        let before: Vec<Event> = events.to_vec();

        for _ in 0..3 {
            for tab in table.tabs().to_vec() {
                table.select_tab(&tab).unwrap();
            }
        }

        let after = table.events().unwrap();
        assert!(Arc::ptr_eq(&after, &events));
        assert_eq!(after.to_vec(), before);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_table_unset() {
        let table = EventsTable::new(config(), Arc::new(FailingSource)).unwrap();

        let result = table.activate().await;
        assert!(matches!(result, Err(Error::Fetch { .. })));
        assert!(table.events().is_none());
        assert!(matches!(table.render(), Err(Error::NotReady)));
    }

    #[tokio::test]
    async fn test_wait_ready_resolves_after_activation() {
        let table = Arc::new(table());

        let waiter = {
            let table = Arc::clone(&table);
            tokio::spawn(async move { table.wait_ready().await })
        };

        table.activate().await.unwrap();
        let events = waiter.await.unwrap().unwrap();
        assert_eq!(events.len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_timezone() {
        let mut config = config();
        config.timezone = "Nowhere/Special".to_string();
        let result = EventsTable::new(config, Arc::new(StaticSource(Vec::new())));
        assert!(result.is_err());
    }
}
