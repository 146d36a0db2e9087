use super::models::{Event, FeedResponse, RawEvent};
use super::query::{CalendarQuery, FeedTarget};
use crate::config::Config;
use crate::error::{fetch_error, TableResult};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Feed served for the `example` calendar id
pub const EXAMPLE_RESPONSE: &str = include_str!("../../../fixtures/example-response.json");

/// Target reported for fixture loads
pub const EXAMPLE_TARGET: &str = "example-response.json";

/// Source of raw calendar events
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Fetch the events a query selects, in feed order
    async fn fetch(&self, query: &CalendarQuery) -> TableResult<Vec<Event>>;
}

/// Fetches events from the Google Calendar API
#[derive(Debug, Clone)]
pub struct GoogleCalendarClient {
    client: Client,
    api_base_url: String,
}

impl GoogleCalendarClient {
    /// Create a client for the given API root
    pub fn new(api_base_url: impl Into<String>, timeout: Option<Duration>) -> TableResult<Self> {
        let api_base_url = api_base_url.into();
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| fetch_error(&api_base_url, format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, api_base_url })
    }

    /// Create a client from the table configuration
    pub fn from_config(config: &Config) -> TableResult<Self> {
        Self::new(
            config.api_base_url.clone(),
            config.fetch_timeout_secs.map(Duration::from_secs),
        )
    }

    async fn fetch_remote(&self, url: Url) -> TableResult<Vec<Event>> {
        let target = redact(&url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_error(&target, e))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(fetch_error(
                &target,
                format!("HTTP {} - {}", status, error_body),
            ));
        }

        let body = response.text().await.map_err(|e| fetch_error(&target, e))?;
        parse_feed(&body, &target)
    }
}

#[async_trait]
impl EventSource for GoogleCalendarClient {
    async fn fetch(&self, query: &CalendarQuery) -> TableResult<Vec<Event>> {
        let events = match query.target(&self.api_base_url)? {
            FeedTarget::Fixture => {
                info!("Loading events from the bundled example feed");
                parse_feed(EXAMPLE_RESPONSE, EXAMPLE_TARGET)?
            }
            FeedTarget::Remote(url) => self.fetch_remote(url).await?,
        };

        info!("Fetched {} events for calendar {}", events.len(), query.calendar_id);
        Ok(events)
    }
}

/// Parse an events list payload
///
/// Items missing a required field are dropped; a payload that is not JSON
/// or has no `items` array fails as a whole.
pub fn parse_feed(body: &str, target: &str) -> TableResult<Vec<Event>> {
    let response: FeedResponse = serde_json::from_str(body)
        .map_err(|e| fetch_error(target, format!("Failed to parse events response: {}", e)))?;

    let events = response
        .items
        .into_iter()
        .filter_map(|item| {
            let parsed = serde_json::from_value::<RawEvent>(item)
                .map_err(Into::into)
                .and_then(Event::try_from);
            match parsed {
                Ok(event) => Some(event),
                Err(e) => {
                    debug!("Skipping feed item: {}", e);
                    None
                }
            }
        })
        .collect();

    Ok(events)
}

/// Request target without the query string, which carries the API key
fn redact(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::google_calendar::models::{EventStatus, EventTime};
    use crate::error::Error;

    #[test]
    fn test_parse_feed_skips_malformed_items() {
        let body = r#"{
            "items": [
                { "summary": "Výprava", "status": "confirmed",
                  "start": { "date": "2024-03-05" }, "end": { "date": "2024-03-09" } },
                { "status": "confirmed",
                  "start": { "date": "2024-03-06" }, "end": { "date": "2024-03-07" } },
                { "summary": "Bez konce", "status": "confirmed",
                  "start": { "date": "2024-03-06" } },
                "not an object",
                { "summary": "Schůzka", "status": "cancelled",
                  "start": { "dateTime": "2024-03-07T16:00:00+01:00" },
                  "end": { "dateTime": "2024-03-07T18:00:00+01:00" } }
            ]
        }"#;

        let events = parse_feed(body, "test").unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].summary, "Výprava");
        assert_eq!(events[1].summary, "Schůzka");
        assert_eq!(events[1].status, EventStatus::Cancelled);
        assert_eq!(
            events[1].start,
            EventTime::DateTime("2024-03-07T16:00:00+01:00".to_string())
        );
    }

    #[test]
    fn test_parse_feed_rejects_non_json() {
        let result = parse_feed("<html>quota exceeded</html>", "https://example.test/events");
        match result {
            Err(Error::Fetch { url, .. }) => assert_eq!(url, "https://example.test/events"),
            other => panic!("expected fetch error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_feed_requires_items() {
        let result = parse_feed(r#"{"error": {"code": 404}}"#, "test");
        assert!(matches!(result, Err(Error::Fetch { .. })));
    }

    #[test]
    fn test_example_fixture_parses() {
        let events = parse_feed(EXAMPLE_RESPONSE, EXAMPLE_TARGET).unwrap();
        assert!(!events.is_empty());
        assert!(events.iter().any(|e| e.is_timed()));
        assert!(events.iter().any(|e| !e.is_timed()));
        assert!(events.iter().any(|e| e.status == EventStatus::Cancelled));
    }

    #[test]
    fn test_redact_drops_key() {
        let url = Url::parse("https://www.googleapis.com/calendar/v3/calendars/x/events?key=secret").unwrap();
        assert_eq!(redact(&url), "https://www.googleapis.com/calendar/v3/calendars/x/events");
    }
}
