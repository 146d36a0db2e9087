use crate::error::{fetch_error, TableResult};
use chrono::{DateTime, SecondsFormat, Utc};
use url::Url;

/// Calendar id that loads the bundled fixture instead of calling the API
pub const EXAMPLE_CALENDAR_ID: &str = "example";

/// Description of one events feed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarQuery {
    pub calendar_id: String,
    pub api_key: String,
    /// Lower bound of the requested window
    pub time_min: DateTime<Utc>,
    /// Expand recurring events into single occurrences
    pub single_events: bool,
    pub order_by: &'static str,
}

/// Where a query is answered from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedTarget {
    Remote(Url),
    Fixture,
}

impl CalendarQuery {
    /// Query for events from now on
    pub fn new(calendar_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            calendar_id: calendar_id.into(),
            api_key: api_key.into(),
            time_min: Utc::now(),
            single_events: true,
            order_by: "startTime",
        }
    }

    /// Replace the lower time bound
    pub fn with_time_min(mut self, time_min: DateTime<Utc>) -> Self {
        self.time_min = time_min;
        self
    }

    pub fn is_example(&self) -> bool {
        self.calendar_id == EXAMPLE_CALENDAR_ID
    }

    /// Build the events URL below the given API root
    pub fn url(&self, api_base_url: &str) -> TableResult<Url> {
        let mut url = Url::parse(api_base_url)
            .map_err(|e| fetch_error(api_base_url, format!("Failed to parse URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| fetch_error(api_base_url, "URL cannot be a base"))?
            .pop_if_empty()
            .extend(["calendars", self.calendar_id.as_str(), "events"]);

        url.query_pairs_mut()
            .append_pair("key", &self.api_key)
            .append_pair("timeMin", &self.time_min.to_rfc3339_opts(SecondsFormat::Millis, true))
            .append_pair("singleEvents", if self.single_events { "true" } else { "false" })
            .append_pair("orderBy", self.order_by);

        Ok(url)
    }

    /// Resolve the query to the fixture or a remote URL
    pub fn target(&self, api_base_url: &str) -> TableResult<FeedTarget> {
        if self.is_example() {
            return Ok(FeedTarget::Fixture);
        }
        self.url(api_base_url).map(FeedTarget::Remote)
    }
}

/// Link that adds the calendar to a Google Calendar account
pub fn subscribe_url(calendar_id: &str) -> String {
    let cid: String = url::form_urlencoded::byte_serialize(calendar_id.as_bytes()).collect();
    format!("https://calendar.google.com/calendar?cid={}", cid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_API_BASE_URL;
    use chrono::TimeZone;

    fn query() -> CalendarQuery {
        CalendarQuery::new("skaut@group.calendar.google.com", "secret-key")
            .with_time_min(Utc.with_ymd_and_hms(2024, 3, 5, 8, 30, 0).unwrap())
    }

    #[test]
    fn test_url() {
        let url = query().url(DEFAULT_API_BASE_URL).unwrap();

        assert_eq!(url.host_str(), Some("www.googleapis.com"));
        assert_eq!(
            url.path(),
            "/calendar/v3/calendars/skaut@group.calendar.google.com/events"
        );

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("key".to_string(), "secret-key".to_string()),
                ("timeMin".to_string(), "2024-03-05T08:30:00.000Z".to_string()),
                ("singleEvents".to_string(), "true".to_string()),
                ("orderBy".to_string(), "startTime".to_string()),
            ]
        );
        // No upper bound
        assert!(!url.query().unwrap().contains("timeMax"));
    }

    #[test]
    fn test_url_trailing_slash_base() {
        let url = query().url("http://127.0.0.1:1234/").unwrap();
        assert_eq!(
            url.path(),
            "/calendars/skaut@group.calendar.google.com/events"
        );
    }

    #[test]
    fn test_calendar_id_is_escaped() {
        let url = CalendarQuery::new("a/b c", "k").url(DEFAULT_API_BASE_URL).unwrap();
        assert_eq!(url.path(), "/calendar/v3/calendars/a%2Fb%20c/events");
    }

    #[test]
    fn test_invalid_base_is_fetch_error() {
        let result = query().url("not a url");
        assert!(matches!(result, Err(crate::error::Error::Fetch { .. })));
    }

    #[test]
    fn test_example_target() {
        let example = CalendarQuery::new(EXAMPLE_CALENDAR_ID, "");
        assert_eq!(example.target(DEFAULT_API_BASE_URL).unwrap(), FeedTarget::Fixture);

        assert!(matches!(
            query().target(DEFAULT_API_BASE_URL).unwrap(),
            FeedTarget::Remote(_)
        ));
    }

    #[test]
    fn test_subscribe_url() {
        assert_eq!(
            subscribe_url("skaut@group.calendar.google.com"),
            "https://calendar.google.com/calendar?cid=skaut%40group.calendar.google.com"
        );
    }
}
