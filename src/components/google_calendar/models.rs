use crate::error::{malformed_event_error, Error};
use serde::{Deserialize, Serialize};

/// Status of a calendar occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Confirmed,
    Tentative,
    Cancelled,
}

impl EventStatus {
    /// Parse the feed's status string; unknown values count as confirmed
    pub fn from_feed(status: &str) -> Self {
        match status {
            "tentative" => EventStatus::Tentative,
            "cancelled" => EventStatus::Cancelled,
            _ => EventStatus::Confirmed,
        }
    }
}

/// Start or end of an event, as sent by the feed
///
/// Values are kept as the feed's strings and parsed when formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTime {
    /// `YYYY-MM-DD` of a whole-day event
    Date(String),
    /// RFC 3339 date-time with offset of a timed event
    DateTime(String),
}

impl EventTime {
    pub fn is_date_time(&self) -> bool {
        matches!(self, EventTime::DateTime(_))
    }
}

/// One calendar occurrence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub summary: String,
    pub status: EventStatus,
    pub start: EventTime,
    pub end: EventTime,
}

impl Event {
    /// Whether the event has explicit start and end times
    pub fn is_timed(&self) -> bool {
        self.start.is_date_time()
    }
}

/// Top-level response of the events list endpoint
#[derive(Debug, Deserialize)]
pub struct FeedResponse {
    pub items: Vec<serde_json::Value>,
}

/// `start`/`end` object of a raw feed item
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEventTime {
    pub date: Option<String>,
    pub date_time: Option<String>,
}

/// A feed item before validation
#[derive(Debug, Default, Deserialize)]
pub struct RawEvent {
    pub summary: Option<String>,
    pub status: Option<String>,
    pub start: Option<RawEventTime>,
    pub end: Option<RawEventTime>,
}

impl RawEventTime {
    fn into_event_time(self, field: &str) -> Result<EventTime, Error> {
        // dateTime wins if both are present
        match (self.date_time, self.date) {
            (Some(date_time), _) => Ok(EventTime::DateTime(date_time)),
            (None, Some(date)) => Ok(EventTime::Date(date)),
            (None, None) => Err(malformed_event_error(&format!("{} has neither date nor dateTime", field))),
        }
    }
}

impl TryFrom<RawEvent> for Event {
    type Error = Error;

    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        let summary = raw.summary.ok_or_else(|| malformed_event_error("missing summary"))?;
        let status = raw
            .status
            .as_deref()
            .map(EventStatus::from_feed)
            .ok_or_else(|| malformed_event_error("missing status"))?;
        let start = raw
            .start
            .ok_or_else(|| malformed_event_error("missing start"))?
            .into_event_time("start")?;
        let end = raw
            .end
            .ok_or_else(|| malformed_event_error("missing end"))?
            .into_event_time("end")?;

        Ok(Event {
            summary,
            status,
            start,
            end,
        })
    }
}
