use crate::components::google_calendar::models::{Event, EventTime};
use crate::error::{formatting_error, TableResult};
use crate::utils::time::{
    format_date, format_date_time, format_time, parse_date, parse_date_time, previous_day,
};
use chrono::{DateTime, Datelike};
use chrono_tz::Tz;

/// How a timed event decides that it ends on the day it started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameDayRule {
    /// Same year, month and day of month
    #[default]
    CalendarDate,
    /// Same year, month and day of week. Kept for output compatibility with
    /// older tables; events a whole number of weeks long within one month
    /// lose their end date.
    Weekday,
}

/// Renders an event's time span as a Czech date range
#[derive(Debug, Clone)]
pub struct DateRangeFormatter {
    timezone: Tz,
    same_day: SameDayRule,
}

impl DateRangeFormatter {
    pub fn new(timezone: Tz, same_day: SameDayRule) -> Self {
        Self { timezone, same_day }
    }

    /// Format the date range of one event
    pub fn format(&self, event: &Event) -> TableResult<String> {
        match (&event.start, &event.end) {
            (EventTime::DateTime(start), EventTime::DateTime(end)) => {
                self.format_in_day_event(start, end)
            }
            (EventTime::Date(start), EventTime::Date(end)) => {
                self.format_whole_day_event(start, end)
            }
            _ => Err(formatting_error(&format!(
                "'{}' mixes whole-day and timed boundaries",
                event.summary
            ))),
        }
    }

    /// Format a whole-day event from the feed's start and exclusive end date
    pub fn format_whole_day_event(&self, start_date: &str, end_date: &str) -> TableResult<String> {
        let start = parse_date(start_date)?;
        // The feed's end date is the day after the event's last day
        let end = previous_day(parse_date(end_date)?)?;

        let mut remove_part = String::new();
        if start.year() == end.year() {
            if start.month() == end.month() {
                remove_part = format!("{}. {}", start.month(), start.year());
                if start.day() == end.day() {
                    return Ok(format_date(&start));
                }
            } else {
                remove_part = start.year().to_string();
            }
        }

        let from = format_date(&start).replacen(&remove_part, "", 1);
        Ok(format_from_to(&from, &format_date(&end)))
    }

    /// Format a timed event from its start and end date-times
    pub fn format_in_day_event(&self, start_date_time: &str, end_date_time: &str) -> TableResult<String> {
        let start = parse_date_time(start_date_time, &self.timezone)?;
        let end = parse_date_time(end_date_time, &self.timezone)?;

        let from = format_date_time(&start);
        let to = if self.same_day(&start, &end) {
            format_time(&end)
        } else {
            format_date_time(&end)
        };

        Ok(format_from_to(&from, &to))
    }

    fn same_day(&self, start: &DateTime<Tz>, end: &DateTime<Tz>) -> bool {
        let day_matches = match self.same_day {
            SameDayRule::CalendarDate => start.day() == end.day(),
            SameDayRule::Weekday => start.weekday() == end.weekday(),
        };
        start.year() == end.year() && start.month() == end.month() && day_matches
    }
}

fn format_from_to(from: &str, to: &str) -> String {
    format!("{} - {}", from, to)
}
