use crate::error::{formatting_error, TableResult};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike};

/// Parse a feed date in `YYYY-MM-DD` format
pub fn parse_date(date_str: &str) -> TableResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|e| formatting_error(&format!("Failed to parse date '{}': {}", date_str, e)))
}

/// Parse a feed RFC 3339 date-time and move it into the display timezone
pub fn parse_date_time<Tz: TimeZone>(date_time_str: &str, tz: &Tz) -> TableResult<DateTime<Tz>> {
    DateTime::parse_from_rfc3339(date_time_str)
        .map(|dt| dt.with_timezone(tz))
        .map_err(|e| formatting_error(&format!("Failed to parse datetime '{}': {}", date_time_str, e)))
}

/// The calendar day before `date`
pub fn previous_day(date: NaiveDate) -> TableResult<NaiveDate> {
    date.pred_opt()
        .ok_or_else(|| formatting_error(&format!("No day before {}", date)))
}

/// Czech numeric date, e.g. `5. 3. 2024`
pub fn format_date<D: Datelike>(date: &D) -> String {
    format!("{}. {}. {}", date.day(), date.month(), date.year())
}

/// Czech numeric time, e.g. `9:00`
pub fn format_time<T: Timelike>(time: &T) -> String {
    format!("{}:{:02}", time.hour(), time.minute())
}

/// Czech numeric date and time, e.g. `5. 3. 2024 9:00`
pub fn format_date_time<Tz: TimeZone>(date_time: &DateTime<Tz>) -> String {
    format!("{} {}", format_date(date_time), format_time(date_time))
}
