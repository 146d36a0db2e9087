mod actor;
pub mod fetcher;
mod handle;
pub mod models;
pub mod query;

pub use fetcher::{EventSource, GoogleCalendarClient};
pub use handle::GoogleCalendarHandle;
pub use models::{Event, EventStatus, EventTime};
pub use query::{subscribe_url, CalendarQuery, EXAMPLE_CALENDAR_ID};
