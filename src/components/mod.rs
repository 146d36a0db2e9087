// Export components
pub mod events_table;
pub mod google_calendar;

// Re-export the table component and the calendar handle
pub use events_table::EventsTable;
pub use google_calendar::GoogleCalendarHandle;
