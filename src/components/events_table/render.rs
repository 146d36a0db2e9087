use super::format::DateRangeFormatter;
use crate::components::google_calendar::models::Event;
use serde::Serialize;
use tracing::warn;

/// One table row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row {
    pub date_range: String,
    pub summary: String,
}

/// Render-ready contents of the table body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RenderedTable {
    Rows(Vec<Row>),
    /// Nothing to show; the placeholder text belongs to the presentation layer
    NoEvents,
}

impl RenderedTable {
    pub fn rows(&self) -> &[Row] {
        match self {
            RenderedTable::Rows(rows) => rows,
            RenderedTable::NoEvents => &[],
        }
    }
}

/// Format every event matching `predicate` into a row
///
/// An event whose date range fails to format is left out of the table.
pub fn render_rows<P>(events: &[Event], predicate: P, formatter: &DateRangeFormatter) -> RenderedTable
where
    P: Fn(&Event) -> bool,
{
    let rows: Vec<Row> = events
        .iter()
        .filter(|&event| predicate(event))
        .filter_map(|event| match formatter.format(event) {
            Ok(date_range) => Some(Row {
                date_range,
                summary: event.summary.clone(),
            }),
            Err(e) => {
                warn!("Skipping '{}': {}", event.summary, e);
                None
            }
        })
        .collect();

    if rows.is_empty() {
        RenderedTable::NoEvents
    } else {
        RenderedTable::Rows(rows)
    }
}
