use crate::components::google_calendar::models::{Event, EventStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One tab of the table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tab {
    /// Every stored event
    All,
    /// Events whose summary mentions the category keyword
    Category(String),
}

impl Tab {
    /// The predicate selecting this tab's events
    pub fn predicate<'a>(&'a self, all_keyword: Option<&'a str>) -> Box<dyn Fn(&Event) -> bool + 'a> {
        match self {
            Tab::All => Box::new(all_predicate()),
            Tab::Category(category) => Box::new(category_predicate(category, all_keyword)),
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tab::All => write!(f, "all"),
            Tab::Category(category) => write!(f, "{}", category),
        }
    }
}

/// The "all" tab followed by one tab per category, in configuration order
pub fn tabs(categories: &[String]) -> Vec<Tab> {
    std::iter::once(Tab::All)
        .chain(categories.iter().cloned().map(Tab::Category))
        .collect()
}

/// Whether a summary contains any keyword as a literal, case-sensitive substring
pub fn contains_any_keyword(summary: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|keyword| summary.contains(keyword.as_str()))
}

pub fn is_not_cancelled(event: &Event) -> bool {
    event.status != EventStatus::Cancelled
}

pub fn is_not_excluded(event: &Event, exclude: &[String]) -> bool {
    !contains_any_keyword(&event.summary, exclude)
}

/// Drop cancelled and excluded events, keeping feed order
pub fn ingest(events: Vec<Event>, exclude: &[String]) -> Vec<Event> {
    events
        .into_iter()
        .filter(is_not_cancelled)
        .filter(|event| is_not_excluded(event, exclude))
        .collect()
}

/// Matches events mentioning `category`, or the all-keyword when one is set
///
/// An empty all-keyword is contained in every summary, so it makes every
/// category match every event.
pub fn category_predicate<'a>(category: &'a str, all_keyword: Option<&'a str>) -> impl Fn(&Event) -> bool + 'a {
    move |event| {
        event.summary.contains(category)
            || all_keyword.is_some_and(|keyword| event.summary.contains(keyword))
    }
}

/// Matches every event
pub fn all_predicate() -> impl Fn(&Event) -> bool {
    |_| true
}
