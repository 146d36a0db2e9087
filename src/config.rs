use crate::error::{config_error, env_error, TableResult};
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Default Google Calendar API root
pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/calendar/v3";

/// Default timezone used to display timed events
pub const DEFAULT_TIMEZONE: &str = "Europe/Prague";

/// Default locale for boundary strings
pub const DEFAULT_LOCALE: &str = "cs";

/// Optional file overriding the keyword lists
pub const TABLE_CONFIG_PATH: &str = "config/table.toml";

/// Configuration of one events table instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Google Calendar ID to read events from
    pub calendar_id: String,
    /// Static read key for the Calendar API
    pub api_key: String,
    /// Category keywords, one tab each, in display order
    pub categories: Vec<String>,
    /// Events whose summary contains any of these are dropped
    pub exclude: Vec<String>,
    /// Keyword marking an event as belonging to every category
    pub all_keyword: Option<String>,
    /// IANA timezone used to display timed events
    pub timezone: String,
    /// Locale for boundary strings
    pub locale: String,
    /// Calendar API root, overridable for tests
    pub api_base_url: String,
    /// Request timeout for the feed fetch
    pub fetch_timeout_secs: Option<u64>,
    /// Compare day-of-week instead of calendar date when deciding whether
    /// a timed event ends on the day it starts
    pub legacy_weekday_same_day: bool,
}

/// Keyword lists that may be kept in `config/table.toml`
#[derive(Debug, Default, Deserialize)]
struct TableFile {
    categories: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
    all_keyword: Option<String>,
}

impl Config {
    /// Create a configuration with defaults for everything but the calendar
    pub fn new(calendar_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            calendar_id: calendar_id.into(),
            api_key: api_key.into(),
            categories: Vec::new(),
            exclude: Vec::new(),
            all_keyword: None,
            timezone: DEFAULT_TIMEZONE.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            fetch_timeout_secs: None,
            legacy_weekday_same_day: false,
        }
    }

    /// Load configuration from environment and config file
    pub fn load() -> TableResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let calendar_id = env::var("GOOGLE_CALENDAR_ID").map_err(|_| env_error("GOOGLE_CALENDAR_ID"))?;
        let api_key = env::var("GOOGLE_API_KEY").map_err(|_| env_error("GOOGLE_API_KEY"))?;

        let mut config = Config::new(calendar_id, api_key);

        if let Ok(categories) = env::var("EVENT_CATEGORIES") {
            config.categories = split_keywords(&categories);
        }
        if let Ok(exclude) = env::var("EVENT_EXCLUDE") {
            config.exclude = split_keywords(&exclude);
        }
        config.all_keyword = normalize_all_keyword(env::var("ALL_KEYWORD").ok());

        if let Ok(timezone) = env::var("TIMEZONE") {
            config.timezone = timezone;
        }
        if let Ok(locale) = env::var("TABLE_LOCALE") {
            config.locale = locale;
        }
        if let Ok(base_url) = env::var("CALENDAR_API_BASE_URL") {
            config.api_base_url = base_url;
        }

        config.fetch_timeout_secs = match env::var("FETCH_TIMEOUT_SECS") {
            Ok(value) => Some(
                value
                    .parse::<u64>()
                    .map_err(|_| env_error("Invalid FETCH_TIMEOUT_SECS format"))?,
            ),
            Err(_) => None,
        };

        config.legacy_weekday_same_day = env::var("LEGACY_WEEKDAY_SAME_DAY")
            .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        if Path::new(TABLE_CONFIG_PATH).exists() {
            let content = fs::read_to_string(TABLE_CONFIG_PATH)?;
            config.apply_table_file(&content)?;
        }

        // Fail early on an unknown timezone
        config.display_timezone()?;

        if config.all_keyword.is_none() && !config.categories.is_empty() {
            warn!("No all-keyword configured, category tabs only show their own events");
        }

        Ok(config)
    }

    /// Override keyword lists from the contents of a TOML table file
    pub fn apply_table_file(&mut self, content: &str) -> TableResult<()> {
        let file: TableFile = toml::from_str(content)?;
        if let Some(categories) = file.categories {
            self.categories = categories;
        }
        if let Some(exclude) = file.exclude {
            self.exclude = exclude;
        }
        if file.all_keyword.is_some() {
            self.all_keyword = normalize_all_keyword(file.all_keyword);
        }
        Ok(())
    }

    /// Parse the configured display timezone
    pub fn display_timezone(&self) -> TableResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| config_error(&format!("Unknown timezone: {}", self.timezone)))
    }
}

/// Split a comma-separated keyword list
///
/// Entries are kept verbatim apart from dropping empty ones, since keywords
/// are matched as literal substrings.
pub fn split_keywords(value: &str) -> Vec<String> {
    value
        .split(',')
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// An empty all-keyword is treated the same as an unset one
fn normalize_all_keyword(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
