use events_table::components::events_table::{RenderedTable, Tab};
use events_table::components::google_calendar::subscribe_url;

/// Tab labels on one line, the active one in brackets
pub fn render_tab_bar(tabs: &[Tab], active: &Tab, locale: &str) -> String {
    tabs.iter()
        .map(|tab| {
            let label = match tab {
                Tab::All => t!("all_events", locale = locale).to_string(),
                Tab::Category(category) => category.clone(),
            };
            if tab == active {
                format!("[{}]", label)
            } else {
                label
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Two-column table body, or the "no events" placeholder
pub fn render_table(table: &RenderedTable, locale: &str) -> String {
    let rows = match table {
        RenderedTable::Rows(rows) => rows,
        RenderedTable::NoEvents => return t!("no_events", locale = locale).to_string(),
    };

    let date_header = t!("date_column", locale = locale).to_string();
    let event_header = t!("event_column", locale = locale).to_string();

    let width = rows
        .iter()
        .map(|row| row.date_range.chars().count())
        .chain(std::iter::once(date_header.chars().count()))
        .max()
        .unwrap_or(0);

    let mut lines = vec![pad_line(&date_header, &event_header, width)];
    lines.extend(
        rows.iter()
            .map(|row| pad_line(&row.date_range, &row.summary, width)),
    );
    lines.join("\n")
}

/// Link for adding the calendar to a Google account
pub fn render_subscribe_link(calendar_id: &str, locale: &str) -> String {
    format!("{}: {}", t!("subscribe", locale = locale), subscribe_url(calendar_id))
}

fn pad_line(first: &str, second: &str, width: usize) -> String {
    let padding = width.saturating_sub(first.chars().count());
    format!("{}{}  {}", first, " ".repeat(padding), second)
}

#[cfg(test)]
mod tests {
    use super::*;
    use events_table::components::events_table::Row;

    #[test]
    fn test_render_tab_bar() {
        let tabs = vec![Tab::All, Tab::Category("Vlčata".to_string())];

        assert_eq!(render_tab_bar(&tabs, &Tab::All, "cs"), "[Všechny akce] | Vlčata");
        assert_eq!(
            render_tab_bar(&tabs, &Tab::Category("Vlčata".to_string()), "en"),
            "All events | [Vlčata]"
        );
    }

    #[test]
    fn test_render_table() {
        let table = RenderedTable::Rows(vec![
            Row {
                date_range: "5. 3. 2024".to_string(),
                summary: "Vlčata - výlet".to_string(),
            },
            Row {
                date_range: "5. 3. 2024 9:00 - 11:00".to_string(),
                summary: "Skauti - schůzka".to_string(),
            },
        ]);

        let text = render_table(&table, "cs");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Termín                   Akce");
        assert_eq!(lines[1], "5. 3. 2024               Vlčata - výlet");
        assert_eq!(lines[2], "5. 3. 2024 9:00 - 11:00  Skauti - schůzka");
    }

    #[test]
    fn test_render_no_events() {
        assert_eq!(render_table(&RenderedTable::NoEvents, "cs"), "Žádné akce");
        assert_eq!(render_table(&RenderedTable::NoEvents, "en"), "No events");
    }

    #[test]
    fn test_render_subscribe_link() {
        assert_eq!(
            render_subscribe_link("example", "en"),
            "Add this calendar to your Google Calendar: https://calendar.google.com/calendar?cid=example"
        );
    }
}
