use crate::view;
use events_table::components::events_table::{EventsTable, Tab};
use events_table::config::Config;
use events_table::error::{config_error, Error};
use events_table::utils::i18n::resolve_locale;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Initialize logging with environment-based configuration
pub fn init_logging() -> miette::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn")),
        )
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| Error::Other(format!("Failed to set up logging: {}", e)))?;

    Ok(())
}

/// Load the table configuration
pub fn load_config() -> miette::Result<Config> {
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            error!("Failed to load configuration: {:?}", e);
            Err(e.into())
        }
    }
}

/// Fetch the events and print the requested tab, or every tab
pub async fn run(config: Config, requested_tab: Option<String>) -> miette::Result<()> {
    let locale = resolve_locale(&config.locale);
    info!("Rendering with locale {}", locale);

    let table = EventsTable::from_config(config)?;

    // Nothing is shown unless the fetch succeeds
    table.activate().await?;
    table.wait_ready().await?;

    let tabs = match requested_tab {
        Some(name) => vec![find_tab(table.tabs(), &name)?],
        None => table.tabs().to_vec(),
    };

    let mut output = String::new();
    for tab in &tabs {
        let rendered = table.select_tab(tab)?;
        output.push_str(&view::render_tab_bar(table.tabs(), tab, &locale));
        output.push('\n');
        output.push_str(&view::render_table(&rendered, &locale));
        output.push('\n');
    }
    output.push_str(&view::render_subscribe_link(&table.config().calendar_id, &locale));

    println!("{}", output);

    table.shutdown().await?;
    Ok(())
}

/// Look up a tab by category keyword; `all` names the all-events tab
fn find_tab(tabs: &[Tab], name: &str) -> Result<Tab, Error> {
    if name == "all" {
        return Ok(Tab::All);
    }
    tabs.iter()
        .find(|tab| matches!(tab, Tab::Category(category) if category == name))
        .cloned()
        .ok_or_else(|| config_error(&format!("Unknown tab: {}", name)))
}
