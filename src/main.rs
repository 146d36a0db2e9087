#[macro_use]
extern crate rust_i18n;

mod startup;
mod view;

use tracing::info;

// Initialize i18n
i18n!("locales", fallback = "en");

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting events table");

    // Load configuration
    let config = startup::load_config()?;

    // Optional tab to show instead of all of them
    let requested_tab = std::env::args().nth(1);

    startup::run(config, requested_tab).await
}
