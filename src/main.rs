use std::fs::OpenOptions;
use std::sync::Mutex;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use triqui::account::AccountStore;
use triqui::cli::{Cli, Console};
use triqui::config::{LogConfig, TriquiConfig};
use triqui::error::TriquiError;
use triqui::interactive::App;

/// Log to a file so records never interleave with the menu. RUST_LOG wins
/// over the configured level.
fn init_tracing(config: &LogConfig) -> Result<(), TriquiError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| TriquiError::Logging(e.to_string()))?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| TriquiError::Logging(e.to_string()))
}

fn main() -> Result<(), TriquiError> {
    let cli = Cli::parse();
    let config = TriquiConfig::load_or_default(&cli.config);
    init_tracing(&config.log)?;

    info!(
        text_store = %config.store.text_path.display(),
        json_store = %config.store.json_path.display(),
        "starting"
    );

    let store = AccountStore::from_config(&config.store);
    let mut app = App::new(store, Console::stdio());
    app.run()?;

    info!("exiting");
    Ok(())
}
