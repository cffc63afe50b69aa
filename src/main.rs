//! Binary entry point: load settings, start logging, and drive the TUI until
//! the user exits.
use chrono::Local;
use satsang_manager::{logging, run_app, App, AppConfig};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    let log_path = logging::init(&config)?;
    log::info!(
        "starting satsang-manager {} (log file: {:?})",
        env!("CARGO_PKG_VERSION"),
        log_path
    );

    let mut app = App::new(&config, Local::now().date_naive());
    let result = run_app(&mut app, config.tick_rate());
    log::info!("exiting");
    result
}
