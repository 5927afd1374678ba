//! Main application entry point.

use inkglass_app::{App, AppConfig};
use inkglass_core::ShortcutRegistry;

fn main() {
    // Settings are read before the logger exists so they can pick its filter.
    let loaded = AppConfig::try_load();
    let filter = match &loaded {
        Ok(Some(config)) => config.log_filter.clone(),
        _ => AppConfig::default().log_filter,
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
    log::info!("Starting InkGlass");

    let config = loaded
        .unwrap_or_else(|e| {
            log::warn!("Could not load settings, using defaults: {e}");
            None
        })
        .unwrap_or_default();

    if std::env::args().any(|arg| arg == "--shortcuts") {
        ShortcutRegistry::print_all();
        return;
    }

    App::run(config);
}
