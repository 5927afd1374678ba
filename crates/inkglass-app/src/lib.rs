//! InkGlass Application
//!
//! The desktop shell: a transparent always-on-top overlay for drawing, a
//! small control panel, settings persistence and event translation.

mod app;
mod config;
mod event_handler;
mod toolbar;

pub use app::App;
pub use config::{AppConfig, ConfigError};
pub use event_handler::EventHandler;
pub use toolbar::{render_toolbar, UiAction, UiState};
