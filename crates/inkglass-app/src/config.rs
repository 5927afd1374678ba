//! Persisted user settings.

use inkglass_core::{BackgroundKind, Canvas, DrawingSession, StrokeColor, ToolKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Settings file name inside the config directory.
const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no config directory on this platform")]
    NoConfigDir,
}

/// Application configuration, stored as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pen_color: StrokeColor,
    pub pen_width: f64,
    pub last_tool: ToolKind,
    pub background: BackgroundKind,
    /// Control panel position in physical pixels.
    pub toolbar_x: i32,
    pub toolbar_y: i32,
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pen_color: StrokeColor::DEFAULT,
            pen_width: ToolKind::Pen.defaults().width,
            last_tool: ToolKind::Pen,
            background: BackgroundKind::None,
            toolbar_x: 100,
            toolbar_y: 100,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// `<config dir>/inkglass/settings.json`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("inkglass").join(SETTINGS_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from the default location. `Ok(None)` when no file exists yet.
    pub fn try_load() -> Result<Option<Self>, ConfigError> {
        let path = Self::default_path()?;
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    /// Save to the default location, logging failures.
    pub fn save(&self) {
        let result = Self::default_path().and_then(|path| {
            self.save_to(&path)?;
            Ok(path)
        });
        match result {
            Ok(path) => log::info!("Settings saved to {}", path.display()),
            Err(e) => log::error!("Could not save settings: {e}"),
        }
    }

    /// Drawing session restored from these settings.
    pub fn session(&self) -> DrawingSession {
        let mut session = DrawingSession::new();
        session.set_tool(self.last_tool);
        session.set_color(self.pen_color);
        session.set_width(self.pen_width);
        session
    }

    /// Record the canvas' current settings.
    pub fn capture(&mut self, canvas: &Canvas) {
        let session = canvas.session();
        self.pen_color = session.color();
        self.pen_width = session.width();
        self.last_tool = session.tool();
        self.background = canvas.page().background();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE);
        let config = AppConfig {
            pen_color: StrokeColor::rgb(0xe9, 0x45, 0x60),
            pen_width: 12.0,
            last_tool: ToolKind::Chisel,
            background: BackgroundKind::Grid,
            toolbar_x: 40,
            toolbar_y: 300,
            ..AppConfig::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r##"{"pen_color": "#0f3460", "background": "Lined"}"##).unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.pen_color, StrokeColor::rgb(0x0f, 0x34, 0x60));
        assert_eq!(config.background, BackgroundKind::Lined);
        assert_eq!(config.pen_width, 3.0);
        assert_eq!(config.toolbar_x, 100);
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(AppConfig::load_from(&path), Err(ConfigError::Parse(_))));

        std::fs::write(&path, r#"{"pen_color": "blue"}"#).unwrap();
        assert!(matches!(AppConfig::load_from(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_from(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_default_path_is_namespaced() {
        if let Ok(path) = AppConfig::default_path() {
            assert!(path.ends_with("inkglass/settings.json"));
        }
    }

    #[test]
    fn test_session_clamps_restored_width() {
        let config = AppConfig {
            pen_width: 500.0,
            last_tool: ToolKind::Highlighter,
            ..AppConfig::default()
        };
        let session = config.session();
        assert_eq!(session.tool(), ToolKind::Highlighter);
        assert_eq!(session.width(), 80.0);
        assert!((session.opacity() - 0.35).abs() < f64::EPSILON);
    }

    #[test]
    fn test_capture_from_canvas() {
        let mut canvas = Canvas::new();
        canvas.set_tool(ToolKind::Arrow);
        canvas.set_width(9.0);
        canvas.set_background(BackgroundKind::Blackboard);

        let mut config = AppConfig::default();
        config.capture(&canvas);
        assert_eq!(config.last_tool, ToolKind::Arrow);
        assert_eq!(config.pen_width, 9.0);
        assert_eq!(config.background, BackgroundKind::Blackboard);
    }
}
