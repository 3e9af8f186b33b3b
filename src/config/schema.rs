use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/musiclib-rs/config.toml` or
/// `~/.config/musiclib-rs/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `MUSICLIB__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Root of the music library server, without the `/api` suffix.
    pub base_url: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Rows per page for every list view. One of 10, 20, 50 or 100.
    pub default_page_size: u32,

    /// View shown at startup, e.g. `/favorites?sort=year&order=desc`.
    pub start_location: String,

    /// How long the error popup stays up before clearing itself (seconds).
    pub error_display_secs: u64,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            start_location: "/tracks".to_string(),
            error_display_secs: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Directory for the daily log files.
    pub directory: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: ".logs".to_string(),
        }
    }
}
