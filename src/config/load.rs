use std::{env, path::PathBuf, time::Duration};

use super::schema::Settings;
use crate::model::{Location, PageSize};

/// Configuration loading helpers.
///
/// `Settings::load` layers environment variables (prefix `MUSICLIB__`) over an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("MUSICLIB")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        let url = reqwest::Url::parse(&self.api.base_url)
            .map_err(|e| format!("api.base_url `{}` is not a valid URL: {}", self.api.base_url, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!("api.base_url must use http or https, got `{}`", url.scheme()));
        }
        if PageSize::from_value(self.ui.default_page_size).is_none() {
            return Err(format!(
                "ui.default_page_size must be one of 10, 20, 50, 100 (got {})",
                self.ui.default_page_size
            ));
        }
        self.start_location()?;
        Ok(())
    }

    pub fn page_size(&self) -> PageSize {
        PageSize::from_value(self.ui.default_page_size).unwrap_or_default()
    }

    pub fn start_location(&self) -> Result<Location, String> {
        self.ui
            .start_location
            .parse()
            .map_err(|e| format!("ui.start_location: {}", e))
    }

    pub fn error_display(&self) -> Duration {
        Duration::from_secs(self.ui.error_display_secs)
    }
}

/// Resolve the config path from `MUSICLIB_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("MUSICLIB_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// Compute the default config path under
/// `$XDG_CONFIG_HOME/musiclib-rs/config.toml` or
/// `~/.config/musiclib-rs/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("musiclib-rs").join("config.toml"))
}
