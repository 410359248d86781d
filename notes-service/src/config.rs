//! Service configuration from the environment.

use std::env;
use std::path::PathBuf;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "NOTES_SERVICE_PORT";
    /// Override for the notes API origin (e.g. a staging mirror).
    pub const API_BASE_URL: &str = "TORN_API_BASE_URL";
    /// Browser session cookie forwarded verbatim to the notes endpoints.
    pub const SESSION_COOKIE: &str = "TORN_SESSION_COOKIE";
    /// Override for the drawer settings file location.
    pub const SETTINGS_PATH: &str = "NOTES_SETTINGS_PATH";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 9120;
    pub const API_BASE_URL: &str = "https://www.torn.com";
    pub const CONFIG_DIR: &str = "config";
    pub const SETTINGS_FILE: &str = "drawer_settings.ron";
    pub const PANEL_WIDTH: u32 = 900;
    pub const NEW_NOTE_TITLE: &str = "New Note";
}

/// Returns the absolute path to the service directory.
/// Uses CARGO_MANIFEST_DIR at compile time, so it always resolves
/// regardless of the working directory at runtime.
pub fn service_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Get the runtime config directory
pub fn config_dir() -> PathBuf {
    service_dir().join(defaults::CONFIG_DIR)
}

/// Default location of the drawer settings file
pub fn settings_file_path() -> PathBuf {
    config_dir().join(defaults::SETTINGS_FILE)
}

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub api_base_url: String,
    pub session_cookie: Option<String>,
    pub settings_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: env::var(env_vars::PORT)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults::PORT),
            api_base_url: env::var(env_vars::API_BASE_URL)
                .unwrap_or_else(|_| defaults::API_BASE_URL.to_string()),
            session_cookie: env::var(env_vars::SESSION_COOKIE).ok(),
            settings_path: env::var(env_vars::SETTINGS_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|_| settings_file_path()),
        }
    }
}
