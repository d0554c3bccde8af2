//! Application configuration.
//!
//! Built-in defaults (bind on all interfaces at 48050, 5 minute
//! lookback, 5 second refresh) are overridden by an optional
//! `config/default.toml` and then by `VITALBOARD`-prefixed
//! environment variables.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardSettings {
    pub default_lookback_minutes: i64,
    pub default_refresh_seconds: u64,
}

/// Load configuration: defaults, then `config/default.toml`, then
/// environment variables (`VITALBOARD_SERVER__PORT=8080` style).
pub fn load() -> Result<Settings, config::ConfigError> {
    config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 48050)?
        .set_default("database.url", "sqlite://vitalboard.db")?
        .set_default("dashboard.default_lookback_minutes", 5)?
        .set_default("dashboard.default_refresh_seconds", 5)?
        .add_source(config::File::with_name("config/default").required(false))
        .add_source(config::Environment::with_prefix("VITALBOARD").separator("__"))
        .build()?
        .try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_defaults_load() {
        let settings = load().expect("defaults should load");
        assert_eq!(settings.server.port, 48050);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.dashboard.default_lookback_minutes, 5);
        assert_eq!(settings.dashboard.default_refresh_seconds, 5);
    }
}
