//! Application settings.
//!
//! Configuration comes from `settings.toml` merged with `KAYD_*` environment
//! variables (e.g. `KAYD_TELEGRAM__TOKEN`, `KAYD_STORE__URL`). The two
//! required values are the bot token and the record-store base URL;
//! everything else has a default.

use config::{Config, ConfigError, Environment, File};
use engine::Tier;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Store {
    pub url: String,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct Telegram {
    pub token: String,
    /// Telegram user ids allowed to use the bot; everyone when absent.
    pub allowed_users: Option<Vec<u64>>,
    pub warn_unpersisted: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct Health {
    pub bind: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub store: Store,
    pub telegram: Telegram,
    pub health: Option<Health>,
    /// Tier ladder override; the built-in ladder applies when absent.
    pub tiers: Option<Vec<Tier>>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("KAYD").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_sections_default() {
        let settings: Settings = Config::builder()
            .add_source(config::File::from_str(
                "[store]\nurl = \"http://store:8090\"\n\n[telegram]\ntoken = \"t\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.app.level, "info");
        assert!(settings.health.is_none());
        assert!(settings.tiers.is_none());
        assert!(settings.telegram.allowed_users.is_none());
    }

    #[test]
    fn tier_rows_deserialize() {
        let settings: Settings = Config::builder()
            .add_source(config::File::from_str(
                concat!(
                    "[store]\nurl = \"http://store:8090\"\n\n",
                    "[telegram]\ntoken = \"t\"\n\n",
                    "[[tiers]]\nmin_points = 100\nlabel = \"Champion\"\n\n",
                    "[[tiers]]\nmin_points = 0\nlabel = \"Starter\"\n",
                ),
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        let tiers = settings.tiers.unwrap();
        assert_eq!(tiers.len(), 2);
        assert_eq!(tiers[0].label, "Champion");
    }
}
