use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use std::path::Path;

const DEFAULT_TOML: &str = "config/Config.toml";
const DEFAULT_JSON: &str = "config/Config.json";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads application configuration by merging defaults, TOML, environment variables, and JSON.
    ///
    /// Missing files are skipped, so a bare checkout runs on the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load() -> Result<AppConfig> {
        Self::load_from(DEFAULT_TOML)
    }

    /// Loads application configuration from an explicit TOML path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig> {
        let config: AppConfig = Self::base()
            .merge(Toml::file(path.as_ref()))
            .merge(Self::env())
            .join(Json::file(DEFAULT_JSON))
            .extract()?;

        Ok(config)
    }

    /// Loads application configuration with a specific profile.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_with_profile(profile: &str) -> Result<AppConfig> {
        let config: AppConfig = Self::base()
            .merge(Toml::file(DEFAULT_TOML))
            .merge(Toml::file(format!("config/Config.{profile}.toml")))
            .merge(Self::env())
            .join(Json::file(DEFAULT_JSON))
            .extract()?;

        Ok(config)
    }

    fn base() -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
    }

    // APP_SERVER__PORT=9000 -> server.port
    fn env() -> Env {
        Env::prefixed("APP_").split("__")
    }
}
