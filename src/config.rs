use std::time::Duration;

use serde::Deserialize;

/// Nested sections keyed by the same top-level names used in `config.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub user_api: Service,
    pub order_api: Service,
    pub app_api: Api,
    pub server: Server,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Api {
    pub bind: String,
    pub cache_addr: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    #[serde(deserialize_with = "deserialize_duration")]
    pub shutdown_timeout: Duration,
}

fn deserialize_duration<'de, D>(de: D) -> Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(de)?;
    humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
}

/// Loads configuration from `config.yaml` in the working directory,
/// overridable by environment variables prefixed `APP` (`APP_APP_API__BIND`
/// overrides `app_api.bind`, etc.).
pub fn load() -> Result<Settings, config::ConfigError> {
    config::Config::builder()
        .add_source(config::File::with_name("config").required(true))
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize()
}
