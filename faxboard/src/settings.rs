use crate::logger::Level;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Memory,
    Rest,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(BackendKind::Memory),
            "rest" | "postgrest" | "supabase" => Ok(BackendKind::Rest),
            _ => Err(format!("Invalid value for backend kind: {}", s)),
        }
    }
}

impl<'de> serde::Deserialize<'de> for BackendKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BackendKind::from_str(&s).map_err(serde::de::Error::custom)
    }
}

fn duration_from_secs<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let secs = u64::deserialize(deserializer)?;
    Ok(Duration::from_secs(secs))
}

fn default_timeout() -> Duration {
    Duration::from_secs(10)
}

fn default_level() -> Level {
    Level::Info
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_level")]
    pub log_level: Level,
    pub http: HttpSettings,
    pub backend: BackendSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpSettings {
    pub bind_address: SocketAddr,
    #[serde(default)]
    pub cors: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    pub kind: BackendKind,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default = "default_timeout", deserialize_with = "duration_from_secs")]
    pub timeout_s: Duration,
    /// Signed-in user reported by the in-memory backend.
    #[serde(default)]
    pub seed_user: Option<String>,
}

impl AppConfig {
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .add_source(File::with_name(path).required(true))
            .add_source(Environment::with_prefix("FAXBOARD").try_parsing(true).separator("__"));
        builder.build()?.try_deserialize()
    }
}
