use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_collection")]
    pub collection: String,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_query_timeout")]
    pub query_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            database: default_database(),
            collection: default_collection(),
            connect_timeout_secs: default_connect_timeout(),
            query_timeout_secs: default_query_timeout(),
        }
    }
}

impl DatabaseConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}

fn default_port() -> String {
    "8000".to_string()
}

fn default_url() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database() -> String {
    "movies".to_string()
}

fn default_collection() -> String {
    "movies".to_string()
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_query_timeout() -> u64 {
    30
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_string(), e))?;

        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.listen.address, None);
        assert_eq!(config.listen.port, "8000");
        assert_eq!(config.database.url, "mongodb://localhost:27017");
        assert_eq!(config.database.database, "movies");
        assert_eq!(config.database.collection, "movies");
        assert_eq!(config.database.connect_timeout(), Duration::from_secs(5));
        assert_eq!(config.database.query_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn explicit_values_override_defaults() {
        let yaml = r#"
listen:
  address: "127.0.0.1"
  port: "9090"
database:
  url: mongodb://db.internal:27017
  database: catalog
  collection: films
  query_timeout_secs: 10
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.listen.address.as_deref(), Some("127.0.0.1"));
        assert_eq!(config.listen.port, "9090");
        assert_eq!(config.database.url, "mongodb://db.internal:27017");
        assert_eq!(config.database.database, "catalog");
        assert_eq!(config.database.collection, "films");
        assert_eq!(config.database.connect_timeout(), Duration::from_secs(5));
        assert_eq!(config.database.query_timeout(), Duration::from_secs(10));
    }
}
