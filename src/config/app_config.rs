use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageSettings,
    pub mappings: MappingsConfig,
    pub executor: ExecutorConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// `memory` or `postgres`
    pub backend: String,
    pub database_url: Option<String>,
    /// Seed the catalog with the bundled people and product endpoints when empty
    pub seed_endpoints: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MappingsConfig {
    pub endpoint_mapping_path: String,
    pub chain_mapping_path: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Prefix for relative endpoint URLs
    pub base_url: String,
    pub step_delay_ms: u64,
    pub allow_unresolved_placeholders: bool,
    pub request_timeout_secs: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            database_url: None,
            seed_endpoints: true,
        }
    }
}

impl Default for MappingsConfig {
    fn default() -> Self {
        Self {
            endpoint_mapping_path: "config/mappings/endpoint_mapping.json".to_string(),
            chain_mapping_path: "config/mappings/chain_mapping.json".to_string(),
        }
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            step_delay_ms: 2000,
            allow_unresolved_placeholders: false,
            request_timeout_secs: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.server_address(), "0.0.0.0:8080");
        assert_eq!(config.storage.backend, "memory");
        assert_eq!(config.executor.step_delay_ms, 2000);
        assert!(!config.executor.allow_unresolved_placeholders);
        assert!(config.executor.request_timeout_secs.is_none());
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [executor]
                step_delay_ms = 0

                [logging]
                format = "json"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.executor.step_delay_ms, 0);
        assert_eq!(config.executor.base_url, "http://localhost:8080");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.server.port, 8080);
    }
}
