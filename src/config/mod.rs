//! Configuration loading

mod app_config;

pub use app_config::{
    AppConfig, ExecutorConfig, LogFormat, LoggingConfig, MappingsConfig, ServerConfig,
    StorageSettings,
};
