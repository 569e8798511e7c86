use std::num::NonZeroUsize;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub summarizer: SummarizerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    #[serde(default)]
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SummarizerConfig {
    pub max_chunk_chars: NonZeroUsize,
}

impl AppConfig {
    /// Layered load: defaults, `config/default`, `config/{RUN_ENV}`, `APP__*`
    /// variables, then the flat `COHERE_API_KEY` / `PORT` / `COHERE_MODEL` names.
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        let builder = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{environment}")).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .set_override_option("llm.api_key", std::env::var("COHERE_API_KEY").ok())?
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("llm.model", std::env::var("COHERE_MODEL").ok())?;

        Self::from_builder(builder)
    }

    pub fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3001)?
            .set_default("server.max_upload_mb", 50)?
            .set_default("llm.model", "command")?
            .set_default("llm.base_url", "https://api.cohere.com")?
            .set_default("summarizer.max_chunk_chars", 7000)
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Self = builder.build()?.try_deserialize()?;

        if config.llm.api_key.trim().is_empty() {
            return Err(ConfigError::Message(
                "COHERE_API_KEY must be set (or APP__LLM__API_KEY)".to_string(),
            ));
        }

        Ok(config)
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.server.max_upload_mb.saturating_mul(1024 * 1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_with_key() {
        let builder = AppConfig::defaults()
            .unwrap()
            .set_override("llm.api_key", "secret")
            .unwrap();
        let config = AppConfig::from_builder(builder).unwrap();

        assert_eq!(config.server.port, 3001);
        assert_eq!(config.llm.base_url, "https://api.cohere.com");
        assert_eq!(config.llm.model, "command");
        assert_eq!(config.summarizer.max_chunk_chars.get(), 7000);
        assert_eq!(config.max_upload_bytes(), 50 * 1024 * 1024);
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let err = AppConfig::from_builder(AppConfig::defaults().unwrap()).unwrap_err();
        assert!(err.to_string().contains("COHERE_API_KEY"), "{err}");
    }

    #[test]
    fn test_overrides_apply() {
        let builder = AppConfig::defaults()
            .unwrap()
            .set_override("llm.api_key", "secret")
            .unwrap()
            .set_override_option("server.port", Some("8080"))
            .unwrap()
            .set_override_option("llm.model", None::<String>)
            .unwrap();
        let config = AppConfig::from_builder(builder).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.llm.model, "command");
    }

    #[test]
    fn test_huge_upload_limit_saturates() {
        let builder = AppConfig::defaults()
            .unwrap()
            .set_override("llm.api_key", "secret")
            .unwrap();
        let mut config = AppConfig::from_builder(builder).unwrap();

        config.server.max_upload_mb = usize::MAX / 1024;
        assert_eq!(config.max_upload_bytes(), usize::MAX);
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let builder = AppConfig::defaults()
            .unwrap()
            .set_override("llm.api_key", "secret")
            .unwrap()
            .set_override("summarizer.max_chunk_chars", 0)
            .unwrap();
        assert!(AppConfig::from_builder(builder).is_err());
    }
}
