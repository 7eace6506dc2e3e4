use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Postgres connection string. Empty selects the in-memory store.
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

fn default_max_connections() -> u32 {
    5
}

impl DatabaseConfig {
    pub fn is_in_memory(&self) -> bool {
        self.url.trim().is_empty()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, SERVER__HTTP_PORT, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        // Example: DATABASE__URL=postgres://... overrides database.url
        Self::from_sources(&run_mode, Environment::default().separator("__"))
    }

    fn from_sources(run_mode: &str, environment: Environment) -> Result<Self, ConfigError> {
        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(environment)
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        if config.jwt.secret.len() < 32 {
            return Err(ConfigError::Message(
                "jwt.secret must be at least 32 bytes".to_string(),
            ));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use config::Map;

    use super::*;

    fn environment(vars: &[(&str, &str)]) -> Environment {
        let vars: Map<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Environment::default().separator("__").source(Some(vars))
    }

    #[test]
    fn test_environment_overrides_files() {
        let config = Config::from_sources(
            "test",
            environment(&[
                ("JWT__SECRET", "env-secret-key-that-is-at-least-32-bytes"),
                ("DATABASE__URL", ""),
                ("SERVER__HTTP_PORT", "8081"),
            ]),
        )
        .expect("Failed to load config");

        assert_eq!(config.jwt.secret, "env-secret-key-that-is-at-least-32-bytes");
        assert!(config.database.is_in_memory());
        assert_eq!(config.server.http_port, 8081);
    }

    #[test]
    fn test_defaults_without_environment() {
        let config =
            Config::from_sources("test", environment(&[])).expect("Failed to load config");

        assert_eq!(config.server.http_port, 5000);
        assert!(!config.database.is_in_memory());
    }

    #[test]
    fn test_short_secret_rejected() {
        let result = Config::from_sources("test", environment(&[("JWT__SECRET", "short")]));

        assert!(result.is_err());
    }
}
