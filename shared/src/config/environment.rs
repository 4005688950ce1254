//! Deployment environment and the logging defaults tied to it

use serde::{Deserialize, Serialize};

/// Where the process runs. Selects the config/.env files and log output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Read `ENVIRONMENT`; anything unset or unrecognised means development
    pub fn from_env() -> Self {
        std::env::var("ENVIRONMENT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default()
    }

    /// Base name of the optional TOML file, e.g. `config.production`
    pub fn config_file(&self) -> String {
        format!("config.{}", self)
    }

    /// Dotenv file layered over `.env`, e.g. `.env.production`
    pub fn env_file(&self) -> String {
        format!(".env.{}", self)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Environment::Development => "development",
            Environment::Production => "production",
        })
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(format!("unknown environment {:?}", other)),
        }
    }
}

/// How `init_tracing` renders events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

/// Subscriber settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `auc_core=debug`
    pub level: String,
    pub format: LogFormat,
    /// ANSI colours, terminal output only
    pub colored: bool,
    /// Emit file and line of each event
    pub source_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl LoggingConfig {
    /// Verbose human-readable output in development, JSON at `warn` in production
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self {
                level: String::from("debug"),
                format: LogFormat::Pretty,
                colored: true,
                source_location: true,
            },
            Environment::Production => Self {
                level: String::from("warn"),
                format: LogFormat::Json,
                colored: false,
                source_location: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!(" PROD ".parse::<Environment>().unwrap(), Environment::Production);
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn test_environment_file_names() {
        assert_eq!(Environment::Development.config_file(), "config.development");
        assert_eq!(Environment::Production.env_file(), ".env.production");
        assert!(Environment::Production.is_production());
    }

    #[test]
    fn test_logging_defaults_follow_environment() {
        let dev = LoggingConfig::default();
        assert_eq!(dev.level, "debug");
        assert_eq!(dev.format, LogFormat::Pretty);
        assert!(dev.source_location);

        let prod = LoggingConfig::for_environment(Environment::Production);
        assert_eq!(prod.level, "warn");
        assert_eq!(prod.format, LogFormat::Json);
        assert!(!prod.colored);
    }

    #[test]
    fn test_logging_partial_document() {
        let config: LoggingConfig = serde_json::from_str(r#"{"format":"compact"}"#).unwrap();
        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(config.level, "debug");
    }
}
