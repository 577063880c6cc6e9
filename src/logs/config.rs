use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::config::CommonConfig;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogConfig {
    /// One of "error", "warn", "info" or "debug". Defaults to "info".
    #[serde(default = "LogConfig::default_level")]
    pub level: LogLevel,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub enum LogLevel {
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "warn")]
    Warn,
    #[serde(rename = "info")]
    Info,
    #[serde(rename = "debug")]
    Debug,
}

impl CommonConfig for LogConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }

    fn complete(&mut self) -> Result<()> {
        Ok(())
    }
}

impl LogConfig {
    pub fn default_level() -> LogLevel {
        LogLevel::Info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        let cfg: LogConfig = toml::from_str("level = \"warn\"").unwrap();
        assert_eq!(cfg.level, LogLevel::Warn);

        let cfg: LogConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.level, LogLevel::Info);

        let result: Result<LogConfig, _> = toml::from_str("level = \"verbose\"");
        assert!(result.is_err());
    }
}
