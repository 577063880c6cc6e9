use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::{expandenv, CommonConfig};
use crate::gate::config::GateConfig;
use crate::logs::config::LogConfig;
use crate::policy::config::PolicyConfig;
use crate::resolver::config::ResolverConfig;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GateServerConfig {
    #[serde(default = "GateServerConfig::default_bind")]
    pub bind: String,

    #[serde(default = "GateServerConfig::default_ssl")]
    pub ssl: bool,

    /// Required when `ssl` is enabled.
    #[serde(default = "GateServerConfig::default_cert_path")]
    pub cert_path: String,

    /// Required when `ssl` is enabled.
    #[serde(default = "GateServerConfig::default_key_path")]
    pub key_path: String,

    /// 0 keeps the actix default.
    #[serde(default = "GateServerConfig::default_keep_alive_secs")]
    pub keep_alive_secs: u64,

    /// 0 keeps the actix default (one worker per physical core).
    #[serde(default = "GateServerConfig::default_workers")]
    pub workers: u64,

    #[serde(default = "LogConfig::default")]
    pub logs: LogConfig,

    #[serde(default = "GateConfig::default")]
    pub gate: GateConfig,

    #[serde(default = "ResolverConfig::default")]
    pub resolver: ResolverConfig,

    #[serde(default = "PolicyConfig::default")]
    pub policy: PolicyConfig,
}

impl CommonConfig for GateServerConfig {
    fn default() -> Self {
        Self {
            bind: Self::default_bind(),
            ssl: Self::default_ssl(),
            cert_path: Self::default_cert_path(),
            key_path: Self::default_key_path(),
            keep_alive_secs: Self::default_keep_alive_secs(),
            workers: Self::default_workers(),
            logs: LogConfig::default(),
            gate: GateConfig::default(),
            resolver: ResolverConfig::default(),
            policy: PolicyConfig::default(),
        }
    }

    fn complete(&mut self) -> Result<()> {
        self.bind = expandenv("bind", &self.bind)?;
        if self.bind.is_empty() {
            bail!("bind cannot be empty");
        }

        self.cert_path = expandenv("cert_path", &self.cert_path)?;
        self.key_path = expandenv("key_path", &self.key_path)?;
        if self.ssl {
            if self.cert_path.is_empty() {
                bail!("cert_path is required when ssl is enabled");
            }
            if self.key_path.is_empty() {
                bail!("key_path is required when ssl is enabled");
            }
        }

        self.logs.complete().context("logs")?;
        self.gate.complete().context("gate")?;
        self.resolver.complete().context("resolver")?;
        self.policy.complete().context("policy")?;

        Ok(())
    }
}

impl GateServerConfig {
    pub fn default_bind() -> String {
        String::from("127.0.0.1:7881")
    }

    pub fn default_ssl() -> bool {
        false
    }

    pub fn default_cert_path() -> String {
        String::new()
    }

    pub fn default_key_path() -> String {
        String::new()
    }

    pub fn default_keep_alive_secs() -> u64 {
        0
    }

    pub fn default_workers() -> u64 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let mut cfg = GateServerConfig::default();
        cfg.complete().unwrap();
        assert_eq!(cfg.bind, "127.0.0.1:7881");
        assert!(!cfg.ssl);
        assert!(cfg.gate.skip_paths.is_empty());
        assert!(cfg.policy.rules.is_empty());
    }

    #[test]
    fn test_parse() {
        let s = r#"
            bind = "0.0.0.0:8080"
            workers = 4

            [logs]
            level = "debug"

            [gate]
            skip_paths = ["/health"]

            [resolver.tokens]
            "admin-token" = "admin"
            "dba-token" = "dba"

            [[policy.rules]]
            role = "admin"
            paths = ["*"]
            methods = ["*"]

            [[policy.rules]]
            role = "dba"
            paths = ["/dba"]
            methods = ["POST"]
        "#;
        let mut cfg: GateServerConfig = toml::from_str(s).unwrap();
        cfg.complete().unwrap();

        assert_eq!(cfg.bind, "0.0.0.0:8080");
        assert_eq!(cfg.workers, 4);
        assert_eq!(cfg.keep_alive_secs, 0);
        assert_eq!(cfg.gate.skip_paths, vec!["/health".to_string()]);
        assert_eq!(cfg.resolver.anonymous_role, "anonymous");
        assert_eq!(cfg.resolver.tokens.len(), 2);
        assert_eq!(cfg.policy.rules.len(), 2);
    }

    #[test]
    fn test_validate() {
        let mut cfg = GateServerConfig::default();
        cfg.bind = String::new();
        assert!(cfg.complete().is_err());

        let mut cfg = GateServerConfig::default();
        cfg.ssl = true;
        assert!(cfg.complete().is_err());

        cfg.cert_path = String::from("/etc/rolegate/server.crt");
        assert!(cfg.complete().is_err());

        cfg.key_path = String::from("/etc/rolegate/server.key");
        cfg.complete().unwrap();

        let mut cfg = GateServerConfig::default();
        cfg.gate.skip_paths = vec![String::from("health")];
        let err = cfg.complete().unwrap_err();
        assert_eq!(format!("{err}"), "gate");
    }
}
