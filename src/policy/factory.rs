use anyhow::{Context, Result};
use log::{info, warn};

use super::config::PolicyConfig;
use super::RuleEngine;

pub struct PolicyFactory;

impl PolicyFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn build_engine(&self, cfg: &PolicyConfig) -> Result<RuleEngine> {
        let engine = RuleEngine::new(cfg.rules.clone()).context("build rule engine")?;
        if engine.is_empty() {
            warn!("No policy rules configured, every request that is not skipped will be rejected");
        } else {
            info!("Loaded {} policy rules", cfg.rules.len());
        }
        Ok(engine)
    }
}
