use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::config::CommonConfig;

use super::PolicyRule;

/// Policy related configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PolicyConfig {
    /// Rules granting roles access to paths and methods. A request is allowed
    /// only if some rule for its role matches both its path and its method.
    /// If empty, every request that is not skipped is rejected.
    /// Defaults to empty.
    #[serde(default = "PolicyConfig::default_rules")]
    pub rules: Vec<PolicyRule>,
}

impl CommonConfig for PolicyConfig {
    fn default() -> Self {
        Self {
            rules: Self::default_rules(),
        }
    }

    fn complete(&mut self) -> Result<()> {
        Ok(())
    }
}

impl PolicyConfig {
    pub fn default_rules() -> Vec<PolicyRule> {
        vec![]
    }
}
