use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::config::CommonConfig;

/// Gate related configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GateConfig {
    /// Request paths that bypass authorization entirely, such as health
    /// checks. An entry ending in `/*` skips every path under that prefix;
    /// other entries must match the path exactly.
    /// Defaults to empty, every request is authorized.
    #[serde(default = "GateConfig::default_skip_paths")]
    pub skip_paths: Vec<String>,
}

impl CommonConfig for GateConfig {
    fn default() -> Self {
        Self {
            skip_paths: Self::default_skip_paths(),
        }
    }

    fn complete(&mut self) -> Result<()> {
        for path in self.skip_paths.iter() {
            if !path.starts_with('/') {
                bail!("skip path '{path}' must start with '/'");
            }
            if path == "/*" {
                bail!("skip path '/*' would disable authorization for every request");
            }
        }
        Ok(())
    }
}

impl GateConfig {
    pub fn default_skip_paths() -> Vec<String> {
        vec![]
    }
}
