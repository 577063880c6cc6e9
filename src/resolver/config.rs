use std::collections::HashMap;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::config::{expandenv, CommonConfig};

use super::ANONYMOUS_ROLE;

/// Role resolution configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ResolverConfig {
    /// Role assigned to requests without a credential, or with a credential
    /// missing from `tokens`.
    /// Default: "anonymous"
    #[serde(default = "ResolverConfig::default_anonymous_role")]
    pub anonymous_role: String,

    /// Bearer token to role table. Tokens may reference environment
    /// variables (for example `"${ADMIN_TOKEN}" = "admin"`), which are
    /// expanded when the config is loaded so that secrets stay out of the
    /// file.
    /// Default: empty, every request resolves to the anonymous role.
    #[serde(default = "ResolverConfig::default_tokens")]
    pub tokens: HashMap<String, String>,
}

impl CommonConfig for ResolverConfig {
    fn default() -> Self {
        Self {
            anonymous_role: Self::default_anonymous_role(),
            tokens: Self::default_tokens(),
        }
    }

    fn complete(&mut self) -> Result<()> {
        if self.anonymous_role.is_empty() {
            bail!("anonymous_role cannot be empty");
        }

        let mut tokens = HashMap::with_capacity(self.tokens.len());
        for (token, role) in self.tokens.drain() {
            let token = expandenv("tokens", &token)?;
            let token = token.trim().to_string();
            if token.is_empty() {
                bail!("token for role '{role}' cannot be empty");
            }
            if role.is_empty() {
                bail!("role for a configured token cannot be empty");
            }
            if tokens.insert(token, role).is_some() {
                bail!("duplicate token after env expansion");
            }
        }
        self.tokens = tokens;

        Ok(())
    }
}

impl ResolverConfig {
    pub fn default_anonymous_role() -> String {
        String::from(ANONYMOUS_ROLE)
    }

    pub fn default_tokens() -> HashMap<String, String> {
        HashMap::new()
    }
}
