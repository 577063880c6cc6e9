use std::collections::HashMap;

use async_trait::async_trait;

use super::RoleResolver;

/// Resolver backed by a fixed token → role table.
///
/// The empty credential and every token missing from the table resolve to
/// the anonymous role.
pub struct TokenTableResolver {
    tokens: HashMap<String, String>,
    anonymous_role: String,
}

impl TokenTableResolver {
    pub fn new(tokens: HashMap<String, String>, anonymous_role: impl Into<String>) -> Self {
        Self {
            tokens,
            anonymous_role: anonymous_role.into(),
        }
    }

    pub fn anonymous_role(&self) -> &str {
        &self.anonymous_role
    }
}

#[async_trait]
impl RoleResolver for TokenTableResolver {
    async fn resolve(&self, credential: &str) -> String {
        if credential.is_empty() {
            return self.anonymous_role.clone();
        }

        match self.tokens.get(credential) {
            Some(role) => role.clone(),
            None => self.anonymous_role.clone(),
        }
    }
}
