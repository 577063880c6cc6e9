use std::sync::Arc;

use async_trait::async_trait;

use super::RoleResolver;

/// Chain of resolvers that are consulted in sequence.
///
/// The first resolver to answer with something other than the anonymous role
/// wins. If every resolver answers with the anonymous role (or the chain is
/// empty), the chain answers with the anonymous role too.
pub struct ChainResolver {
    resolvers: Vec<Arc<dyn RoleResolver>>,
    anonymous_role: String,
}

impl ChainResolver {
    pub fn new(resolvers: Vec<Arc<dyn RoleResolver>>, anonymous_role: impl Into<String>) -> Self {
        Self {
            resolvers,
            anonymous_role: anonymous_role.into(),
        }
    }
}

#[async_trait]
impl RoleResolver for ChainResolver {
    async fn resolve(&self, credential: &str) -> String {
        for resolver in self.resolvers.iter() {
            let role = resolver.resolve(credential).await;
            if !role.is_empty() && role != self.anonymous_role {
                return role;
            }
        }
        self.anonymous_role.clone()
    }
}
