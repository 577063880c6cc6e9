use log::{info, warn};

use super::config::ResolverConfig;
use super::TokenTableResolver;

pub struct ResolverFactory;

impl ResolverFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn build_resolver(&self, cfg: &ResolverConfig) -> TokenTableResolver {
        if cfg.tokens.is_empty() {
            warn!(
                "No bearer tokens configured, every request resolves to role '{}'",
                cfg.anonymous_role
            );
        } else {
            info!("Loaded {} bearer tokens", cfg.tokens.len());
        }
        TokenTableResolver::new(cfg.tokens.clone(), cfg.anonymous_role.clone())
    }
}

#[cfg(test)]
mod tests {
    use crate::config::CommonConfig;
    use crate::resolver::RoleResolver;

    use super::*;

    #[tokio::test]
    async fn test_factory() {
        let factory = ResolverFactory::new();

        let cfg = ResolverConfig::default();
        let resolver = factory.build_resolver(&cfg);
        assert_eq!(resolver.resolve("any").await, "anonymous");

        let mut cfg = ResolverConfig::default();
        cfg.anonymous_role = "guest".to_string();
        cfg.tokens.insert("t1".to_string(), "admin".to_string());
        let resolver = factory.build_resolver(&cfg);
        assert_eq!(resolver.resolve("t1").await, "admin");
        assert_eq!(resolver.resolve("t2").await, "guest");
    }
}
