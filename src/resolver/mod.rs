mod chain;
mod table;

pub mod config;
pub mod factory;

pub use chain::ChainResolver;
pub use table::TokenTableResolver;

use async_trait::async_trait;

/// Role assigned when a credential is missing or cannot be identified.
pub const ANONYMOUS_ROLE: &str = "anonymous";

/// Capability that maps an opaque credential to a role.
///
/// Resolution has no error channel: a resolver that cannot identify the
/// credential (including the empty credential) must answer with its anonymous
/// role and let the policy engine decide what that role may do.
#[async_trait]
pub trait RoleResolver: Send + Sync {
    async fn resolve(&self, credential: &str) -> String;
}
