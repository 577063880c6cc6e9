mod rule;

pub mod config;
pub mod factory;

pub use rule::{PolicyRule, RuleEngine, RuleError};

use anyhow::Result;
use async_trait::async_trait;

/// Capability that decides whether a role may perform an action on a resource.
///
/// Engines are shared by every in-flight request, so implementations must be
/// safe to call concurrently. Any internal engine failure is reported through
/// the `Err` arm; the gate treats it exactly like a denial.
#[async_trait]
pub trait PolicyEngine: Send + Sync {
    /// Evaluates `(role, path, action)`.
    ///
    /// # Returns
    /// * `Ok(true)` - The action is permitted
    /// * `Ok(false)` - The action is denied
    /// * `Err(_)` - The engine could not reach a decision
    async fn evaluate(&self, req: &AuthzRequest) -> Result<bool>;
}

/// The triple submitted to a policy engine. Field order mirrors the rule
/// schema: subject first, then object, then action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthzRequest {
    /// Role produced by the resolver; the anonymous role when no credential
    /// could be resolved.
    pub role: String,
    /// Request path, taken verbatim from the request URI.
    pub path: String,
    /// Request method, taken verbatim (e.g. `GET`).
    pub action: String,
}

impl AuthzRequest {
    pub fn new(role: impl Into<String>, path: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            path: path.into(),
            action: action.into(),
        }
    }
}
