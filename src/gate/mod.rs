pub mod config;
pub mod credential;
pub mod middleware;
pub mod skip;

use std::sync::Arc;

use actix_web::HttpRequest;
use anyhow::Result;
use log::{debug, error, warn};

use crate::policy::{AuthzRequest, PolicyEngine};
use crate::resolver::RoleResolver;

use skip::{NeverSkip, Skipper};

/// Outcome of intercepting one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Hand the request to the downstream handler
    Continue,
    /// Terminate the request with the forbidden response
    Reject,
}

/// Collaborators used to build a [`Gate`].
pub struct GateOptions {
    /// Bypass rule. When `None`, no request is skipped.
    pub skipper: Option<Arc<dyn Skipper>>,
    pub resolver: Arc<dyn RoleResolver>,
    pub engine: Arc<dyn PolicyEngine>,
}

/// The authorization gate.
///
/// For every request that is not skipped, the gate reads the bearer
/// credential, resolves it to a role and asks the policy engine whether that
/// role may perform `(path, method)`. Only a definite `Ok(true)` from the
/// engine lets the request through; everything else is rejected.
///
/// A gate holds no per-request state, so a single instance is shared by all
/// workers.
pub struct Gate {
    skipper: Arc<dyn Skipper>,
    resolver: Arc<dyn RoleResolver>,
    engine: Arc<dyn PolicyEngine>,
}

impl Gate {
    /// Creates a gate that authorizes every request.
    pub fn new(resolver: Arc<dyn RoleResolver>, engine: Arc<dyn PolicyEngine>) -> Self {
        Self::with_options(GateOptions {
            skipper: None,
            resolver,
            engine,
        })
    }

    pub fn with_options(opts: GateOptions) -> Self {
        let skipper = match opts.skipper {
            Some(skipper) => skipper,
            None => Arc::new(NeverSkip),
        };
        Self {
            skipper,
            resolver: opts.resolver,
            engine: opts.engine,
        }
    }

    /// Decides whether `req` may reach the downstream handler.
    pub async fn intercept(&self, req: &HttpRequest) -> Decision {
        match self.skipper.skip(req) {
            Ok(true) => {
                debug!("Skip authorization for {} {}", req.method(), req.path());
                return Decision::Continue;
            }
            Ok(false) => {}
            Err(e) => {
                warn!(
                    "Skip check for {} {} failed, authorizing instead: {e:#}",
                    req.method(),
                    req.path()
                );
            }
        }

        let authz_req = self.authz_request(req).await;
        match self.engine.evaluate(&authz_req).await {
            Ok(true) => Decision::Continue,
            Ok(false) => {
                debug!(
                    "Reject {} {} for role '{}'",
                    authz_req.action, authz_req.path, authz_req.role
                );
                Decision::Reject
            }
            Err(e) => {
                error!(
                    "Policy evaluation for {} {} failed, rejecting: {e:#}",
                    authz_req.action, authz_req.path
                );
                Decision::Reject
            }
        }
    }

    /// Resolves the caller's role from the request's bearer credential.
    pub async fn role(&self, req: &HttpRequest) -> String {
        let credential = credential::from_request(req);
        self.resolver.resolve(&credential).await
    }

    /// Runs the policy check for `req` without the skip check and without
    /// collapsing engine errors, for callers that want the raw answer.
    pub async fn check_permission(&self, req: &HttpRequest) -> Result<bool> {
        let authz_req = self.authz_request(req).await;
        self.engine.evaluate(&authz_req).await
    }

    async fn authz_request(&self, req: &HttpRequest) -> AuthzRequest {
        let role = self.role(req).await;
        AuthzRequest {
            role,
            path: req.path().to_string(),
            action: req.method().as_str().to_string(),
        }
    }
}
