use std::collections::{HashMap, HashSet};

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{AuthzRequest, PolicyEngine};

/// Grants `role` every combination of `paths` and `methods`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PolicyRule {
    /// Role this rule applies to.
    pub role: String,

    /// Set of request paths this rule applies to.
    /// Use "*" to match every path.
    pub paths: HashSet<String>,

    /// Set of allowed request methods, compared case-sensitively (`GET`, not
    /// `get`). Use "*" to allow every method.
    pub methods: HashSet<String>,
}

#[derive(Debug, Error, PartialEq)]
pub enum RuleError {
    #[error("rule {0}: role cannot be empty")]
    EmptyRole(usize),
    #[error("rule {0}: paths cannot be empty")]
    EmptyPaths(usize),
    #[error("rule {0}: methods cannot be empty")]
    EmptyMethods(usize),
}

/// In-memory policy engine backed by a fixed rule table.
///
/// The table is built once and only read afterwards, so a single engine can
/// be shared across all workers without locking.
#[derive(Debug)]
pub struct RuleEngine {
    rules: HashMap<String, Vec<PolicyRule>>,
}

impl RuleEngine {
    pub fn new(rules: Vec<PolicyRule>) -> Result<Self, RuleError> {
        let mut table: HashMap<String, Vec<PolicyRule>> = HashMap::new();
        for (idx, rule) in rules.into_iter().enumerate() {
            if rule.role.is_empty() {
                return Err(RuleError::EmptyRole(idx));
            }
            if rule.paths.is_empty() {
                return Err(RuleError::EmptyPaths(idx));
            }
            if rule.methods.is_empty() {
                return Err(RuleError::EmptyMethods(idx));
            }
            table.entry(rule.role.clone()).or_default().push(rule);
        }
        Ok(Self { rules: table })
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[async_trait]
impl PolicyEngine for RuleEngine {
    async fn evaluate(&self, req: &AuthzRequest) -> Result<bool> {
        let rules = match self.rules.get(&req.role) {
            Some(rules) => rules,
            None => return Ok(false),
        };
        Ok(is_authorized(rules, &req.path, &req.action))
    }
}

/// Checks if any rule in the provided rules allows access to the path and method
pub fn is_authorized(rules: &[PolicyRule], path: &str, method: &str) -> bool {
    for rule in rules.iter() {
        if !rule.paths.contains("*") && !rule.paths.contains(path) {
            continue;
        }
        if !rule.methods.contains("*") && !rule.methods.contains(method) {
            continue;
        }
        return true;
    }
    false
}
