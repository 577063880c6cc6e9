//! Role-based authorization gate for actix-web services.
//!
//! Every request that is not skipped has its bearer credential resolved to a
//! role by a [`resolver::RoleResolver`]; a [`policy::PolicyEngine`] then
//! decides whether that role may perform the request's method on its path.
//! Anything other than a definite permit is answered with `403 Forbidden`.

pub mod config;
pub mod gate;
pub mod logs;
pub mod policy;
pub mod resolver;
pub mod response;
pub mod server;
