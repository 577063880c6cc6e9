mod handlers;

pub mod config;
pub mod factory;
pub mod restful;

pub use restful::GateServer;
