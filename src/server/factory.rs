use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;
use openssl::ssl::{SslAcceptor, SslAcceptorBuilder, SslMethod};

use crate::gate::skip::{PathSkipper, Skipper};
use crate::gate::{Gate, GateOptions};
use crate::policy::factory::PolicyFactory;
use crate::resolver::factory::ResolverFactory;

use super::config::GateServerConfig;
use super::restful::GateServer;

pub struct ServerFactory {
    cfg: GateServerConfig,
}

impl ServerFactory {
    pub fn new(cfg: GateServerConfig) -> Self {
        Self { cfg }
    }

    pub fn build_server(&self) -> Result<GateServer> {
        let ssl = self.build_ssl()?;
        let gate = self.build_gate()?;

        let mut srv = GateServer::new(self.cfg.bind.clone(), ssl, gate);
        if self.cfg.keep_alive_secs > 0 {
            srv.set_keep_alive_secs(self.cfg.keep_alive_secs);
        }
        if self.cfg.workers > 0 {
            srv.set_workers(self.cfg.workers);
        }

        Ok(srv)
    }

    pub fn build_ssl(&self) -> Result<Option<SslAcceptorBuilder>> {
        if !self.cfg.ssl {
            return Ok(None);
        }

        let mut builder =
            SslAcceptor::mozilla_intermediate(SslMethod::tls()).context("init ssl acceptor")?;

        builder
            .set_private_key_file(&self.cfg.key_path, openssl::ssl::SslFiletype::PEM)
            .context("load ssl key file")?;
        builder
            .set_certificate_chain_file(&self.cfg.cert_path)
            .context("load ssl cert file")?;

        Ok(Some(builder))
    }

    pub fn build_gate(&self) -> Result<Arc<Gate>> {
        let resolver_factory = ResolverFactory::new();
        let resolver = resolver_factory.build_resolver(&self.cfg.resolver);

        let policy_factory = PolicyFactory::new();
        let engine = policy_factory
            .build_engine(&self.cfg.policy)
            .context("init policy engine")?;

        let skipper: Option<Arc<dyn Skipper>> = if self.cfg.gate.skip_paths.is_empty() {
            None
        } else {
            info!(
                "Authorization is skipped for paths: {:?}",
                self.cfg.gate.skip_paths
            );
            Some(Arc::new(PathSkipper::new(&self.cfg.gate.skip_paths)))
        };

        let gate = Gate::with_options(GateOptions {
            skipper,
            resolver: Arc::new(resolver),
            engine: Arc::new(engine),
        });
        Ok(Arc::new(gate))
    }
}
