use std::sync::Arc;
use std::time::Duration;

use actix_web::web::{self, ServiceConfig};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer};
use anyhow::{Context, Result};
use log::{info, warn};
use openssl::ssl::SslAcceptorBuilder;
use sd_notify::NotifyState;

use crate::gate::middleware::Authorization;
use crate::gate::Gate;

use super::handlers;

/// Demo HTTP server with every route behind the authorization gate.
pub struct GateServer {
    ssl: Option<SslAcceptorBuilder>,
    gate: Arc<Gate>,

    keep_alive_secs: Option<u64>,
    workers: Option<u64>,

    bind: String,
}

impl GateServer {
    const ROOT_PATH: &str = "/";
    const LOGIN_PATH: &str = "/login";
    const LOGOUT_PATH: &str = "/logout";
    const DBA_PATH: &str = "/dba";
    const HEALTH_PATH: &str = "/health";

    pub fn new(bind: String, ssl: Option<SslAcceptorBuilder>, gate: Arc<Gate>) -> Self {
        Self {
            ssl,
            gate,
            keep_alive_secs: None,
            workers: None,
            bind,
        }
    }

    pub fn set_keep_alive_secs(&mut self, keep_alive_secs: u64) {
        self.keep_alive_secs = Some(keep_alive_secs);
    }

    pub fn set_workers(&mut self, workers: u64) {
        self.workers = Some(workers);
    }

    pub async fn run(mut self) -> Result<()> {
        let gate = self.gate.clone();
        let mut srv = HttpServer::new(move || {
            App::new()
                .wrap(Authorization::new(gate.clone()))
                .configure(Self::routes)
                .default_service(web::route().to(Self::default_handler))
        });

        if let Some(ssl) = self.ssl.take() {
            info!("Binding to https://{}", self.bind);
            srv = srv.bind_openssl(&self.bind, ssl).context("bind with ssl")?
        } else {
            warn!("Using HTTP (without SSL), bearer tokens are sent in plain text");
            info!("Binding to http://{}", self.bind);
            srv = srv.bind(&self.bind).context("bind without ssl")?
        };

        if let Some(keep_alive) = self.keep_alive_secs {
            srv = srv.keep_alive(Duration::from_secs(keep_alive));
        }
        if let Some(workers) = self.workers {
            srv = srv.workers(workers as usize);
        }

        sd_notify::notify(true, &[NotifyState::Ready]).context("notify systemd")?;
        info!("Starting gate server");
        srv.run().await.context("run server")?;

        info!("Server stopped by user");
        Ok(())
    }

    /// Registers the demo routes. The gate is not part of this; wrap the app
    /// with [`Authorization`] to protect them.
    pub fn routes(cfg: &mut ServiceConfig) {
        cfg.route(Self::ROOT_PATH, web::get().to(handlers::ok))
            .route(Self::LOGIN_PATH, web::get().to(handlers::ok))
            .route(Self::LOGOUT_PATH, web::get().to(handlers::ok))
            .route(Self::DBA_PATH, web::get().to(handlers::ok))
            .route(Self::DBA_PATH, web::post().to(handlers::ok))
            .route(Self::HEALTH_PATH, web::get().to(handlers::healthz));
    }

    pub async fn default_handler(req: HttpRequest) -> HttpResponse {
        handlers::default_handler(req).await
    }
}
